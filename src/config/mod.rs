//! Configuration loading and management.
//!
//! Two files are managed here: the renderer's section-based config
//! (`config.cfg`), which is the document being edited, and the editor's
//! own TOML preferences.

mod document;
mod file;
mod paths;
mod settings;
pub mod store;
mod types;

pub use document::{Configuration, Section};
pub use file::{load_app_config, save_app_config};
pub use paths::{app_config_path, config_dir, default_blur_config_path, resolve_blur_config_path};
pub use settings::{BlurSettings, BlurWeighting, Setting, SettingKind};
pub use store::ConfigStore;
pub use types::{AppConfig, PathsConfig, ProbeConfig, RendererConfig};
