//! Platform-specific configuration paths.

use crate::constants::{APP_CONFIG_FILE_NAME, APP_NAME, BLUR_CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/blurcfg/`
/// - macOS: `~/Library/Application Support/blurcfg/`
/// - Windows: `%APPDATA%\blurcfg\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Path to the editor's own preferences.
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(APP_CONFIG_FILE_NAME))
}

/// Default location of the renderer config file.
pub fn default_blur_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(BLUR_CONFIG_FILE_NAME))
}

/// Resolve which renderer config file to edit.
///
/// Priority: explicit path > remembered path in preferences > platform default.
pub fn resolve_blur_config_path(
    explicit: Option<&Path>,
    remembered: Option<&Path>,
) -> Result<PathBuf> {
    match explicit.or(remembered) {
        Some(path) => Ok(path.to_path_buf()),
        None => default_blur_config_path(),
    }
}
