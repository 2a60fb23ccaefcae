//! Application preference types.

use crate::constants::probe::FFPROBE;
use crate::constants::renderer::DEFAULT_EXECUTABLE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Preferences of the editor itself, stored as TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Renderer invocation settings.
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Video probe settings.
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Remembered file locations.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Renderer invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Path to the renderer executable.
    pub executable: PathBuf,

    /// Reveal finished renders in the file browser.
    pub reveal_output: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            reveal_output: true,
        }
    }
}

/// Video probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Path to the `ffprobe` executable.
    pub ffprobe: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe: PathBuf::from(FFPROBE),
        }
    }
}

/// Remembered file locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Renderer config file to edit (platform default when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_config: Option<PathBuf>,

    /// Output folder chosen for the previous render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_output_dir: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reveals_output() {
        let config = AppConfig::default();
        assert!(config.renderer.reveal_output);
        assert_eq!(config.renderer.executable, PathBuf::from(DEFAULT_EXECUTABLE));
        assert_eq!(config.probe.ffprobe, PathBuf::from("ffprobe"));
        assert!(config.paths.last_output_dir.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[renderer]
reveal_output = false
"#,
        )
        .unwrap();
        assert!(!config.renderer.reveal_output);
        assert_eq!(config.renderer.executable, PathBuf::from(DEFAULT_EXECUTABLE));
    }

    #[test]
    fn test_renderer_path_key_is_executable() {
        let config: AppConfig = toml::from_str(
            r#"
[renderer]
executable = "/opt/blur/blur"
"#,
        )
        .unwrap();
        assert_eq!(config.renderer.executable, PathBuf::from("/opt/blur/blur"));

        let table: toml::Table = toml::from_str(&toml::to_string_pretty(&config).unwrap()).unwrap();
        assert!(table["renderer"].get("executable").is_some());
        assert!(table["probe"].get("ffprobe").is_some());
    }

    #[test]
    fn test_unset_paths_are_not_serialized() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(!text.contains("last_output_dir"));
        assert!(text.contains("reveal_output = true"));
    }
}
