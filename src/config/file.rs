//! Application preference file loading.

use crate::config::AppConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// Load preferences from a TOML file.
///
/// Returns default preferences if the file does not exist.
pub fn load_app_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save preferences to a TOML file.
pub fn save_app_config(config: &AppConfig, path: &Path) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let path = Path::new("/nonexistent/path/config.toml");
        let config = load_app_config(path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[renderer]
executable = "/opt/blur/blur"

[paths]
last_output_dir = "/videos/out"
"#
        )
        .unwrap();

        let config = load_app_config(file.path()).unwrap();
        assert_eq!(config.renderer.executable, PathBuf::from("/opt/blur/blur"));
        assert_eq!(
            config.paths.last_output_dir,
            Some(PathBuf::from("/videos/out"))
        );
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        assert!(matches!(
            load_app_config(file.path()),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs").join("config.toml");
        let mut config = AppConfig::default();
        config.paths.last_output_dir = Some(PathBuf::from("/renders"));

        save_app_config(&config, &path).unwrap();
        assert_eq!(load_app_config(&path).unwrap(), config);
    }
}
