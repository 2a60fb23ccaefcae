//! Write-through persistence of the renderer configuration.

use super::document::Configuration;
use super::settings::{BlurSettings, Setting};
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Load a configuration file.
///
/// A missing file is treated as an empty configuration so first runs read
/// every setting at its default. Invalid UTF-8 is replaced, not rejected.
pub fn load(path: &Path) -> Result<Configuration> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let contents = String::from_utf8_lossy(&bytes);
            if matches!(contents, Cow::Owned(_)) {
                warn!("Config file is not valid UTF-8, decoding lossily: {}", path.display());
            }
            Ok(Configuration::parse(&contents))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Config file not found, starting empty: {}", path.display());
            Ok(Configuration::new())
        }
        Err(e) => Err(Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Overwrite a configuration file with the serialized configuration.
///
/// The file is truncated and rewritten in place, not replaced atomically.
pub fn save(config: &Configuration, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, config.render()).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// The authoritative configuration of a session.
///
/// Every mutation is persisted immediately.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Configuration,
}

impl ConfigStore {
    /// Load the store from `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = load(&path)?;
        debug!(
            "Loaded {} section(s) from {}",
            config.sections().count(),
            path.display()
        );
        Ok(Self { path, config })
    }

    /// Write a template with every known setting at its default.
    ///
    /// Fails with [`Error::ConfigExists`] if the file exists and `force` is false.
    pub fn init(path: impl Into<PathBuf>, force: bool) -> Result<Self> {
        let path = path.into();
        if path.exists() && !force {
            return Err(Error::ConfigExists { path });
        }

        let mut config = Configuration::new();
        for setting in Setting::ALL {
            config.set(setting.section(), setting.key(), setting.default_value());
        }
        save(&config, &path)?;
        info!("Wrote default config to {}", path.display());
        Ok(Self { path, config })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Typed view of the known settings.
    pub fn settings(&self) -> BlurSettings {
        BlurSettings::from_config(&self.config)
    }

    /// Look up a raw value.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.config.get(section, key)
    }

    /// Set a value and persist the whole file.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        self.config.set(section, key, value);
        debug!("Set {section}.{key} = {value}");
        self.save()
    }

    /// Remove a value and persist. Returns whether anything was removed.
    pub fn remove(&mut self, section: &str, key: &str) -> Result<bool> {
        if self.config.remove(section, key).is_none() {
            return Ok(false);
        }
        debug!("Removed {section}.{key}");
        self.save()?;
        Ok(true)
    }

    /// Persist the current configuration.
    pub fn save(&self) -> Result<()> {
        save(&self.config, &self.path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = load(&dir.path().join("config.cfg")).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_load_directory_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load(dir.path()).is_err());
    }

    #[test]
    fn test_load_invalid_utf8_keeps_readable_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.cfg");
        std::fs::write(&path, b"- blur\nblur: true\nnote: caf\xe9\n\n- rendering\nquality: 18\n").unwrap();

        let mut store = ConfigStore::open(&path).unwrap();
        assert_eq!(store.get("blur", "blur"), Some("true"));
        assert_eq!(store.get("rendering", "quality"), Some("18"));

        store.set("rendering", "quality", "20").unwrap();
        assert_eq!(
            ConfigStore::open(&path).unwrap().get("rendering", "quality"),
            Some("20")
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.cfg");
        let text = "- blur\nblur: true\nblur amount: 2.5\n\n- rendering\nquality: 18\npreview: false\n\n";
        std::fs::write(&path, text).unwrap();

        let config = load(&path).unwrap();
        save(&config, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.cfg");
        let config = Configuration::parse("- interpolation\ninterpolate: true\n");

        save(&config, &path).unwrap();
        let first = std::fs::read(&path).unwrap();
        save(&config, &path).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.cfg");
        save(&Configuration::new(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_set_writes_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.cfg");
        let mut store = ConfigStore::open(&path).unwrap();

        store.set("blur", "blur amount", "3.5").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "- blur\nblur amount: 3.5\n\n"
        );

        let reopened = ConfigStore::open(&path).unwrap();
        assert_eq!(reopened.get("blur", "blur amount"), Some("3.5"));
    }

    #[test]
    fn test_remove_persists_only_when_present() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.cfg");
        let mut store = ConfigStore::open(&path).unwrap();

        assert!(!store.remove("blur", "blur").unwrap());
        assert!(!path.exists());

        store.set("blur", "blur", "false").unwrap();
        assert!(store.remove("blur", "blur").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "- blur\n\n");
    }

    #[test]
    fn test_init_writes_every_known_setting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.cfg");
        let store = ConfigStore::init(&path, false).unwrap();

        for setting in Setting::ALL {
            assert_eq!(
                store.get(setting.section(), setting.key()),
                Some(setting.default_value().as_str())
            );
        }
        let reopened = ConfigStore::open(&path).unwrap();
        assert_eq!(reopened.config(), store.config());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.cfg");
        std::fs::write(&path, "- blur\nblur: false\n").unwrap();

        assert!(matches!(
            ConfigStore::init(&path, false),
            Err(Error::ConfigExists { .. })
        ));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "- blur\nblur: false\n"
        );

        ConfigStore::init(&path, true).unwrap();
        assert_eq!(ConfigStore::open(&path).unwrap().get("blur", "blur"), Some("true"));
    }
}
