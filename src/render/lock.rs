//! One render per config file.
//!
//! While the renderer runs, `<config>.render.lock` exists next to the config
//! it reads and names the render that owns it. A second render against the
//! same config sees the file and is refused.

use crate::constants::RENDER_LOCK_SUFFIX;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// Lock files owned by this process, removed on Ctrl+C.
static OWNED: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

/// Who is rendering, as recorded in the lock file.
#[derive(Debug, Serialize, Deserialize)]
pub struct LockHolder {
    /// Process running the render.
    pub pid: u32,
    /// Machine running the render.
    pub hostname: String,
    /// When the render started.
    pub started: DateTime<Utc>,
    /// Video being rendered.
    pub input: PathBuf,
}

impl LockHolder {
    fn this_process(input: &Path) -> Self {
        Self {
            pid: std::process::id(),
            hostname: hostname::get().map_or_else(
                |_| "unknown".to_string(),
                |h| h.to_string_lossy().into_owned(),
            ),
            started: Utc::now(),
            input: input.to_path_buf(),
        }
    }
}

/// Lock file guarding renders against `config_path`.
pub fn lock_path(config_path: &Path) -> PathBuf {
    let mut name = config_path.as_os_str().to_os_string();
    name.push(RENDER_LOCK_SUFFIX);
    PathBuf::from(name)
}

/// Guard held for the duration of one render. Dropping it frees the config.
#[derive(Debug)]
pub struct RenderLock {
    file: PathBuf,
}

impl RenderLock {
    /// Claim `config_path` for rendering `input`.
    ///
    /// Fails with [`Error::RenderInProgress`] if another render owns it.
    pub fn acquire(config_path: &Path, input: &Path) -> Result<Self> {
        let file = lock_path(config_path);
        let handle = match File::create_new(&file) {
            Ok(handle) => handle,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::RenderInProgress { path: file });
            }
            Err(e) => return Err(Error::LockCreate { path: file, source: e }),
        };

        // The holder record is informational; an empty lock still blocks.
        if let Err(e) = serde_json::to_writer_pretty(handle, &LockHolder::this_process(input)) {
            warn!("Could not record render owner in {}: {e}", file.display());
        }

        if let Ok(mut owned) = OWNED.lock() {
            owned.push(file.clone());
        }
        debug!("Claimed {}", file.display());
        Ok(Self { file })
    }

    /// Read who owns the lock on `config_path`, if anyone readable does.
    pub fn holder(config_path: &Path) -> Option<LockHolder> {
        let text = fs::read_to_string(lock_path(config_path)).ok()?;
        serde_json::from_str(&text).ok()
    }

    /// Remove the lock on `config_path` if it is older than `max_age`.
    ///
    /// Returns whether a lock was removed. Younger locks are left alone.
    pub fn clear_stale(config_path: &Path, max_age: Duration) -> Result<bool> {
        let file = lock_path(config_path);
        let age = fs::metadata(&file)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok());

        match age {
            Some(age) if age > max_age => {
                match Self::holder(config_path) {
                    Some(h) => warn!(
                        "Removing stale render lock of pid {} on {} (started {})",
                        h.pid, h.hostname, h.started
                    ),
                    None => warn!("Removing stale render lock {}", file.display()),
                }
                fs::remove_file(&file).map_err(|e| Error::LockRemove { path: file, source: e })?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Drop for RenderLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.file) {
            warn!("Could not remove {}: {e}", self.file.display());
        }
        if let Ok(mut owned) = OWNED.lock() {
            owned.retain(|f| f != &self.file);
        }
    }
}

/// Remove every lock this process owns. Used from the Ctrl+C handler.
pub fn release_all() {
    if let Ok(owned) = OWNED.lock() {
        for file in owned.iter() {
            let _ = fs::remove_file(file);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_lock_path_sits_next_to_config() {
        assert_eq!(
            lock_path(Path::new("/cfg/config.cfg")),
            PathBuf::from("/cfg/config.cfg.render.lock")
        );
    }

    #[test]
    #[serial(render_lock)]
    fn test_drop_frees_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.cfg");

        let lock = RenderLock::acquire(&config, Path::new("clip.mp4")).unwrap();
        assert!(lock_path(&config).exists());
        drop(lock);
        assert!(!lock_path(&config).exists());
        assert!(RenderLock::acquire(&config, Path::new("clip.mp4")).is_ok());
    }

    #[test]
    #[serial(render_lock)]
    fn test_second_render_is_refused() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.cfg");

        let _first = RenderLock::acquire(&config, Path::new("a.mp4")).unwrap();
        let second = RenderLock::acquire(&config, Path::new("b.mp4"));
        assert!(matches!(second, Err(Error::RenderInProgress { .. })));
    }

    #[test]
    #[serial(render_lock)]
    fn test_holder_names_render_input() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.cfg");

        let _lock = RenderLock::acquire(&config, Path::new("clip.mp4")).unwrap();
        let holder = RenderLock::holder(&config).unwrap();
        assert_eq!(holder.pid, std::process::id());
        assert_eq!(holder.input, PathBuf::from("clip.mp4"));
    }

    #[test]
    fn test_fresh_lock_is_not_cleared() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.cfg");
        File::create(lock_path(&config)).unwrap();

        assert!(!RenderLock::clear_stale(&config, Duration::from_secs(3600)).unwrap());
        assert!(lock_path(&config).exists());
    }

    #[test]
    fn test_missing_lock_is_not_cleared() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.cfg");
        assert!(!RenderLock::clear_stale(&config, Duration::ZERO).unwrap());
    }

    #[test]
    #[serial(render_lock)]
    fn test_release_all_removes_owned_locks() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.cfg");

        let lock = RenderLock::acquire(&config, Path::new("clip.mp4")).unwrap();
        release_all();
        assert!(!lock_path(&config).exists());
        drop(lock);
    }
}
