//! Error types for blurcfg.

/// Result type alias for blurcfg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for blurcfg.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read a configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the application TOML config.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize the application TOML config.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Config file already exists and overwriting was not requested.
    #[error("config file already exists: {path} (use --force to overwrite)")]
    ConfigExists {
        /// Path to the existing file.
        path: std::path::PathBuf,
    },

    /// Setting name does not match any known setting.
    #[error("unknown setting '{name}' (run 'blurcfg config keys' for the list)")]
    UnknownSetting {
        /// Name as given by the user.
        name: String,
    },

    /// Value could not be coerced to the setting's type.
    #[error("invalid value '{value}' for '{setting}': {reason}")]
    InvalidSettingValue {
        /// Setting identifier.
        setting: String,
        /// Rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Selected file is not a usable video.
    #[error("invalid video file '{path}': {reason}")]
    InvalidVideo {
        /// Path to the video file.
        path: std::path::PathBuf,
        /// Why the file was rejected.
        reason: String,
    },

    /// Video probe could not read the file.
    #[error("failed to probe video '{path}': {reason}")]
    ProbeFailed {
        /// Path to the video file.
        path: std::path::PathBuf,
        /// Description of the probe failure.
        reason: String,
    },

    /// Render requested before a video was selected.
    #[error("no video file selected")]
    NoVideoSelected,

    /// Render requested before an output folder was chosen.
    #[error("no output folder selected")]
    NoOutputFolder,

    /// Output directory does not exist.
    #[error("output directory does not exist: {path}")]
    OutputDirNotFound {
        /// Path to the missing directory.
        path: std::path::PathBuf,
    },

    /// Another render holds the lock.
    #[error("a render is already in progress (lock file: {path})")]
    RenderInProgress {
        /// Path to the lock file.
        path: std::path::PathBuf,
    },

    /// Failed to create lock file.
    #[error("failed to create lock file '{path}'")]
    LockCreate {
        /// Path to the lock file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove lock file.
    #[error("failed to remove lock file '{path}'")]
    LockRemove {
        /// Path to the lock file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Renderer executable could not be started.
    #[error("failed to start renderer '{executable}'")]
    RendererSpawn {
        /// Executable that failed to start.
        executable: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Renderer exited unsuccessfully.
    #[error("renderer failed ({}){}", exit_description(*code), stderr_suffix(stderr))]
    RenderFailed {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error output.
        stderr: String,
    },
}

fn exit_description(code: Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit code {c}"),
    )
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_failed_message_includes_code_and_stderr() {
        let err = Error::RenderFailed {
            code: Some(1),
            stderr: "bad input\n".to_string(),
        };
        assert_eq!(err.to_string(), "renderer failed (exit code 1): bad input");
    }

    #[test]
    fn test_render_failed_message_signal_without_stderr() {
        let err = Error::RenderFailed {
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "renderer failed (terminated by signal)");
    }
}
