//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "blurcfg";

/// File name of the tool's own TOML preferences.
pub const APP_CONFIG_FILE_NAME: &str = "config.toml";

/// File name of the renderer configuration managed by this tool.
pub const BLUR_CONFIG_FILE_NAME: &str = "config.cfg";

/// Lock file suffix appended to the blur config path while a render runs.
pub const RENDER_LOCK_SUFFIX: &str = ".render.lock";

/// Video file extensions accepted as render input (lowercase, no dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv"];

/// Output naming.
pub mod output {
    /// Marker inserted between the source file name and the counter.
    pub const SUFFIX: &str = " - VectorBlur";

    /// Container extension of rendered files.
    pub const EXTENSION: &str = "mp4";

    /// Collision chains longer than this are reported as directory clutter.
    pub const CLUTTER_WARNING_THRESHOLD: u32 = 100;
}

/// External renderer invocation.
pub mod renderer {
    /// Default renderer executable on Windows.
    #[cfg(windows)]
    pub const DEFAULT_EXECUTABLE: &str = r"C:\Program Files (x86)\blur\blur.exe";

    /// Default renderer executable elsewhere, resolved through `PATH`.
    #[cfg(not(windows))]
    pub const DEFAULT_EXECUTABLE: &str = "blur";

    /// Disable the renderer's own window.
    pub const FLAG_NO_UI: &str = "--noui";

    /// Input video flag.
    pub const FLAG_INPUT: &str = "-i";

    /// Config file flag.
    pub const FLAG_CONFIG: &str = "-c";

    /// Output path flag.
    pub const FLAG_OUTPUT: &str = "-o";
}

/// Video probe tool.
pub mod probe {
    /// Executable used to read stream metadata.
    pub const FFPROBE: &str = "ffprobe";
}

/// Defaults and bounds of the known renderer settings.
pub mod settings {
    /// Default for `blur.blur`.
    pub const BLUR: bool = true;

    /// Default for `blur.blur amount`.
    pub const BLUR_AMOUNT: f64 = 1.0;

    /// Upper bound of `blur.blur amount`.
    pub const BLUR_AMOUNT_MAX: f64 = 5.0;

    /// Default for `interpolation.interpolate`.
    pub const INTERPOLATE: bool = true;

    /// Default for `interpolation.interpolated fps`.
    pub const INTERPOLATED_FPS: i64 = 60;

    /// Bounds of `interpolation.interpolated fps`.
    pub const INTERPOLATED_FPS_RANGE: (i64, i64) = (1, 999);

    /// Default for `rendering.quality` (CRF, 0 is highest).
    pub const QUALITY: i64 = 23;

    /// Bounds of `rendering.quality`.
    pub const QUALITY_RANGE: (i64, i64) = (0, 51);

    /// Default for `rendering.deduplicate`.
    pub const DEDUPLICATE: bool = false;

    /// Default for `rendering.preview`.
    pub const PREVIEW: bool = false;
}
