//! Video metadata probing.
//!
//! The probe itself is an external tool reached through [`VideoProbe`];
//! this module only turns its answer into a display duration.

mod ffprobe;

pub use ffprobe::{FfprobeProbe, parse_ffprobe_output, parse_frame_rate};

use crate::constants::VIDEO_EXTENSIONS;
use crate::error::Result;
use std::path::Path;

/// Stream metadata needed to compute a duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    /// Frames per second.
    pub frame_rate: f64,
    /// Total number of frames.
    pub frame_count: u64,
}

impl ProbeResult {
    /// Duration in seconds, `None` when the frame rate is not positive.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration(&self) -> Option<f64> {
        (self.frame_rate > 0.0).then(|| self.frame_count as f64 / self.frame_rate)
    }
}

/// Source of video stream metadata.
pub trait VideoProbe {
    /// Read frame rate and frame count of the first video stream.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ProbeFailed`] if the file cannot be opened or read.
    fn probe(&self, path: &Path) -> Result<ProbeResult>;
}

/// Whether the path has one of the accepted video extensions.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|v| v.eq_ignore_ascii_case(ext))
        })
}

/// Format seconds as `1h 02m 03s`, `2m 05s` or `7s`.
///
/// Fractional seconds are truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m {secs:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs:02}s")
    } else {
        format!("{secs}s")
    }
}
