//! `ffprobe`-backed video probe.

use super::{ProbeResult, VideoProbe};
use crate::constants::probe::FFPROBE;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
    nb_read_packets: Option<String>,
}

/// Probe that shells out to `ffprobe`.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    executable: PathBuf,
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new(FFPROBE)
    }
}

impl FfprobeProbe {
    /// Create a probe using the given `ffprobe` executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl VideoProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> Result<ProbeResult> {
        let failed = |reason: String| Error::ProbeFailed {
            path: path.to_path_buf(),
            reason,
        };

        let output = Command::new(&self.executable)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-count_packets",
                "-show_entries",
                "stream=avg_frame_rate,r_frame_rate,nb_frames,nb_read_packets",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .map_err(|e| failed(format!("could not run {}: {e}", self.executable.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("ffprobe output for {}: {}", path.display(), stdout.trim());
        parse_ffprobe_output(&stdout).map_err(failed)
    }
}

/// Parse `ffprobe -of json` stream output.
pub fn parse_ffprobe_output(json: &str) -> std::result::Result<ProbeResult, String> {
    let parsed: FfprobeOutput =
        serde_json::from_str(json).map_err(|e| format!("unreadable ffprobe output: {e}"))?;
    let stream = parsed
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| "no video stream".to_string())?;

    let frame_rate = [&stream.avg_frame_rate, &stream.r_frame_rate]
        .into_iter()
        .flatten()
        .filter_map(|r| parse_frame_rate(r))
        .find(|r| *r > 0.0)
        .ok_or_else(|| "frame rate unavailable".to_string())?;

    let frame_count = [&stream.nb_frames, &stream.nb_read_packets]
        .into_iter()
        .flatten()
        .find_map(|n| n.trim().parse::<u64>().ok())
        .ok_or_else(|| "frame count unavailable".to_string())?;

    Ok(ProbeResult {
        frame_rate,
        frame_count,
    })
}

/// Parse a frame rate written as `30000/1001` or `29.97`.
pub fn parse_frame_rate(value: &str) -> Option<f64> {
    let value = value.trim();
    let rate = match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => value.parse().ok()?,
    };
    rate.is_finite().then_some(rate)
}
