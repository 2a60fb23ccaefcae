//! Per-request render state machine.
//!
//! ```text
//! Idle -> FileSelected -> FolderChosen -> Invoking -> Succeeded | Failed
//! ```
//!
//! Selections survive a finished render, so a new request can reuse the
//! previous file or folder.

use super::invoker::{RenderJob, RenderOutcome, Renderer};
use super::lock::RenderLock;
use crate::error::{Error, Result};
use crate::probe::{ProbeResult, VideoProbe, format_duration, is_video_file};
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// Where a render request stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderState {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// A video has been accepted.
    FileSelected,
    /// An output folder has been chosen.
    FolderChosen,
    /// The renderer is running.
    Invoking,
    /// The last render succeeded.
    Succeeded,
    /// The last render failed.
    Failed,
}

/// A video accepted for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedVideo {
    /// Path to the video.
    pub path: PathBuf,
    /// Probe result.
    pub probe: ProbeResult,
    /// Duration in seconds.
    pub duration: f64,
}

impl SelectedVideo {
    /// `name  |  Duration: 1m 05s`
    pub fn label(&self) -> String {
        let name = self
            .path
            .file_name()
            .map_or_else(|| self.path.to_string_lossy(), |n| n.to_string_lossy());
        format!("{name}  |  Duration: {}", format_duration(self.duration))
    }
}

/// Selections and state of the current render request.
#[derive(Debug, Default)]
pub struct RenderSession {
    state: RenderState,
    video: Option<SelectedVideo>,
    output_dir: Option<PathBuf>,
}

impl RenderSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Selected video, if any.
    pub fn video(&self) -> Option<&SelectedVideo> {
        self.video.as_ref()
    }

    /// Chosen output folder, if any.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Accept a video for rendering.
    ///
    /// On error the session is left untouched.
    pub fn select_file(&mut self, path: &Path, probe: &dyn VideoProbe) -> Result<&SelectedVideo> {
        if !is_video_file(path) {
            warn!("Invalid file type selected: {}", path.display());
            return Err(Error::InvalidVideo {
                path: path.to_path_buf(),
                reason: "unsupported file type".to_string(),
            });
        }

        let probe_result = probe.probe(path).inspect_err(|e| {
            warn!("Failed to open video file: {e}");
        })?;
        let Some(duration) = probe_result.duration() else {
            warn!("Video reports no frame rate: {}", path.display());
            return Err(Error::InvalidVideo {
                path: path.to_path_buf(),
                reason: "frame rate unavailable".to_string(),
            });
        };

        self.state = RenderState::FileSelected;
        Ok(self.video.insert(SelectedVideo {
            path: path.to_path_buf(),
            probe: probe_result,
            duration,
        }))
    }

    /// Choose the folder renders are written to.
    pub fn choose_folder(&mut self, dir: &Path) -> Result<()> {
        if self.video.is_none() {
            return Err(Error::NoVideoSelected);
        }
        if !dir.is_dir() {
            return Err(Error::OutputDirNotFound {
                path: dir.to_path_buf(),
            });
        }
        self.output_dir = Some(dir.to_path_buf());
        self.state = RenderState::FolderChosen;
        Ok(())
    }

    /// Run the renderer for the current selections.
    ///
    /// Holds the render lock for `config_path` for the whole run, so a second
    /// render against the same config fails with [`Error::RenderInProgress`]
    /// instead of starting.
    pub fn start(&mut self, renderer: &Renderer, config_path: &Path) -> Result<RenderOutcome> {
        let video = self.video.as_ref().ok_or(Error::NoVideoSelected)?;
        let output_dir = self.output_dir.as_deref().ok_or(Error::NoOutputFolder)?;

        let _lock = RenderLock::acquire(config_path, &video.path)?;
        let job = RenderJob::new(&video.path, output_dir, config_path);

        self.state = RenderState::Invoking;
        let result = renderer.render(&job);
        self.state = match &result {
            Ok(_) => RenderState::Succeeded,
            Err(e) => {
                error!("Error during rendering: {e}");
                RenderState::Failed
            }
        };
        result
    }
}
