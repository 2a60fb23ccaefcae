//! External renderer invocation.

use super::output_path::compute_output_path;
use super::reveal::reveal;
use crate::constants::renderer::{FLAG_CONFIG, FLAG_INPUT, FLAG_NO_UI, FLAG_OUTPUT};
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Video to render.
    pub source: PathBuf,
    /// Output file, chosen so it does not overwrite anything.
    pub output: PathBuf,
    /// Renderer config file passed by path.
    pub config: PathBuf,
}

impl RenderJob {
    /// Create a job writing into `output_dir` under a free file name.
    pub fn new(source: &Path, output_dir: &Path, config: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            output: compute_output_path(source, output_dir),
            config: config.to_path_buf(),
        }
    }
}

/// Result of a successful render.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Rendered file.
    pub output: PathBuf,
    /// Wall time spent in the renderer.
    pub elapsed: Duration,
    /// Whether the file browser was launched.
    pub revealed: bool,
}

/// Runs the external renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    executable: PathBuf,
    reveal_output: bool,
    show_progress: bool,
}

impl Renderer {
    /// Create a renderer for the given executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            reveal_output: true,
            show_progress: false,
        }
    }

    /// Reveal finished renders in the file browser.
    #[must_use]
    pub fn with_reveal(mut self, reveal_output: bool) -> Self {
        self.reveal_output = reveal_output;
        self
    }

    /// Show a spinner while the renderer runs.
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Build the renderer command line for a job.
    pub fn command(&self, job: &RenderJob) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg(FLAG_NO_UI)
            .arg(FLAG_INPUT)
            .arg(&job.source)
            .arg(FLAG_CONFIG)
            .arg(&job.config)
            .arg(FLAG_OUTPUT)
            .arg(&job.output);
        cmd
    }

    /// Run the renderer and wait for it to finish.
    ///
    /// A failed reveal is logged and does not fail the render.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RendererSpawn`] if the executable cannot be started and
    /// [`Error::RenderFailed`] if it exits unsuccessfully.
    pub fn render(&self, job: &RenderJob) -> Result<RenderOutcome> {
        info!(
            "Rendering {} -> {}",
            job.source.display(),
            job.output.display()
        );
        debug!("Renderer command: {:?}", self.command(job));

        let start = Instant::now();
        let child = self
            .command(job)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::RendererSpawn {
                executable: self.executable.clone(),
                source: e,
            })?;

        let spinner = self.show_progress.then(|| render_spinner(&job.source));
        let output = child.wait_with_output();
        if let Some(pb) = &spinner {
            pb.finish_and_clear();
        }
        let output = output?;
        let elapsed = start.elapsed();

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            info!(target: "renderer", "{line}");
        }

        if !output.status.success() {
            return Err(Error::RenderFailed {
                code: output.status.code(),
                stderr,
            });
        }

        info!(
            "Render finished in {:.1}s: {}",
            elapsed.as_secs_f64(),
            job.output.display()
        );

        let revealed = self.reveal_output
            && match reveal(&job.output) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Could not open file browser for {}: {e}", job.output.display());
                    false
                }
            };

        Ok(RenderOutcome {
            output: job.output.clone(),
            elapsed,
            revealed,
        })
    }
}

fn render_spinner(source: &Path) -> ProgressBar {
    let name = source
        .file_name()
        .map_or_else(|| source.to_string_lossy(), |n| n.to_string_lossy());
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] rendering {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(name.into_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
