//! Driving the external renderer.
//!
//! A render request picks a free output name, holds the single-flight lock,
//! runs the renderer synchronously and reveals the result on success.

mod invoker;
pub mod lock;
mod output_path;
mod reveal;
mod session;

pub use invoker::{RenderJob, RenderOutcome, Renderer};
pub use lock::{LockHolder, RenderLock, lock_path, release_all};
pub use output_path::compute_output_path;
pub use reveal::{reveal, reveal_command};
pub use session::{RenderSession, RenderState, SelectedVideo};
