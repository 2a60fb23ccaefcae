//! Non-colliding output file naming.

use crate::constants::output::{CLUTTER_WARNING_THRESHOLD, EXTENSION, SUFFIX};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Pick an output path in `output_dir` that does not exist yet.
///
/// The first candidate is `<source file name> - VectorBlur.mp4`; when taken,
/// ` (1)`, ` (2)`, ... is inserted before the extension until a free name is
/// found.
pub fn compute_output_path(source: &Path, output_dir: &Path) -> PathBuf {
    // Use to_string_lossy() to handle non-UTF-8 filenames gracefully
    let base = source.file_name().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );

    let mut candidate = output_dir.join(format!("{base}{SUFFIX}.{EXTENSION}"));
    let mut counter: u32 = 0;
    while candidate.exists() {
        counter += 1;
        if counter == CLUTTER_WARNING_THRESHOLD {
            warn!(
                "{counter} renders of '{base}' already exist in {}, consider cleaning up",
                output_dir.display()
            );
        }
        candidate = output_dir.join(format!("{base}{SUFFIX} ({counter}).{EXTENSION}"));
    }
    candidate
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_free_directory_uses_plain_name() {
        let dir = TempDir::new().unwrap();
        let path = compute_output_path(Path::new("/videos/clip.mp4"), dir.path());
        assert_eq!(path, dir.path().join("clip.mp4 - VectorBlur.mp4"));
    }

    #[test]
    fn test_existing_output_gets_counter() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("clip.mp4 - VectorBlur.mp4")).unwrap();

        let path = compute_output_path(Path::new("clip.mp4"), dir.path());
        assert_eq!(path, dir.path().join("clip.mp4 - VectorBlur (1).mp4"));
    }

    #[test]
    fn test_counter_skips_taken_numbers() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("name - VectorBlur.mp4")).unwrap();
        File::create(dir.path().join("name - VectorBlur (1).mp4")).unwrap();

        let path = compute_output_path(Path::new("name"), dir.path());
        assert_eq!(path, dir.path().join("name - VectorBlur (2).mp4"));
    }

    #[test]
    fn test_first_free_counter_is_chosen() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.mkv - VectorBlur.mp4")).unwrap();
        File::create(dir.path().join("a.mkv - VectorBlur (2).mp4")).unwrap();

        // (1) is free, so it is chosen even though (2) exists.
        let path = compute_output_path(Path::new("a.mkv"), dir.path());
        assert_eq!(path, dir.path().join("a.mkv - VectorBlur (1).mp4"));
    }
}
