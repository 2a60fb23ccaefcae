//! Reveal a file in the platform file browser.

use std::path::Path;
use std::process::Command;

/// Build the command that shows `path` in the file browser.
///
/// Windows and macOS select the file itself; other platforms open the
/// containing folder.
pub fn reveal_command(path: &Path) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("explorer");
        cmd.arg("/select,").arg(path);
        cmd
    }
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg("-R").arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path.parent().unwrap_or_else(|| Path::new(".")));
        cmd
    }
}

/// Launch the file browser without waiting for it.
pub fn reveal(path: &Path) -> std::io::Result<()> {
    reveal_command(path).spawn().map(|_| ())
}
