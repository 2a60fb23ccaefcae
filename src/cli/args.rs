//! CLI argument definitions.

use super::validators::parse_duration;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Edit settings for the blur renderer and launch renders.
#[derive(Debug, Parser)]
#[command(name = "blurcfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Renderer config file to edit (default: remembered or platform path).
    #[arg(long, global = true, env = "BLURCFG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Preferences file of this tool.
    #[arg(long, global = true, env = "BLURCFG_APP_CONFIG")]
    pub app_config: Option<PathBuf>,

    /// Only print warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the render spinner.
    #[arg(long, global = true)]
    pub no_progress: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read and change renderer settings.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show the duration of a video.
    Probe {
        /// Video file to inspect.
        video: PathBuf,
    },
    /// Render a video with the current settings.
    Render(RenderArgs),
}

/// Config subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write a config file with every setting at its default.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Display all settings with defaults filled in.
    Show,
    /// Print configuration file paths.
    Path,
    /// List known settings.
    Keys,
    /// Print one setting.
    Get {
        /// Setting id (`blur-amount`) or path (`blur.blur amount`).
        key: String,
    },
    /// Change one setting.
    Set {
        /// Setting id (`blur-amount`) or path (`blur.blur amount`).
        key: String,
        /// New value.
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Remove a setting so it reads its default.
    Reset {
        /// Setting id (`blur-amount`) or path (`blur.blur amount`).
        key: String,
    },
}

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Video file to render (.mp4, .avi, .mov, .mkv, .wmv).
    pub video: PathBuf,

    /// Folder to write the render into (default: previous folder).
    #[arg(short, long, env = "BLURCFG_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Renderer executable (overrides preferences).
    #[arg(long, env = "BLURCFG_RENDERER")]
    pub renderer: Option<PathBuf>,

    /// `ffprobe` executable (overrides preferences).
    #[arg(long, env = "BLURCFG_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Do not open the file browser after a successful render.
    #[arg(long)]
    pub no_reveal: bool,

    /// Remove a render lock older than this duration (e.g., 1h, 30m).
    #[arg(long, value_parser = parse_duration)]
    pub clear_stale_lock: Option<Duration>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::try_parse_from(["blurcfg"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.global.quiet);
    }

    #[test]
    fn test_cli_parse_config_set_with_spaces() {
        let cli =
            Cli::try_parse_from(["blurcfg", "config", "set", "blur.blur amount", "2.5"]).unwrap();
        match cli.command {
            Some(Command::Config {
                action: ConfigAction::Set { key, value },
            }) => {
                assert_eq!(key, "blur.blur amount");
                assert_eq!(value, "2.5");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_config_set_negative_value() {
        let cli = Cli::try_parse_from(["blurcfg", "config", "set", "blur-amount", "-1"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_render_options() {
        let cli = Cli::try_parse_from([
            "blurcfg",
            "render",
            "clip.mp4",
            "-o",
            "/renders",
            "--no-reveal",
            "--clear-stale-lock",
            "30m",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.global.verbose, 1);
        match cli.command {
            Some(Command::Render(args)) => {
                assert_eq!(args.video, PathBuf::from("clip.mp4"));
                assert_eq!(args.output_dir, Some(PathBuf::from("/renders")));
                assert!(args.no_reveal);
                assert_eq!(args.clear_stale_lock, Some(Duration::from_secs(1800)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["blurcfg", "config", "show", "--config", "my.cfg"]).unwrap();
        assert_eq!(cli.global.config, Some(PathBuf::from("my.cfg")));
    }

    #[test]
    fn test_cli_render_requires_video() {
        assert!(Cli::try_parse_from(["blurcfg", "render"]).is_err());
    }
}
