//! Blurcfg - settings editor and render launcher for the blur renderer.
//!
//! This crate edits the renderer's section-based config file and runs the
//! renderer against it without overwriting earlier renders.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod probe;
pub mod render;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, GlobalArgs, RenderArgs};
use config::{
    AppConfig, BlurSettings, ConfigStore, Setting, app_config_path, load_app_config,
    resolve_blur_config_path, save_app_config,
};
use probe::FfprobeProbe;
use render::{RenderLock, RenderSession, Renderer};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for blurcfg CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.verbose, cli.global.quiet);

    // Remove render locks on Ctrl+C so the next render is not refused
    if let Err(e) = ctrlc::set_handler(|| {
        render::release_all();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    let app_path = match &cli.global.app_config {
        Some(path) => path.clone(),
        None => app_config_path()?,
    };
    let app = load_app_config(&app_path)?;
    let blur_path = resolve_blur_config_path(
        cli.global.config.as_deref(),
        app.paths.blur_config.as_deref(),
    )?;

    let Some(command) = cli.command else {
        cli::help::print_smart_help(&blur_path);
        return Ok(());
    };

    let paths = Paths {
        app: app_path,
        blur: blur_path,
    };

    match command {
        Command::Config { action } => handle_config_command(action, &paths),
        Command::Probe { video } => handle_probe_command(&video, &app),
        Command::Render(args) => handle_render_command(&args, &cli.global, app, &paths),
    }
}

/// Resolved file locations for this run.
struct Paths {
    app: PathBuf,
    blur: PathBuf,
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Logs go to stderr so command output on stdout stays scriptable
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(action: ConfigAction, paths: &Paths) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let store = ConfigStore::init(&paths.blur, force)?;
            println!("Created configuration file: {}", store.path().display());
            Ok(())
        }
        ConfigAction::Show => {
            let store = ConfigStore::open(&paths.blur)?;
            if !paths.blur.exists() {
                println!("# {} does not exist yet, showing defaults", paths.blur.display());
            }
            print_settings(&store);
            Ok(())
        }
        ConfigAction::Path => {
            println!("config:      {}", paths.blur.display());
            println!("preferences: {}", paths.app.display());
            Ok(())
        }
        ConfigAction::Keys => {
            for setting in Setting::ALL {
                println!(
                    "{:<18} {:<34} default: {}",
                    setting.id(),
                    setting.to_string(),
                    setting.default_value()
                );
            }
            Ok(())
        }
        ConfigAction::Get { key } => {
            let setting = Setting::from_name(&key)?;
            let store = ConfigStore::open(&paths.blur)?;
            match store.get(setting.section(), setting.key()) {
                Some(value) => println!("{value}"),
                None => println!("{}", setting.default_value()),
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let setting = Setting::from_name(&key)?;
            let coerced = setting.coerce(&value)?;
            let mut store = ConfigStore::open(&paths.blur)?;
            store.set(setting.section(), setting.key(), &coerced)?;
            println!("{setting} = {coerced}");
            Ok(())
        }
        ConfigAction::Reset { key } => {
            let setting = Setting::from_name(&key)?;
            let mut store = ConfigStore::open(&paths.blur)?;
            if store.remove(setting.section(), setting.key())? {
                println!("{setting} reset to {}", setting.default_value());
            } else {
                println!("{setting} already at default ({})", setting.default_value());
            }
            Ok(())
        }
    }
}

/// Print known settings grouped by section, then anything else in the file.
fn print_settings(store: &ConfigStore) {
    let settings: BlurSettings = store.settings();
    let mut current_section = "";

    for setting in Setting::ALL {
        if setting.section() != current_section {
            if !current_section.is_empty() {
                println!();
            }
            current_section = setting.section();
            println!("[{current_section}]");
        }
        println!(
            "  {:<26} {}",
            setting.label(),
            settings.display_value(setting)
        );
    }

    let unknown: Vec<_> = store
        .config()
        .sections()
        .flat_map(|section| {
            section
                .entries()
                .filter(move |(key, _)| {
                    !Setting::ALL
                        .iter()
                        .any(|s| s.section() == section.name() && s.key() == *key)
                })
                .map(move |(key, value)| (section.name(), key, value))
        })
        .collect();

    if !unknown.is_empty() {
        println!();
        println!("[other entries]");
        for (section, key, value) in unknown {
            println!("  {section}.{key}: {value}");
        }
    }
}

fn handle_probe_command(video: &Path, app: &AppConfig) -> Result<()> {
    let probe = FfprobeProbe::new(&app.probe.ffprobe);
    let mut session = RenderSession::new();
    let selected = session.select_file(video, &probe)?;

    println!("{}", selected.label());
    println!(
        "  {:.3} fps, {} frames",
        selected.probe.frame_rate, selected.probe.frame_count
    );
    Ok(())
}

fn handle_render_command(
    args: &RenderArgs,
    global: &GlobalArgs,
    mut app: AppConfig,
    paths: &Paths,
) -> Result<()> {
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| app.paths.last_output_dir.clone())
        .ok_or(Error::NoOutputFolder)?;

    if let Some(max_age) = args.clear_stale_lock {
        RenderLock::clear_stale(&paths.blur, max_age)?;
    }

    let ffprobe = args.ffprobe.as_ref().unwrap_or(&app.probe.ffprobe);
    let mut session = RenderSession::new();
    let selected = session.select_file(&args.video, &FfprobeProbe::new(ffprobe))?;
    info!("{}", selected.label());
    session.choose_folder(&output_dir)?;

    // Remember the folder for the next render
    if app.paths.last_output_dir.as_ref() != Some(&output_dir) {
        app.paths.last_output_dir = Some(output_dir);
        if let Err(e) = save_app_config(&app, &paths.app) {
            warn!("Could not save preferences: {e}");
        }
    }

    if !paths.blur.exists() {
        info!(
            "No config at {}, writing defaults before rendering",
            paths.blur.display()
        );
        ConfigStore::init(&paths.blur, false)?;
    }

    let executable = args.renderer.as_ref().unwrap_or(&app.renderer.executable);
    let renderer = Renderer::new(executable)
        .with_reveal(app.renderer.reveal_output && !args.no_reveal)
        .with_progress(!global.quiet && !global.no_progress);

    let outcome = session.start(&renderer, &paths.blur)?;
    println!("{}", outcome.output.display());
    Ok(())
}
