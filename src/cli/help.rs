//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use std::path::Path;

/// Print help message based on whether the renderer config exists yet.
pub fn print_smart_help(config_path: &Path) {
    if config_path.exists() {
        print_configured_help(config_path);
    } else {
        print_first_time_help(config_path);
    }
}

/// Print setup guide for first-time users.
pub fn print_first_time_help(config_path: &Path) {
    println!("No renderer config found at {}.", config_path.display());
    println!();
    println!("1. Write a config with default settings:");
    println!("   blurcfg config init");
    println!();
    println!("2. Adjust settings:");
    println!("   blurcfg config keys");
    println!("   blurcfg config set blur-amount 1.5");
    println!();
    println!("3. Render a video:");
    println!("   blurcfg render clip.mp4 --output-dir ./renders");
    println!();
    println!("Run 'blurcfg -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help(config_path: &Path) {
    println!("Usage: blurcfg <COMMAND> [OPTIONS]");
    println!();
    println!("Editing: {}", config_path.display());
    println!();
    println!("Example: blurcfg render clip.mp4 -o ./renders");
    println!();
    println!("Run 'blurcfg -h' for all options or 'blurcfg config show' to see settings.");
}
