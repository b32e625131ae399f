//! Configuration commands

use anyhow::{Context, Result};
use cli_lib::config::{self, AppConfig};
use owo_colors::OwoColorize;
use std::path::Path;

/// Print the effective configuration
pub fn run_show(config: &AppConfig) -> Result<()> {
    println!("{}", "Effective Configuration".bold());
    println!();
    println!("{}", config::to_toml(config)?);

    println!("{}", "Valid Ranges:".bold());
    println!("  backend.request_timeout_ms: 100-600,000");
    println!("  ui.notice_auto_hide_ms: 500-60,000");
    println!("  ui.initial_preview_delay_ms: 0-10,000");
    println!("  ui.modal_preview_delay_ms: 0-10,000");
    Ok(())
}

/// Print the config file path
pub fn run_path(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config::config_file_path().context("Could not determine config file path")?,
    };

    println!("{}", path.display());
    if !path.exists() {
        println!("{}", "File does not exist; defaults are in effect.".yellow());
    }
    Ok(())
}
