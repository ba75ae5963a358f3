//! theremin - Terminal frequency picker
//!
//! Run with: cargo run -- [--config theremin.ron] [--log-file theremin.log]

mod app;
mod ui;

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use theremin_dsp::ThereminConfig;
use tracing_subscriber::EnvFilter;

use app::Theremin;

/// Play a log-scaled frequency picker with the mouse.
#[derive(Debug, Parser)]
#[command(name = "theremin", version)]
struct Args {
    /// RON config file; missing fields fall back to defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective config as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // The TUI owns the terminal, so logs only go to a file.
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = match &args.config {
        Some(path) => ThereminConfig::load(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => ThereminConfig::default(),
    };

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    Theremin::new(config).run()
}

fn init_logging(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
