//! PulseCam CLI — Command-line interface for live monitoring and trace analysis.
//!
//! Usage:
//!   pulsecam run [OPTIONS]      Run a live monitoring session
//!   pulsecam analyze <PATH>     Replay a brightness trace through the estimator
//!   pulsecam check              Check configuration and capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "pulsecam",
    about = "Camera-based heart rate and stress monitoring",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live monitoring session against a synthetic pulse source
    Run {
        /// Target sampling rate (Hz)
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Simulated pulse rate (beats per minute)
        #[arg(long, default_value = "72")]
        bpm: u32,

        /// Record the brightness trace to this file
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Stop automatically after this many seconds (default: run
        /// until Ctrl+C)
        #[arg(long)]
        duration: Option<u64>,
    },

    /// Replay a recorded brightness trace through the estimator
    Analyze {
        /// Path to the trace file
        path: PathBuf,
    },

    /// Check configuration and capabilities
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    pulsecam_common::logging::init_logging(&pulsecam_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Run {
            fps,
            bpm,
            trace,
            duration,
        } => commands::run::run(fps, bpm, trace, duration).await,
        Commands::Analyze { path } => commands::analyze::run(path),
        Commands::Check => commands::check::run(),
    }
}
