//! Aviator command-line host
//!
//! # Commands
//!
//! - `aviator simulate` - Run rounds headless on a virtual clock
//! - `aviator auth` - Replay a JSON-lines script against the account service
//! - `aviator config` - Print or initialise the configuration file
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `info`).

mod auth;
mod config;
mod simulate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Aviator - crash-curve round engine host
#[derive(Parser)]
#[command(name = "aviator")]
#[command(about = "Headless host for the Aviator round engine")]
#[command(version)]
struct Cli {
    /// Config file to use instead of the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rounds headless and report each crash
    Simulate(simulate::SimulateArgs),

    /// Replay register/login requests from a JSON-lines script
    Auth(auth::AuthArgs),

    /// Print the effective configuration, or write the defaults
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Simulate(args) => simulate::execute(args, config_path),
        Commands::Auth(args) => auth::execute(args, config_path),
        Commands::Config(args) => config::execute(args, config_path),
    }
}
