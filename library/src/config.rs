//! Config command - show or initialise config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use aviator_core::config::{self, Config};

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration instead of printing
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long)]
    pub force: bool,
}

/// Load from `path` if given, otherwise from the platform config directory.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => config::load_from(path).with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(config::load()),
    }
}

/// Execute the config command
pub fn execute(args: ConfigArgs, path: Option<&Path>) -> Result<()> {
    if args.init {
        let written = init(path, args.force)?;
        println!("{}", written.display());
        return Ok(());
    }

    let config = load(path)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn init(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => config::config_path().context("Could not determine the config directory")?,
    };
    if target.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }

    config::save_to(&Config::default(), &target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!(path = %target.display(), "Wrote default config");
    Ok(target)
}
