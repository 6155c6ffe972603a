//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use super::shell::Shell;
use crate::logging::{init_logging, Verbosity};
use crate::storage::{Config, ConfigError, VehicleStore};

#[derive(Parser)]
#[command(name = "transport")]
#[command(author, version, about = "Local-first vehicle record manager")]
pub struct Cli {
    /// Data file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Configuration file (defaults to ./transport.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Resolves configuration: flags override the file, the file overrides defaults
    ///
    /// Only a file named with `--config` must load. A bad `./transport.toml`
    /// gives defaults, and its error is returned for the caller to log.
    pub fn resolve_config(&self) -> Result<(Config, Option<ConfigError>)> {
        let (mut config, ignored) = match &self.config {
            Some(path) => (Config::from_file(path)?, None),
            None => Config::load(),
        };

        if let Some(data_file) = &self.data_file {
            config.data_file = data_file.clone();
        }

        Ok((config, ignored))
    }

    fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let (config, ignored) = cli.resolve_config().context("Failed to load configuration")?;

    init_logging(&cli.verbosity().filter(&config.log_level));
    if let Some(error) = &ignored {
        warn!(%error, "ignoring configuration file, using defaults");
    }
    info!(data_file = %config.data_file.display(), "starting transport shell");

    let stdin = io::stdin();
    let stdout = io::stdout();

    let (store, init_error, report) = match VehicleStore::initialize(&config.data_file) {
        Ok((store, report)) => (store, None, report),
        Err(e) => {
            // Keep going with whatever can be read; saves will report their own failures
            let mut store = VehicleStore::new(&config.data_file);
            let report = store.load();
            (store, Some(e), report)
        }
    };

    let mut shell = Shell::new(store, stdin.lock(), stdout.lock());
    if let Some(error) = &init_error {
        shell.report_init_error(error)?;
    }
    shell.report_load(&report)?;
    shell.run().context("Failed to write to the terminal")?;

    info!("transport shell finished");
    Ok(())
}
