use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use squash_cli::{Cli, Config, Settings, input, report};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support. Mech output stays silent
    // on stderr unless asked otherwise.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        let default = if cli.mech { "error" } else { "warn" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };
    // Use try_init to avoid panic if tracing is already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_cli(&cli);
    tracing::debug!(?config, "loaded configuration");

    let settings = Settings::resolve(&cli, &config)?;
    let timestamps = input::read_inputs(&cli.files)?;
    report::run(&settings, timestamps, &mut io::stdout().lock(), &mut io::stderr().lock())?;

    Ok(())
}
