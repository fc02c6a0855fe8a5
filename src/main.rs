//! Arcade runner (default binary).
//!
//! Validates the command line, sets up file logging, then hands the terminal
//! to the orchestrator until the session ends.

mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use arcade::cli::{self, Cli, EXIT_RUNTIME, EXIT_USAGE};
use arcade::engine::{EngineConfig, Orchestrator};
use arcade::loader::DynamicLoader;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            eprint!("\n{}", cli::available_modules(&EngineConfig::from_env()));
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let config = cli.config();
    if let Err(e) = cli::validate_renderer(&cli.renderer, &config) {
        eprintln!("arcade: {e}");
        eprint!("\n{}", cli::available_modules(&config));
        return ExitCode::from(EXIT_USAGE);
    }

    // Keep the guard until exit so the log is flushed.
    let _log = match logging::init() {
        Ok((guard, file)) => {
            tracing::info!("logging to {}", file.display());
            Some(guard)
        }
        Err(e) => {
            eprintln!("arcade: logging disabled: {e:#}");
            None
        }
    };

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("arcade: {e:#}");
            ExitCode::from(EXIT_RUNTIME)
        }
    }
}

fn run(cli: Cli, config: EngineConfig) -> Result<()> {
    tracing::info!(
        renderer = %cli.renderer.display(),
        module_dir = %config.module_dir.display(),
        "starting arcade"
    );

    let mut orchestrator = Orchestrator::new(DynamicLoader, config);
    orchestrator
        .start(&cli.renderer, cli.game.as_deref())
        .context("cannot start session")?;
    orchestrator.run().context("session aborted")?;
    Ok(())
}
