mod cli;
mod error;
mod logging;
mod output;
mod seed;
mod shell;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use sss_core::{StockManager, SystemClock};
use tracing::info;

use crate::cli::Cli;
use crate::error::CliError;
use crate::shell::Shell;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let configs = seed::load(cli.stocks.as_deref(), cli.decay_seconds)?;
    let manager = StockManager::from_configs(configs)?;
    info!(stocks = manager.len(), "loaded stock list");

    let mut shell = Shell::new(manager, SystemClock, cli.format);
    shell.run(io::stdin().lock(), io::stdout().lock())
}
