mod cli;
mod commands;
mod ui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;
use getkit_lib::logging::initialize_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.global_args.verbose);

    tokio::select! {
        result = cli.run() => result,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            bail!("Interrupted");
        }
    }
}
