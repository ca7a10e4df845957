use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use getkit_lib::config::Config;
use std::path::PathBuf;

use crate::commands::{get::GetCommand, list::ListCommand};
use crate::ui;

pub const BANNER: &str = concat!(
    "GetKit Package Manager v",
    env!("CARGO_PKG_VERSION"),
    " - SQC Tech"
);

#[derive(Parser)]
#[command(name = "getkit")]
#[command(about = "Download software listed in per-OS catalogs from GitHub releases or direct links")]
#[command(disable_version_flag = true, arg_required_else_help = true)]
pub struct Cli {
    /// Print the version banner
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args, Clone)]
pub struct GlobalArgs {
    /// Root of the catalog tree, laid out as <dir>/<os>/<category>.json
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Directory downloads are written to (defaults to ~/Downloads; it must already exist)
    #[arg(long, global = true)]
    pub download_dir: Option<PathBuf>,

    /// Seconds a request may wait to connect or sit idle without receiving data
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Send the token stored in this environment variable to the GitHub API
    #[arg(long, global = true, value_name = "VAR")]
    pub token_env: Option<String>,

    /// Show debug output
    #[arg(long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn config(&self) -> Result<Config> {
        Ok(Config::setup(
            self.catalog_dir.as_deref(),
            self.download_dir.as_deref(),
            self.timeout,
            self.token_env.as_deref(),
        )?)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a program from a catalog, e.g. `getkit get -win -dev git`
    Get(GetCommand),

    /// List the programs in a catalog
    #[command(alias = "ls")]
    List(ListCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if self.version {
            ui::info(BANNER);
            return Ok(());
        }

        match self.command {
            Some(Commands::Get(cmd)) => cmd.run(self.global_args).await,
            Some(Commands::List(cmd)) => cmd.run(self.global_args),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}
