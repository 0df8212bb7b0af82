mod cli;
mod commands;
mod dirs;
mod error;
mod logging;
mod settings;
mod time_utils;
mod ui;
mod vcs;

pub(crate) use error::{AppError, AppResult};

use clap::Parser;
use cli::GetVerbosity;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    logging::setup_logger(cli.cmd.get_verbosity());
    if let Err(e) = cli.cmd.run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}
