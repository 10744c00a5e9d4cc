//! Quill API client - command line entry point.
//!
//! Parses arguments, installs logging and dispatches to the command
//! implementations.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = commands::run(args).await {
        tracing::error!(error = %err, "command failed");
        return Err(err);
    }
    Ok(())
}
