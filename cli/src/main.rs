//! Coder CLI - SSH access to your coder workspaces

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use coder_cli::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Checked before `RUST_LOG`.
const LOG_ENV: &str = "CODER_LOG";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
