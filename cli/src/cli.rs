//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::infra::GlobalConfig;
use crate::output::OutputContext;

/// Workspaces on your coder deployment, from your terminal
#[derive(Parser, Debug)]
#[command(
    name = "coder",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Directory holding the session written by `coder login`
    #[arg(long, global = true, env = "CODER_CONFIG_DIR", value_name = "DIR")]
    pub global_config: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (any non-empty NO_COLOR also disables it)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = non_empty
    )]
    pub no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// `NO_COLOR` disables color when set to anything but the empty string.
fn non_empty(value: &str) -> Result<bool, std::convert::Infallible> {
    Ok(!value.is_empty())
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Populate your SSH config with Host entries for all of your workspaces
    ConfigSsh(commands::ConfigSshArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            global_config,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        let global = GlobalConfig::resolve(global_config)?;
        let ctx = OutputContext::new(no_color, quiet);
        match command {
            Command::ConfigSsh(args) => commands::config_ssh::run(&ctx, &global, &args).await,
        }
    }
}
