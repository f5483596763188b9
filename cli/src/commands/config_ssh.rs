//! `coder config-ssh [--remove]`: manage the generated SSH config block.

use anyhow::Result;
use clap::Args;

use crate::application::{ConfigStore as _, SshConfigStore as _};
use crate::application::services::config_ssh::{
    ConfigSshReport, ConfigSshSettings, RemoveOutcome, configure_ssh, remove_ssh,
};
use crate::domain::expand_home;
use crate::infra::{CoderdClient, ExecutableLocator, FileSshConfigStore, GlobalConfig};
use crate::output::{OutputContext, TerminalReporter};

/// Arguments for the config-ssh command.
#[derive(Args, Debug, Default)]
pub struct ConfigSshArgs {
    /// SSH config file to write (default: ~/.ssh/config)
    #[arg(long, env = "CODER_SSH_CONFIG_FILE", value_name = "PATH")]
    pub ssh_config_file: Option<String>,

    /// Extra option added to every host, e.g. -o "ForwardAgent yes"
    #[arg(short = 'o', long = "ssh-option", value_name = "OPTION")]
    pub ssh_options: Vec<String>,

    /// Write hosts without a ProxyCommand line
    #[arg(long, hide = true)]
    pub skip_proxy_command: bool,

    /// Remove the auto-generated block and exit
    #[arg(long, conflicts_with_all = ["ssh_options", "skip_proxy_command"])]
    pub remove: bool,
}

/// Run `coder config-ssh`.
///
/// # Errors
///
/// Returns an error if the user is not logged in, the deployment cannot be
/// queried, or the SSH config cannot be read or written.
pub async fn run(ctx: &OutputContext, global: &GlobalConfig, args: &ConfigSshArgs) -> Result<()> {
    let defaults = global.config_store().load()?;
    let path = expand_home(
        defaults.ssh_config_file(args.ssh_config_file.as_deref()),
        dirs::home_dir().as_deref(),
    );
    let store = FileSshConfigStore::new(path);

    if args.remove {
        let shown = store.path().display().to_string();
        match remove_ssh(&store).await? {
            RemoveOutcome::Removed => {
                ctx.success(&format!("Removed the auto-generated ssh config from {shown:?}"));
            }
            RemoveOutcome::NotPresent => {
                ctx.info(&format!("No auto-generated ssh config found in {shown:?}"));
            }
        }
        return Ok(());
    }

    let client = CoderdClient::new(global.url()?, global.session_token()?);
    let reporter = TerminalReporter::new(ctx);
    let settings = ConfigSshSettings {
        ssh_options: defaults.ssh_options(&args.ssh_options),
        skip_proxy_command: args.skip_proxy_command,
        config_root: global.root().display().to_string(),
    };

    let report = configure_ssh(&client, &store, &ExecutableLocator, &reporter, &settings).await?;
    print_report(ctx, &report);
    Ok(())
}

fn print_report(ctx: &OutputContext, report: &ConfigSshReport) {
    ctx.plain(&format!(
        "An auto-generated ssh config was written to {:?}",
        report.path.display().to_string()
    ));
    let Some(host) = &report.example_host else {
        ctx.warn("None of your workspaces has a running agent yet.");
        return;
    };
    ctx.plain("You should now be able to ssh into your workspace");
    ctx.plain("For example, try running");
    ctx.plain("");
    ctx.plain(&format!("\t{}", ctx.command(&format!("ssh {host}"))));
    ctx.plain("");
}
