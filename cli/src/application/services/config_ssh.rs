//! Application service: `coder config-ssh` use-cases.
//!
//! Fetches every workspace's resources concurrently, renders one stanza per
//! reachable agent, and splices the result into the managed block of the SSH
//! config. Each fetch returns its own text; the merge happens once, in
//! workspace-list order, after every fetch has finished.

use std::path::PathBuf;

use anyhow::{Context, Result};
use coder_sdk::Workspace;
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::application::ports::{
    BinaryLocator, ProgressReporter, SshConfigStore, WorkspaceResolver,
};
use crate::domain::{
    BlockState, ConfigSshError, HostAlias, ProxyCommand, SshConfigDocument, StanzaOptions,
    render_resource,
};

/// Settings for one `config-ssh` run, already resolved from flags,
/// environment and `config.yaml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigSshSettings {
    /// Extra lines injected verbatim into every stanza.
    pub ssh_options: Vec<String>,
    /// Omit the `ProxyCommand` line (for environments without the binary).
    pub skip_proxy_command: bool,
    /// Passed to `--global-config` inside the proxy command.
    pub config_root: String,
}

/// What a successful run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSshReport {
    pub path: PathBuf,
    /// First host written to the config, if any agent was reachable.
    pub example_host: Option<HostAlias>,
}

/// Stanzas for a set of workspaces and the hosts they define, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedHosts {
    pub stanzas: String,
    pub hosts: Vec<HostAlias>,
}

/// Result of `remove_ssh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
}

/// Render the stanzas and host aliases for all `workspaces`.
///
/// One fetch per workspace runs concurrently; all of them run to completion.
/// The first failure in list order fails the whole call and no text is
/// returned.
///
/// # Errors
///
/// Returns [`ConfigSshError::NoWorkspaces`] if `workspaces` is empty, or the
/// first resolver error.
pub async fn render_workspaces(
    resolver: &impl WorkspaceResolver,
    workspaces: &[Workspace],
    options: &StanzaOptions,
) -> Result<RenderedHosts> {
    if workspaces.is_empty() {
        return Err(ConfigSshError::NoWorkspaces.into());
    }

    let rendered = join_all(
        workspaces
            .iter()
            .map(|workspace| render_workspace(resolver, workspace, options)),
    )
    .await;

    let mut merged = RenderedHosts::default();
    for workspace in rendered {
        let workspace = workspace?;
        merged.stanzas.push_str(&workspace.stanzas);
        merged.hosts.extend(workspace.hosts);
    }
    Ok(merged)
}

async fn render_workspace(
    resolver: &impl WorkspaceResolver,
    workspace: &Workspace,
    options: &StanzaOptions,
) -> Result<RenderedHosts> {
    debug!(workspace = %workspace.name, "fetching resources");
    let resources = resolver
        .workspace_resources(workspace)
        .await
        .with_context(|| format!("fetching resources for workspace {}", workspace.name))?;

    let mut rendered = RenderedHosts::default();
    for resource in resources.iter().filter(|r| r.transition.is_start()) {
        rendered
            .stanzas
            .push_str(&render_resource(&workspace.name, resource, options));
        rendered
            .hosts
            .extend(HostAlias::for_resource(&workspace.name, resource));
    }
    debug!(
        workspace = %workspace.name,
        resources = resources.len(),
        hosts = rendered.hosts.len(),
        "rendered workspace"
    );
    Ok(rendered)
}

/// Regenerate the managed block from the caller's workspaces and write it.
///
/// Nothing is written unless every step succeeds.
///
/// # Errors
///
/// Returns an error if the existing file has out-of-order markers, an SSH
/// option is invalid, the caller has no workspaces, any fetch fails, or the
/// file cannot be written.
pub async fn configure_ssh(
    resolver: &impl WorkspaceResolver,
    store: &impl SshConfigStore,
    locator: &impl BinaryLocator,
    reporter: &impl ProgressReporter,
    settings: &ConfigSshSettings,
) -> Result<ConfigSshReport> {
    let options = StanzaOptions::new(settings.ssh_options.clone(), None)?;
    let mut document = load_document(store).await?;

    reporter.step("Fetching workspaces...");
    let workspaces = resolver.workspaces().await.context("listing workspaces")?;
    if workspaces.is_empty() {
        return Err(ConfigSshError::NoWorkspaces.into());
    }

    let options = if settings.skip_proxy_command {
        options
    } else {
        let binary = locator.locate()?;
        for warning in &binary.warnings {
            reporter.warn(warning);
        }
        options.with_proxy(Some(ProxyCommand::new(
            binary.path,
            settings.config_root.clone(),
        )))
    };

    let rendered = render_workspaces(resolver, &workspaces, &options).await?;

    document.replace_managed(&rendered.stanzas);
    store.write(&document.render()).await?;
    info!(
        path = %store.path().display(),
        workspaces = workspaces.len(),
        hosts = rendered.hosts.len(),
        "wrote ssh config"
    );
    reporter.success(&format!(
        "Configured {} hosts across {} workspaces",
        rendered.hosts.len(),
        workspaces.len()
    ));

    Ok(ConfigSshReport {
        path: store.path().to_path_buf(),
        example_host: rendered.hosts.into_iter().next(),
    })
}

/// Delete the managed block, leaving everything else in place.
///
/// # Errors
///
/// Returns an error if the markers are out of order or the file cannot be
/// read or written.
pub async fn remove_ssh(store: &impl SshConfigStore) -> Result<RemoveOutcome> {
    let mut document = load_document(store).await?;
    if !document.remove_managed() {
        return Ok(RemoveOutcome::NotPresent);
    }
    store.write(&document.render()).await?;
    info!(path = %store.path().display(), "removed coder block");
    Ok(RemoveOutcome::Removed)
}

async fn load_document(store: &impl SshConfigStore) -> Result<SshConfigDocument> {
    let path = store.path().display().to_string();
    let text = store.read().await?;
    let document =
        SshConfigDocument::parse(&text).with_context(|| format!("parsing {path}"))?;
    match document.state() {
        BlockState::Present => debug!(
            %path,
            bytes = document.managed_block().map_or(0, str::len),
            "found existing coder block"
        ),
        BlockState::Absent => debug!(%path, "no coder block yet"),
        BlockState::Orphaned(marker) => {
            warn!(%path, ?marker, "only one coder marker found; appending a new block");
        }
    }
    Ok(document)
}
