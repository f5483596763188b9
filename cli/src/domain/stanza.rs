//! `Host` stanza rendering for workspace agents.
//!
//! Pure functions only, with no I/O and no async.

use std::fmt;

use coder_sdk::WorkspaceResource;

use crate::domain::error::ConfigSshError;
use crate::domain::ssh_config::contains_marker;

pub const HOST_PREFIX: &str = "coder.";

/// Options fixed in every stanza. Agents are re-provisioned with fresh host
/// keys on every rebuild, so known_hosts pinning is disabled and the warnings
/// that causes are silenced.
const FIXED_OPTIONS: &[&str] = &[
    "ConnectTimeout=0",
    "StrictHostKeyChecking=no",
    "UserKnownHostsFile=/dev/null",
    "LogLevel ERROR",
];

// ── Host alias ───────────────────────────────────────────────────────────────

/// The part of a host name after `coder.`: the workspace name, or
/// `<workspace>.<agent>` when a resource exposes several agents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostAlias(String);

impl HostAlias {
    #[must_use]
    pub fn for_workspace(workspace: &str) -> Self {
        Self(workspace.to_string())
    }

    #[must_use]
    pub fn for_agent(workspace: &str, agent: &str) -> Self {
        Self(format!("{workspace}.{agent}"))
    }

    /// Aliases for every agent of `resource`, in agent order.
    #[must_use]
    pub fn for_resource(workspace: &str, resource: &WorkspaceResource) -> Vec<Self> {
        match resource.agents.as_slice() {
            [_] => vec![Self::for_workspace(workspace)],
            agents => agents
                .iter()
                .map(|agent| Self::for_agent(workspace, &agent.name))
                .collect(),
        }
    }

    /// The suffix passed to `coder ssh --stdio`.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn host(&self) -> String {
        format!("{HOST_PREFIX}{}", self.0)
    }
}

impl fmt::Display for HostAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HOST_PREFIX}{}", self.0)
    }
}

// ── Proxy command ────────────────────────────────────────────────────────────

/// Tunnels the SSH byte stream through `coder ssh --stdio` instead of TCP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyCommand {
    binary: String,
    config_root: String,
}

impl ProxyCommand {
    #[must_use]
    pub fn new(binary: impl Into<String>, config_root: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            config_root: config_root.into(),
        }
    }

    #[must_use]
    pub fn render(&self, alias: &HostAlias) -> String {
        format!(
            "ProxyCommand {:?} --global-config {:?} ssh --stdio {}",
            self.binary,
            self.config_root,
            alias.suffix()
        )
    }
}

// ── Stanza options ───────────────────────────────────────────────────────────

/// Per-run settings shared by every stanza.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StanzaOptions {
    extra: Vec<String>,
    proxy: Option<ProxyCommand>,
}

impl StanzaOptions {
    /// # Errors
    ///
    /// Returns [`ConfigSshError::InvalidOption`] if an extra option spans
    /// several lines or contains a block marker.
    pub fn new(extra: Vec<String>, proxy: Option<ProxyCommand>) -> Result<Self, ConfigSshError> {
        if let Some(bad) = extra
            .iter()
            .find(|opt| opt.contains(['\n', '\r']) || contains_marker(opt))
        {
            return Err(ConfigSshError::InvalidOption(bad.clone()));
        }
        Ok(Self { extra, proxy })
    }

    /// Replace the proxy command.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxyCommand>) -> Self {
        self.proxy = proxy;
        self
    }
}

// ── Rendering ────────────────────────────────────────────────────────────────

/// Render a single `Host` stanza, one line per option, newline-terminated.
#[must_use]
pub fn render_stanza(alias: &HostAlias, options: &StanzaOptions) -> String {
    let host = alias.host();
    let mut lines = Vec::with_capacity(options.extra.len() + FIXED_OPTIONS.len() + 3);
    lines.push(format!("Host {host}"));
    lines.extend(options.extra.iter().map(|opt| format!("\t{opt}")));
    lines.push(format!("\tHostName {host}"));
    lines.extend(FIXED_OPTIONS.iter().map(|opt| format!("\t{opt}")));
    if let Some(proxy) = &options.proxy {
        lines.push(format!("\t{}", proxy.render(alias)));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render one stanza per agent of `resource`. Resources that are not being
/// started are unreachable and render nothing.
#[must_use]
pub fn render_resource(workspace: &str, resource: &WorkspaceResource, options: &StanzaOptions) -> String {
    if !resource.transition.is_start() {
        return String::new();
    }
    HostAlias::for_resource(workspace, resource)
        .iter()
        .map(|alias| render_stanza(alias, options))
        .collect()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
