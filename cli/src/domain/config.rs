//! Domain types for the `config.yaml` defaults file in the global config root.
//!
//! Pure functions only, with no I/O and no async.

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_SSH_CONFIG_FILE: &str = "~/.ssh/config";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `<global-config>/config.yaml`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    /// Defaults for `coder config-ssh`.
    pub ssh: SshDefaults,
}

/// Defaults applied when the matching flag is not given.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SshDefaults {
    /// SSH config file to manage. `~/` is expanded.
    pub config_file: Option<String>,
    /// Extra options injected into every host stanza.
    pub options: Vec<String>,
}

impl CliConfig {
    /// Resolve the SSH config path: flag (or its env var) wins, then the
    /// file, then `~/.ssh/config`.
    #[must_use]
    pub fn ssh_config_file<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.ssh.config_file.as_deref())
            .unwrap_or(DEFAULT_SSH_CONFIG_FILE)
    }

    /// Options given on the command line replace the file's list.
    #[must_use]
    pub fn ssh_options(&self, flags: &[String]) -> Vec<String> {
        if flags.is_empty() {
            self.ssh.options.clone()
        } else {
            flags.to_vec()
        }
    }
}

/// Expand a leading `~/` against `home`. Other paths are returned as-is.
#[must_use]
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
