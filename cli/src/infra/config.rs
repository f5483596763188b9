//! Global config root: session files and the `config.yaml` defaults file.
//!
//! The root holds `url` and `session` (written by `coder login`) and an
//! optional `config.yaml`. It defaults to `<config dir>/coderv2` and can be
//! overridden with `--global-config` or `CODER_CONFIG_DIR`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::{CliConfig, ConfigSshError};

const URL_FILE: &str = "url";
const SESSION_FILE: &str = "session";
const CONFIG_FILE: &str = "config.yaml";

/// The global config root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    root: PathBuf,
}

impl GlobalConfig {
    /// Use `flag` if given (clap already folds in `CODER_CONFIG_DIR`),
    /// otherwise the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no flag is given and the platform config directory
    /// cannot be determined.
    pub fn resolve(flag: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = flag {
            return Ok(Self::with_root(root));
        }
        let base = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config directory"))?;
        Ok(Self::with_root(base.join("coderv2")))
    }

    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deployment URL saved by `coder login`, without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigSshError::NotLoggedIn`] if the file is missing or empty.
    pub fn url(&self) -> Result<String> {
        Ok(self.read_session_file(URL_FILE)?.trim_end_matches('/').to_string())
    }

    /// Session token saved by `coder login`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigSshError::NotLoggedIn`] if the file is missing or empty.
    pub fn session_token(&self) -> Result<String> {
        self.read_session_file(SESSION_FILE)
    }

    /// Store for `config.yaml` in this root.
    #[must_use]
    pub fn config_store(&self) -> YamlConfigStore {
        YamlConfigStore::with_path(self.root.join(CONFIG_FILE))
    }

    fn read_session_file(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        let not_logged_in = || ConfigSshError::NotLoggedIn {
            root: self.root.display().to_string(),
        };
        if !path.exists() {
            return Err(not_logged_in().into());
        }
        let value = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(not_logged_in().into());
        }
        Ok(value.to_string())
    }
}

/// `ConfigStore` backed by a YAML file on disk.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<CliConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(CliConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))
    }
}
