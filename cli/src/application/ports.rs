//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `coder_sdk` and never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::Path;

use anyhow::Result;
use coder_sdk::{Workspace, WorkspaceResource};

use crate::domain::CliConfig;

// ── Workspace Resolver Port ───────────────────────────────────────────────────

/// Read-only view of the workspaces owned by the authenticated user.
#[allow(async_fn_in_trait)]
pub trait WorkspaceResolver {
    /// List the caller's workspaces.
    async fn workspaces(&self) -> Result<Vec<Workspace>>;

    /// Resources (and their agents) provisioned by the latest build of
    /// `workspace`, in provisioning order.
    async fn workspace_resources(&self, workspace: &Workspace) -> Result<Vec<WorkspaceResource>>;
}

// ── SSH Config Store Port ─────────────────────────────────────────────────────

/// The SSH client config file being managed.
#[allow(async_fn_in_trait)]
pub trait SshConfigStore {
    /// Destination path, for user-facing messages.
    fn path(&self) -> &Path;

    /// Current file content. A missing file reads as empty.
    async fn read(&self) -> Result<String>;

    /// Replace the file content in full, creating parent directories.
    ///
    /// Implementations must not leave a half-written file behind on failure.
    async fn write(&self, content: &str) -> Result<()>;
}

// ── Binary Locator Port ───────────────────────────────────────────────────────

/// The binary to embed in the generated `ProxyCommand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedBinary {
    pub path: String,
    /// Problems the user should know about (e.g. the binary is not on PATH).
    pub warnings: Vec<String>,
}

/// Finds the path `ssh` should use to invoke this binary.
pub trait BinaryLocator {
    /// # Errors
    ///
    /// Returns an error if the current executable cannot be determined.
    fn locate(&self) -> Result<LocatedBinary>;
}

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Abstracts loading the CLI defaults file.
pub trait ConfigStore {
    /// Load the configuration, returning defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<CliConfig>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
