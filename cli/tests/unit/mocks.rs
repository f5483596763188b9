//! Shared mock infrastructure for unit tests.
//!
//! Provides in-memory implementations of the application ports so each test
//! file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use coder_cli::application::ports::{
    BinaryLocator, LocatedBinary, ProgressReporter, SshConfigStore, WorkspaceResolver,
};
use coder_sdk::{
    Workspace, WorkspaceAgent, WorkspaceBuild, WorkspaceResource, WorkspaceTransition,
};

// ── Fixtures ──────────────────────────────────────────────────────────────────

pub fn workspace(name: &str) -> Workspace {
    Workspace {
        id: format!("ws-{name}"),
        name: name.to_string(),
        owner_id: "me".to_string(),
        latest_build: WorkspaceBuild {
            id: format!("build-{name}"),
            template_version_id: format!("tv-{name}"),
            transition: WorkspaceTransition::Start,
        },
    }
}

pub fn resource(transition: WorkspaceTransition, agents: &[&str]) -> WorkspaceResource {
    WorkspaceResource {
        id: "res".to_string(),
        name: "main".to_string(),
        transition,
        agents: agents
            .iter()
            .map(|name| WorkspaceAgent {
                id: format!("agent-{name}"),
                name: (*name).to_string(),
            })
            .collect(),
    }
}

/// A single started resource with one agent called `main`.
pub fn single_agent() -> Vec<WorkspaceResource> {
    vec![resource(WorkspaceTransition::Start, &["main"])]
}

// ── Mock: workspace resolver ──────────────────────────────────────────────────

/// How a canned workspace answers `workspace_resources`.
pub enum Canned {
    Ok(Vec<WorkspaceResource>),
    /// Answer after sleeping, to shuffle completion order.
    Delayed(Duration, Vec<WorkspaceResource>),
    Err(&'static str),
}

/// Resolver serving canned resources keyed by workspace name. Records the
/// name of every workspace whose fetch ran to completion.
pub struct CannedResolver {
    workspaces: Vec<Workspace>,
    resources: HashMap<String, Canned>,
    list_error: Option<&'static str>,
    completed: Mutex<Vec<String>>,
}

impl CannedResolver {
    pub fn new(entries: Vec<(&str, Canned)>) -> Self {
        let workspaces = entries.iter().map(|(name, _)| workspace(name)).collect();
        let resources = entries
            .into_iter()
            .map(|(name, canned)| (name.to_string(), canned))
            .collect();
        Self {
            workspaces,
            resources,
            list_error: None,
            completed: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_list(message: &'static str) -> Self {
        Self {
            list_error: Some(message),
            ..Self::new(Vec::new())
        }
    }

    pub fn workspaces_list(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().expect("lock").clone()
    }
}

impl WorkspaceResolver for CannedResolver {
    async fn workspaces(&self) -> Result<Vec<Workspace>> {
        if let Some(message) = self.list_error {
            anyhow::bail!(message);
        }
        Ok(self.workspaces.clone())
    }

    async fn workspace_resources(&self, workspace: &Workspace) -> Result<Vec<WorkspaceResource>> {
        let result = match self.resources.get(&workspace.name) {
            Some(Canned::Ok(resources)) => Ok(resources.clone()),
            Some(Canned::Delayed(delay, resources)) => {
                tokio::time::sleep(*delay).await;
                Ok(resources.clone())
            }
            Some(Canned::Err(message)) => Err(anyhow::anyhow!(*message)),
            None => Err(anyhow::anyhow!("unknown workspace {}", workspace.name)),
        };
        self.completed
            .lock()
            .expect("lock")
            .push(workspace.name.clone());
        result
    }
}

/// Resolver whose resource fetches all wait on one barrier sized to the
/// number of workspaces. Fetches that run one at a time never get past it.
pub struct BarrierResolver {
    workspaces: Vec<Workspace>,
    barrier: tokio::sync::Barrier,
}

impl BarrierResolver {
    pub fn new(names: &[&str]) -> Self {
        Self {
            workspaces: names.iter().map(|name| workspace(name)).collect(),
            barrier: tokio::sync::Barrier::new(names.len()),
        }
    }
}

impl WorkspaceResolver for BarrierResolver {
    async fn workspaces(&self) -> Result<Vec<Workspace>> {
        Ok(self.workspaces.clone())
    }

    async fn workspace_resources(&self, _: &Workspace) -> Result<Vec<WorkspaceResource>> {
        self.barrier.wait().await;
        Ok(single_agent())
    }
}

// ── Mock: SSH config store ────────────────────────────────────────────────────

/// In-memory SSH config. Counts writes so tests can assert nothing was
/// written on failure.
pub struct MemoryStore {
    path: PathBuf,
    content: Mutex<String>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn new(content: &str) -> Self {
        Self {
            path: PathBuf::from("/home/u/.ssh/config"),
            content: Mutex::new(content.to_string()),
            writes: Mutex::new(0),
        }
    }

    pub fn content(&self) -> String {
        self.content.lock().expect("lock").clone()
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().expect("lock")
    }
}

impl SshConfigStore for MemoryStore {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<String> {
        Ok(self.content())
    }

    async fn write(&self, content: &str) -> Result<()> {
        *self.content.lock().expect("lock") = content.to_string();
        *self.writes.lock().expect("lock") += 1;
        Ok(())
    }
}

// ── Mock: binary locator ──────────────────────────────────────────────────────

pub struct FixedLocator {
    pub path: &'static str,
    pub warnings: Vec<String>,
}

impl FixedLocator {
    pub fn at(path: &'static str) -> Self {
        Self {
            path,
            warnings: Vec::new(),
        }
    }
}

impl BinaryLocator for FixedLocator {
    fn locate(&self) -> Result<LocatedBinary> {
        Ok(LocatedBinary {
            path: self.path.to_string(),
            warnings: self.warnings.clone(),
        })
    }
}

/// Locator that must not be consulted.
pub struct UnusedLocator;

impl BinaryLocator for UnusedLocator {
    fn locate(&self) -> Result<LocatedBinary> {
        anyhow::bail!("binary lookup not expected in this test")
    }
}

// ── Mock: progress reporter ───────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    warnings: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("lock").clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().expect("lock").clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, _: &str) {}
    fn success(&self, message: &str) {
        self.successes.lock().expect("lock").push(message.to_string());
    }
    fn warn(&self, message: &str) {
        self.warnings.lock().expect("lock").push(message.to_string());
    }
}
