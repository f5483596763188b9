use serde::{Deserialize, Deserializer, Serialize};

/// Transition requested by a workspace build.
///
/// Only resources provisioned by a `start` build are reachable; `stop` and
/// `delete` resources are being torn down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceTransition {
    #[default]
    Start,
    Stop,
    Delete,
    /// Any transition this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl WorkspaceTransition {
    #[must_use]
    pub fn is_start(self) -> bool {
        self == Self::Start
    }
}

/// An organization the authenticated user belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// A build of a workspace. Only the latest build matters to SSH config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WorkspaceBuild {
    #[serde(default)]
    pub id: String,
    pub template_version_id: String,
    #[serde(default)]
    pub transition: WorkspaceTransition,
}

/// A workspace owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: String,
    pub latest_build: WorkspaceBuild,
}

/// An agent running inside a provisioned resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WorkspaceAgent {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// A resource provisioned by a workspace build, with its agents in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceResource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub transition: WorkspaceTransition,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub agents: Vec<WorkspaceAgent>,
}

/// coderd encodes an empty agent list as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
