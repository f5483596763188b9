//! coderd HTTP client: implements `WorkspaceResolver`.
//!
//! Uses blocking `ureq` calls moved onto the blocking pool with
//! `tokio::task::spawn_blocking`, one call per request.

use std::time::Duration;

use anyhow::{Context, Result};
use coder_sdk::{Organization, Workspace, WorkspaceResource};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::ports::WorkspaceResolver;

const SESSION_HEADER: &str = "Coder-Session-Token";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated client for a coder deployment.
#[derive(Clone)]
pub struct CoderdClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl CoderdClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .user_agent(concat!("coder-cli/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// The first organization the user belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the user has no organization.
    pub async fn current_organization(&self) -> Result<Organization> {
        let orgs: Vec<Organization> = self.get("/api/v2/users/me/organizations").await?;
        orgs.into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("You aren't a member of any organizations."))
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        let url = format!("{}{path}", self.base_url);
        tokio::task::spawn_blocking(move || client.get_blocking(&url))
            .await
            .context("coderd request task panicked")?
    }

    fn get_blocking<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let response = match self.agent.get(url).set(SESSION_HEADER, &self.token).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                let message = resp
                    .into_string()
                    .ok()
                    .and_then(|body| api_message(&body))
                    .unwrap_or_default();
                anyhow::bail!("GET {url}: HTTP {code}{message}");
            }
            Err(e) => return Err(e).with_context(|| format!("GET {url}")),
        };
        let body = response
            .into_string()
            .with_context(|| format!("reading response from {url}"))?;
        serde_json::from_str(&body).with_context(|| format!("parsing response from {url}"))
    }
}

/// Extract `": message"` from a coderd error body, if it has one.
fn api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?;
    Some(format!(": {message}"))
}

impl WorkspaceResolver for CoderdClient {
    async fn workspaces(&self) -> Result<Vec<Workspace>> {
        let org = self.current_organization().await?;
        self.get(&format!("/api/v2/organizations/{}/workspaces/me", org.id))
            .await
    }

    async fn workspace_resources(&self, workspace: &Workspace) -> Result<Vec<WorkspaceResource>> {
        self.get(&format!(
            "/api/v2/templateversions/{}/resources",
            workspace.latest_build.template_version_id
        ))
        .await
    }
}
