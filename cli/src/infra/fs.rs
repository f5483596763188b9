//! Filesystem infrastructure: implements `SshConfigStore`.
//!
//! Writes go to a temp file in the destination directory, are fsynced, and
//! are renamed over the destination so a crash never leaves a half-written
//! SSH config behind.

use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::SshConfigStore;

/// The SSH config file at a fixed path.
pub struct FileSshConfigStore {
    path: PathBuf,
}

impl FileSshConfigStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Synchronous read: a missing file reads as empty.
    fn read_sync(path: &Path) -> Result<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "ssh config does not exist yet");
                Ok(String::new())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Follow a symlinked config to the file it points at, so the rename
    /// replaces the target and the link survives. A dangling link resolves
    /// to its target path; a missing file resolves to itself.
    fn resolve_target(path: &Path) -> Result<PathBuf> {
        match std::fs::canonicalize(path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == ErrorKind::NotFound => match std::fs::read_link(path) {
                Ok(target) => Ok(path
                    .parent()
                    .map_or_else(|| target.clone(), |dir| dir.join(&target))),
                Err(_) => Ok(path.to_path_buf()),
            },
            Err(e) => Err(e).with_context(|| format!("resolving {}", path.display())),
        }
    }

    /// Synchronous atomic write: temp file, fsync, rename.
    fn write_sync(path: &Path, content: &str) -> Result<()> {
        let path = &Self::resolve_target(path)?;
        debug!(path = %path.display(), "writing ssh config");
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;

        let mut temp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("creating temp file in {}", parent.display()))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("writing temp file {}", temp.path().display()))?;
        temp.as_file()
            .sync_all()
            .with_context(|| format!("syncing temp file {}", temp.path().display()))?;

        // Keep the mode of an existing config; new files stay at the temp
        // file's 0600.
        if let Ok(meta) = std::fs::metadata(path) {
            std::fs::set_permissions(temp.path(), meta.permissions())
                .with_context(|| format!("copying permissions of {}", path.display()))?;
        }

        temp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

impl SshConfigStore for FileSshConfigStore {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<String> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_sync(&path))
            .await
            .context("ssh config read task panicked")?
    }

    async fn write(&self, content: &str) -> Result<()> {
        let path = self.path.clone();
        let content = content.to_string();
        tokio::task::spawn_blocking(move || Self::write_sync(&path, &content))
            .await
            .context("ssh config write task panicked")?
    }
}
