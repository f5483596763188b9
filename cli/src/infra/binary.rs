//! Locates the binary to embed in the generated `ProxyCommand`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::{BinaryLocator, LocatedBinary};

/// Finds the running executable and checks it against `PATH`.
///
/// The bare binary name is embedded so the config survives upgrades that
/// move the binary, except on Windows when the binary is not on `PATH`.
pub struct ExecutableLocator;

impl BinaryLocator for ExecutableLocator {
    fn locate(&self) -> Result<LocatedBinary> {
        let exe = std::env::current_exe().context("get executable path")?;
        let on_path = exe.file_name().and_then(|name| which::which(name).ok());
        debug!(exe = %exe.display(), on_path = ?on_path, "located binary");
        Ok(resolve(&exe, on_path.as_deref(), cfg!(windows)))
    }
}

/// Decide which path to embed given the running executable and where its
/// name resolves on `PATH`, if anywhere.
fn resolve(exe: &Path, on_path: Option<&Path>, windows: bool) -> LocatedBinary {
    let name = exe
        .file_name()
        .map_or_else(|| exe.display().to_string(), |n| n.to_string_lossy().into_owned());

    let Some(on_path) = on_path else {
        if windows {
            return LocatedBinary {
                path: exe.display().to_string(),
                warnings: vec![
                    "The current executable is not in $PATH.".to_string(),
                    "This may lead to problems connecting to your workspace via SSH.".to_string(),
                    format!(
                        "Please move {name:?} to a location in your $PATH (such as System32) and run `{name} config-ssh` again."
                    ),
                ],
            };
        }
        return LocatedBinary {
            path: name,
            warnings: Vec::new(),
        };
    };

    let mut warnings = Vec::new();
    if normalize(on_path) != normalize(exe) {
        warnings.push(
            "The current executable path does not match the executable path found in $PATH."
                .to_string(),
        );
        warnings.push("This may cause issues connecting to your workspace via SSH.".to_string());
        warnings.push(format!("\tCurrent executable path: {:?}", exe.display().to_string()));
        warnings.push(format!(
            "\tExecutable path in $PATH: {:?}",
            on_path.display().to_string()
        ));
    }
    LocatedBinary { path: name, warnings }
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.components().collect())
}
