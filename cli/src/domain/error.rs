//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

/// Errors raised while generating or splicing the coder SSH block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigSshError {
    #[error("You don't have any workspaces!")]
    NoWorkspaces,

    #[error(
        "Malformed coder block: end marker (byte {end}) comes before start marker (byte {start}). \
         Delete the block by hand and run 'coder config-ssh' again."
    )]
    MalformedBlock { start: usize, end: usize },

    #[error("Invalid SSH option {0:?}: options must be a single line and must not contain the coder block markers.")]
    InvalidOption(String),

    #[error("You are not logged in. Run 'coder login <url>' first (no session in {root}).")]
    NotLoggedIn { root: String },
}
