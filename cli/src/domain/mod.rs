//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod ssh_config;
pub mod stanza;

pub use config::{CliConfig, SshDefaults, expand_home};
pub use error::ConfigSshError;
pub use ssh_config::{BlockState, Marker, SshConfigDocument, excise_managed_block};
pub use stanza::{HostAlias, ProxyCommand, StanzaOptions, render_resource, render_stanza};
