//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the coderd HTTP client,
//! SSH config file access, session/config files, and binary lookup.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod binary;
pub mod coderd;
pub mod config;
pub mod fs;

pub use binary::ExecutableLocator;
pub use coderd::CoderdClient;
pub use config::{GlobalConfig, YamlConfigStore};
pub use fs::FileSshConfigStore;
