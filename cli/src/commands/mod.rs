//! Command implementations

pub mod config_ssh;

pub use config_ssh::ConfigSshArgs;
