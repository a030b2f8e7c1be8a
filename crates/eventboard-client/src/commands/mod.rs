//! Subcommand and default-command implementations.

pub mod config;
pub mod events;
