//! Command-line front end for RI generation.
//!
//! Provides commands for:
//! - Generating an RI matrix from node, replica and tag settings
//! - Listing the available generators

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
