//! Scrivener CLI library.
//!
//! This library provides the core functionality for the Scrivener
//! command-line interface: configuration management, command execution,
//! the interactive chat REPL, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::CliConfig;
pub use engine::{build_agent, CliAgent, CliEmbedder};
pub use error::{CliError, Result};
pub use output::Formatter;
