//! EduShare CLI library.
//!
//! Core functionality for the EduShare command-line client: configuration
//! and session persistence, command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod session_store;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session_store::SessionStore;
