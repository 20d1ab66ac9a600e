//! CLI module
//!
//! Command-line interface for browsing account history.
//!
//! # Commands
//!
//! - `shell` - Interactive pager over an account's history (default)
//! - `export` - Fetch pages and write them to a CSV file

mod commands;
mod runner;
mod shell;

pub use commands::{Cli, Commands};
pub use runner::{export_history, ExportSummary, Runner};
pub use shell::{parse_command, Shell, ShellCommand};
