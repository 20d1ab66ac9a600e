//! CLI commands and argument parsing

use crate::config::Overrides;
use crate::types::PageSize;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse XRP Ledger account history and export it to CSV
#[derive(Parser, Debug)]
#[command(name = "xrpl-history")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint of the ledger
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Transactions per page (10, 50, 100, 150 or 200)
    #[arg(short, long, global = true)]
    pub page_size: Option<PageSize>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings overrides given on the command line
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            page_size: self.page_size,
            timeout_secs: self.timeout,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse history interactively (default)
    Shell {
        /// Search this account right away
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Fetch history pages and write them to a CSV file
    Export {
        /// Account address
        #[arg(short, long)]
        address: String,

        /// Stop after this many pages (default: all pages)
        #[arg(long)]
        pages: Option<usize>,

        /// Output file (default: from settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
