// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # xrpl-history
//!
//! Paged browsing of an XRP Ledger account's transaction history over the
//! `account_tx` JSON-RPC method, with CSV export of everything fetched.
//!
//! ## Features
//!
//! - **Marker Pagination**: Follows the ledger's opaque resume marker page by page
//! - **Page Cache**: Revisiting earlier pages never issues a request
//! - **Gated Actions**: Every action reports why it is disabled
//! - **CSV Export**: All fetched transactions in fetch order
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use xrpl_history::{HttpClient, LedgerClient, PageSize, Session, DEFAULT_ENDPOINT};
//!
//! #[tokio::main]
//! async fn main() -> xrpl_history::Result<()> {
//!     let client = LedgerClient::new(HttpClient::new()?, DEFAULT_ENDPOINT);
//!     let mut session = Session::new(client, PageSize::Fifty);
//!
//!     session.set_address("rLNaPoKeeBjZe2qs6x52yVPZpZ8td4dc6w");
//!     session.search().await?;
//!     while session.controls().next {
//!         session.next().await?;
//!     }
//!
//!     let records = session.flatten_for_export();
//!     xrpl_history::export::write_records_to_csv("txns.csv", &records, None)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        CLI (shell / export)                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────────┬──────────────┴──────────┬──────────────────────┐
//! │    Render     │       Pagination        │        Export        │
//! ├───────────────┼─────────────────────────┼──────────────────────┤
//! │ Page table    │ Session controller      │ Export buffer        │
//! │ Messages      │ Page cache + pointer    │ CSV writer           │
//! │ Controls line │ Action gating           │                      │
//! └───────────────┴─────────────────────────┴──────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │  Ledger: account_tx request / Page types   HTTP: rate limiting  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Settings file and command-line overrides
pub mod config;

/// HTTP client with rate limiting
pub mod http;

/// `account_tx` request and response types
pub mod ledger;

/// Page cache, action gating and the session controller
pub mod pagination;

/// Export buffer and CSV writer
pub mod export;

/// Terminal rendering
pub mod render;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use http::HttpClient;
pub use ledger::{LedgerClient, Marker, Page, PageSource, Query, TxRecord, DEFAULT_ENDPOINT};
pub use pagination::{Controls, Session};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
