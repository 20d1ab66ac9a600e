//! Ledger query module
//!
//! Wire types and client for the XRP Ledger `account_tx` JSON-RPC method.
//!
//! # Overview
//!
//! - [`Query`] - account address and page size of one history query
//! - [`PageSource`] - trait answering a query one page at a time
//! - [`LedgerClient`] - `PageSource` over an HTTP JSON-RPC endpoint
//! - [`Page`], [`Transaction`], [`TxRecord`], [`Marker`] - response types

mod query;
mod types;

pub use query::{
    account_tx_request, LedgerClient, PageSource, Query, ACCOUNT_TX_METHOD, DEFAULT_ENDPOINT,
};
pub use types::{
    Marker, Page, PageStatus, Transaction, TxRecord, ERROR_CODE_ACCOUNT_MALFORMED,
    LEDGER_EPOCH_OFFSET,
};

#[cfg(test)]
mod tests;
