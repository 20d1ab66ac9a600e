//! The `account_tx` query and the sources that answer it

use super::types::{Marker, Page};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::PageSize;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// JSON-RPC method used for every request
pub const ACCOUNT_TX_METHOD: &str = "account_tx";

/// Public full-history cluster queried by default
pub const DEFAULT_ENDPOINT: &str = "https://xrplcluster.com/";

/// Parameters of one history query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    /// Account whose history is requested
    pub address: String,
    /// Transactions per page
    pub page_size: PageSize,
}

impl Query {
    /// Create a new query
    pub fn new(address: impl Into<String>, page_size: PageSize) -> Self {
        Self {
            address: address.into(),
            page_size,
        }
    }
}

/// Build the JSON-RPC request body for one page
///
/// The marker is omitted entirely for the first page.
pub fn account_tx_request(query: &Query, marker: Option<&Marker>) -> Value {
    let mut params = json!({
        "api_version": 1,
        "account": query.address,
        "binary": false,
        "forward": false,
        "ledger_index_max": -1,
        "ledger_index_min": -1,
        "limit": query.page_size.get(),
    });

    if let (Some(marker), Some(obj)) = (marker, params.as_object_mut()) {
        obj.insert("marker".to_string(), marker.as_value().clone());
    }

    json!({
        "method": ACCOUNT_TX_METHOD,
        "params": [params],
    })
}

// ============================================================================
// Page Source
// ============================================================================

/// Anything that can answer an `account_tx` query one page at a time
///
/// Implementations return `Err` only for transport failures. A rejection
/// by the ledger comes back as `Ok` with an error page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page that follows `marker` (or the first page when `None`)
    async fn fetch_page(&self, query: &Query, marker: Option<&Marker>) -> Result<Page>;
}

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Page>,
}

/// [`PageSource`] backed by a ledger JSON-RPC endpoint
#[derive(Debug)]
pub struct LedgerClient {
    http: HttpClient,
    endpoint: String,
}

impl LedgerClient {
    /// Create a client for the given endpoint
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint URL this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PageSource for LedgerClient {
    async fn fetch_page(&self, query: &Query, marker: Option<&Marker>) -> Result<Page> {
        debug!(
            account = %query.address,
            limit = query.page_size.get(),
            marker = ?marker.map(ToString::to_string),
            "Requesting account_tx page"
        );

        let body = account_tx_request(query, marker);
        let response: RpcResponse = self.http.post_json(&self.endpoint, &body).await?;

        let page = response
            .result
            .ok_or_else(|| Error::decode("JSON-RPC response has no result"))?;

        debug!(
            status = ?page.status,
            transactions = page.len(),
            has_more = page.has_more(),
            "Received account_tx page"
        );
        Ok(page)
    }
}
