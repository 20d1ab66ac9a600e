//! Session controller
//!
//! Owns the query input, the page cache, the export buffer and the page
//! source. Every user intent goes through one `&mut self` method, so only
//! one operation (and at most one request) is ever in flight.

use super::cache::PageCache;
use super::controls::{blocker, Action, Controls};
use crate::error::{Error, Result};
use crate::export::ExportBuffer;
use crate::ledger::{Page, PageSource, Query, TxRecord, ERROR_CODE_ACCOUNT_MALFORMED};
use crate::types::PageSize;
use tracing::{debug, info, warn};

/// How a forward step was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The page was already cached
    CacheHit,
    /// The page was fetched from the source and appended
    Fetched,
}

/// State of one interactive session
#[derive(Debug)]
pub struct Session<S> {
    source: S,
    address_input: String,
    page_size: PageSize,
    cache: PageCache,
    /// Message of the last transport failure, cleared by the next success
    failure: Option<String>,
    export: ExportBuffer,
}

impl<S: PageSource> Session<S> {
    /// Create an empty session querying `source`
    pub fn new(source: S, page_size: PageSize) -> Self {
        Self {
            source,
            address_input: String::new(),
            page_size,
            cache: PageCache::new(),
            failure: None,
            export: ExportBuffer::new(),
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Current content of the address input
    pub fn address_input(&self) -> &str {
        &self.address_input
    }

    /// Replace the address input; cached pages are kept
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address_input = address.into();
    }

    /// Empty the address input; cached pages are kept
    pub fn clear_address(&mut self) {
        self.address_input.clear();
    }

    /// Page size the next search will use
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Select the page size for the next search
    ///
    /// Pages already fetched, and further pages of the current query, keep
    /// the size they were searched with.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Source pages are fetched from
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetched pages and the read pointer
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Page currently shown
    pub fn current_page(&self) -> Option<&Page> {
        self.cache.current_page()
    }

    /// Last transport failure, if the most recent request failed
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Prepared export
    pub fn export_buffer(&self) -> &ExportBuffer {
        &self.export
    }

    /// Which actions are currently enabled
    pub fn controls(&self) -> Controls {
        Controls::evaluate(&self.cache, &self.address_input, &self.export)
    }

    fn ensure_allowed(&self, action: Action) -> Result<()> {
        match blocker(action, &self.cache, &self.address_input, &self.export) {
            Some(reason) => Err(Error::disabled(action.to_string(), reason.to_string())),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Start a new query for the address input and fetch its first page
    ///
    /// All previously cached pages are dropped, even if the request fails.
    pub async fn search(&mut self) -> Result<&Page> {
        self.ensure_allowed(Action::Search)?;

        let query = Query::new(self.address_input.clone(), self.page_size);
        info!(
            account = %query.address,
            page_size = query.page_size.get(),
            "Searching account history"
        );

        self.cache.reset(query.clone());
        self.failure = None;

        match self.source.fetch_page(&query, None).await {
            Ok(page) => {
                log_rejection(&page);
                self.cache.push(page);
                self.cache
                    .current_page()
                    .ok_or_else(|| Error::Other("page cache is empty after push".to_string()))
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    /// Show the next page, fetching it only past the cached frontier
    ///
    /// A fetch continues the query captured by the last search, not the
    /// current input. On failure the pointer stays where it was.
    pub async fn next(&mut self) -> Result<Navigation> {
        self.ensure_allowed(Action::Next)?;

        if self.cache.step_forward() {
            debug!(page = self.cache.current_index(), "Cache hit");
            self.failure = None;
            return Ok(Navigation::CacheHit);
        }

        let (query, marker) = match (self.cache.query(), self.cache.frontier_marker()) {
            (Some(query), Some(marker)) => (query.clone(), marker.clone()),
            _ => {
                return Err(Error::disabled(
                    Action::Next.to_string(),
                    "there are no further pages",
                ))
            }
        };

        debug!(account = %query.address, marker = %marker, "Fetching next page");
        match self.source.fetch_page(&query, Some(&marker)).await {
            Ok(page) => {
                log_rejection(&page);
                self.cache.push(page);
                self.failure = None;
                Ok(Navigation::Fetched)
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    /// Show the previous page; never issues a request
    pub fn previous(&mut self) -> Result<()> {
        self.ensure_allowed(Action::Previous)?;
        self.cache.step_back();
        self.failure = None;
        debug!(page = self.cache.current_index(), "Stepped back");
        Ok(())
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Every cached transaction in fetch order
    pub fn flatten_for_export(&self) -> Vec<TxRecord> {
        self.cache.flatten_for_export()
    }

    /// Snapshot all cached transactions into the export buffer
    ///
    /// Returns the number of prepared records.
    pub fn prepare_export(&mut self) -> Result<usize> {
        self.ensure_allowed(Action::PrepareExport)?;
        let records = self.flatten_for_export();
        self.export.replace(self.cache.last_searched(), records);
        info!(records = self.export.len(), "Prepared CSV export");
        Ok(self.export.len())
    }

    /// Ensure there is something to download and return it
    pub fn download_ready(&self) -> Result<&ExportBuffer> {
        self.ensure_allowed(Action::Download)?;
        Ok(&self.export)
    }

    fn record_failure(&mut self, error: Error) -> Error {
        warn!(error = %error, "Request failed");
        self.failure = Some(error.to_string());
        error
    }
}

/// Log a rejected page once, as it arrives
///
/// A malformed address is an expected user error; any other code is logged
/// as a warning with the full page.
fn log_rejection(page: &Page) {
    if !page.is_error() {
        return;
    }
    if page.error_code == Some(ERROR_CODE_ACCOUNT_MALFORMED) {
        info!(error = ?page.error, "Ledger rejected the account address");
    } else {
        warn!(page = ?page, "Unrecognised ledger error");
    }
}
