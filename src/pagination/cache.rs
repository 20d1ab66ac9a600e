//! Append-only page log with a movable read pointer
//!
//! Pages are only ever fetched forward and appended; moving back and forth
//! only moves the pointer, so a cached page is never requested twice.

use crate::ledger::{Marker, Page, Query, TxRecord};

/// Pages fetched for one query, in fetch order
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    /// Query snapshot that produced `pages`
    query: Option<Query>,
    pages: Vec<Page>,
    /// Index of the page being viewed; always `< pages.len()` when non-empty
    current: usize,
}

impl PageCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every page and start over for `query`
    pub fn reset(&mut self, query: Query) {
        self.query = Some(query);
        self.pages.clear();
        self.current = 0;
    }

    /// Append a freshly fetched page and make it current
    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
        self.current = self.pages.len() - 1;
    }

    /// Query snapshot the pages belong to
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Address of the most recent search
    pub fn last_searched(&self) -> Option<&str> {
        self.query.as_ref().map(|q| q.address.as_str())
    }

    /// All cached pages in fetch order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of cached pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether nothing has been fetched for the current query
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Index of the page being viewed
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Page being viewed
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current)
    }

    /// Most recently fetched page
    pub fn last_page(&self) -> Option<&Page> {
        self.pages.last()
    }

    /// Whether the current page is the last fetched one
    pub fn is_at_frontier(&self) -> bool {
        !self.pages.is_empty() && self.current == self.pages.len() - 1
    }

    /// Marker to request the page after the frontier, if there is one
    pub fn frontier_marker(&self) -> Option<&Marker> {
        self.last_page().and_then(|page| page.marker.as_ref())
    }

    /// Move one page back; returns false at the first page
    pub fn step_back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Move one page forward within the cache; returns false at the frontier
    pub fn step_forward(&mut self) -> bool {
        if self.pages.is_empty() || self.is_at_frontier() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Number of transactions on pages before the current one
    pub fn rows_before_current(&self) -> usize {
        self.pages[..self.current].iter().map(Page::len).sum()
    }

    /// Number of transactions across every cached page
    pub fn total_transactions(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Every cached transaction in fetch order, independent of the pointer
    pub fn flatten_for_export(&self) -> Vec<TxRecord> {
        self.pages
            .iter()
            .flat_map(|page| page.transactions.iter().map(|entry| entry.tx.clone()))
            .collect()
    }
}
