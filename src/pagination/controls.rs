//! Enablement of user actions
//!
//! Whether an action is allowed is derived purely from session state, so
//! the presentation layer and the session agree on it.

use super::cache::PageCache;
use crate::export::ExportBuffer;
use std::fmt;

/// A user intent fed into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
    Previous,
    Next,
    PrepareExport,
    Download,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::Search => "search",
            Action::Previous => "go to the previous page",
            Action::Next => "go to the next page",
            Action::PrepareExport => "prepare the CSV export",
            Action::Download => "download the CSV export",
        };
        f.write_str(text)
    }
}

/// Why an action is currently disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    /// The address input is empty
    EmptyAddress,
    /// No page has been fetched for the current query
    NoPages,
    /// Already viewing the first page
    FirstPage,
    /// The current page is a rejection from the ledger
    RemoteError,
    /// The last fetched page carries no marker
    LastPage,
    /// The address input was edited since the last search
    AddressChanged,
    /// No export has been prepared
    NothingPrepared,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Blocker::EmptyAddress => "enter an account address first",
            Blocker::NoPages => "no transactions have been fetched yet",
            Blocker::FirstPage => "already on the first page",
            Blocker::RemoteError => "the ledger rejected this query",
            Blocker::LastPage => "there are no further pages",
            Blocker::AddressChanged => "the address was edited; search again to continue",
            Blocker::NothingPrepared => "prepare the export first",
        };
        f.write_str(text)
    }
}

/// Decide whether `action` is allowed given the session state
pub fn blocker(
    action: Action,
    cache: &PageCache,
    address_input: &str,
    export: &ExportBuffer,
) -> Option<Blocker> {
    match action {
        Action::Search => address_input.is_empty().then_some(Blocker::EmptyAddress),
        Action::Previous => {
            if cache.is_empty() {
                Some(Blocker::NoPages)
            } else if cache.current_index() == 0 {
                Some(Blocker::FirstPage)
            } else {
                None
            }
        }
        Action::Next => next_blocker(cache, address_input),
        Action::PrepareExport => cache.is_empty().then_some(Blocker::NoPages),
        Action::Download => export.is_empty().then_some(Blocker::NothingPrepared),
    }
}

fn next_blocker(cache: &PageCache, address_input: &str) -> Option<Blocker> {
    let Some(current) = cache.current_page() else {
        return Some(Blocker::NoPages);
    };
    if current.is_error() {
        return Some(Blocker::RemoteError);
    }
    if !cache.is_at_frontier() {
        return None;
    }
    if cache.frontier_marker().is_none() {
        return Some(Blocker::LastPage);
    }
    if cache.last_searched() != Some(address_input) {
        return Some(Blocker::AddressChanged);
    }
    None
}

/// Snapshot of which actions are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub search: bool,
    pub previous: bool,
    pub next: bool,
    pub prepare_export: bool,
    pub download: bool,
}

impl Controls {
    /// Evaluate every action against the session state
    pub fn evaluate(cache: &PageCache, address_input: &str, export: &ExportBuffer) -> Self {
        let allowed = |action| blocker(action, cache, address_input, export).is_none();
        Self {
            search: allowed(Action::Search),
            previous: allowed(Action::Previous),
            next: allowed(Action::Next),
            prepare_export: allowed(Action::PrepareExport),
            download: allowed(Action::Download),
        }
    }
}
