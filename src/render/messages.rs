//! User-facing status messages

use crate::ledger::{Page, PageSource, PageStatus, ERROR_CODE_ACCOUNT_MALFORMED};
use crate::pagination::Session;

/// Shown when the ledger reports a malformed account address
pub const INVALID_ADDRESS_MESSAGE: &str = "Invalid account address provided!";

/// Shown when the ledger answers with a status we do not know
pub const UNKNOWN_STATUS_MESSAGE: &str = "Something went wrong and we have no idea what :/";

/// What the main area of the screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    /// Nothing searched yet
    Idle,
    /// The last request failed before a page was produced
    Failure(&'a str),
    /// The current page lists transactions
    Table(&'a Page),
    /// The ledger rejected the query
    Rejected(String),
    /// The ledger answered with an unrecognised status
    Unknown,
}

/// Pick what to show for the session's current state
pub fn view<S: PageSource>(session: &Session<S>) -> View<'_> {
    if let Some(failure) = session.failure() {
        return View::Failure(failure);
    }

    match session.current_page() {
        None => View::Idle,
        Some(page) if page.is_error() => View::Rejected(rejection_message(page)),
        Some(page) if page.status == PageStatus::Success => View::Table(page),
        Some(_) => View::Unknown,
    }
}

/// Message for a page the ledger rejected
///
/// Codes other than a malformed address get a generic message.
pub fn rejection_message(page: &Page) -> String {
    if page.error_code == Some(ERROR_CODE_ACCOUNT_MALFORMED) {
        return INVALID_ADDRESS_MESSAGE.to_string();
    }

    let token = page
        .error_message
        .as_deref()
        .or(page.error.as_deref())
        .unwrap_or("no details");
    match page.error_code {
        Some(code) => format!("The ledger rejected the query ({token}, code {code})."),
        None => format!("The ledger rejected the query ({token})."),
    }
}

/// Message for a transport failure
pub fn failure_message(failure: &str) -> String {
    format!("Error: {failure}")
}
