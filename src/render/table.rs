//! Terminal rendering of pages and session state

use super::messages::{failure_message, view, View, UNKNOWN_STATUS_MESSAGE};
use crate::ledger::{Page, PageSource};
use crate::pagination::{Controls, Session};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{modifiers, Attribute, Cell, CellAlignment, ContentArrangement, Table};
use std::fmt::Write as _;

/// Column headers of the transaction table
pub const TABLE_COLUMNS: [&str; 6] = ["#", "Type", "Account", "Amount", "Destination", "Date"];

/// Build the table for one page
///
/// Row numbers start at `first_row + 1` so they continue across pages.
pub fn page_table(page: &Page, first_row: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            TABLE_COLUMNS
                .iter()
                .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
        );

    for (i, entry) in page.transactions.iter().enumerate() {
        let tx = &entry.tx;
        let date = tx
            .close_time()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(first_row + i + 1).set_alignment(CellAlignment::Right),
            Cell::new(tx.transaction_type.as_deref().unwrap_or("")),
            Cell::new(tx.account.as_deref().unwrap_or("")),
            Cell::new(tx.amount_text()).set_alignment(CellAlignment::Right),
            Cell::new(tx.destination.as_deref().unwrap_or("")),
            Cell::new(date),
        ]);
    }

    table
}

/// One-line summary of which actions are available
///
/// Enabled actions are bracketed, disabled ones parenthesised.
pub fn controls_line(controls: &Controls) -> String {
    let flag = |name: &str, enabled: bool| {
        if enabled {
            format!("[{name}]")
        } else {
            format!("({name})")
        }
    };

    [
        flag("search", controls.search),
        flag("prev", controls.previous),
        flag("next", controls.next),
        flag("prepare", controls.prepare_export),
        flag("download", controls.download),
    ]
    .join(" ")
}

/// Position of the current page, e.g. `Page 2 of 3 fetched (rows 11-20), more available`
pub fn position_line<S: PageSource>(session: &Session<S>) -> Option<String> {
    let cache = session.cache();
    let page = cache.current_page()?;

    let mut line = format!(
        "Page {} of {} fetched",
        cache.current_index() + 1,
        cache.len()
    );
    if !page.is_empty() {
        let first = cache.rows_before_current() + 1;
        let _ = write!(line, " (rows {}-{})", first, first + page.len() - 1);
    }
    if cache.frontier_marker().is_some() {
        line.push_str(", more available");
    }
    Some(line)
}

/// Render the whole screen for the session
pub fn render_session<S: PageSource>(session: &Session<S>) -> String {
    let mut out = String::new();

    if let Some(query) = session.cache().query() {
        let _ = writeln!(
            out,
            "Account {} ({} per page)",
            query.address, query.page_size
        );
    }

    match view(session) {
        View::Idle => out.push_str("Search for an account to see its transactions.\n"),
        View::Failure(failure) => {
            let _ = writeln!(out, "{}", failure_message(failure));
        }
        View::Rejected(message) => {
            let _ = writeln!(out, "{message}");
        }
        View::Unknown => {
            let _ = writeln!(out, "{UNKNOWN_STATUS_MESSAGE}");
        }
        View::Table(page) => {
            if page.is_empty() {
                out.push_str("No transactions on this page.\n");
            } else {
                let table = page_table(page, session.cache().rows_before_current());
                let _ = writeln!(out, "{table}");
            }
            if let Some(position) = position_line(session) {
                let _ = writeln!(out, "{position}");
            }
        }
    }

    let _ = write!(out, "{}", controls_line(&session.controls()));
    out
}
