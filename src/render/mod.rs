//! Render module
//!
//! Presentation of the session in a terminal: the transaction table of the
//! current page, status and error messages, and the enabled actions.

mod messages;
mod table;

pub use messages::{
    failure_message, rejection_message, view, View, INVALID_ADDRESS_MESSAGE,
    UNKNOWN_STATUS_MESSAGE,
};
pub use table::{controls_line, page_table, position_line, render_session, TABLE_COLUMNS};
