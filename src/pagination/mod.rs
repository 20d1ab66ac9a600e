//! Pagination module
//!
//! Wraps the ledger's forward-only, marker-based pagination with
//! bidirectional page navigation.
//!
//! # Overview
//!
//! - [`PageCache`] - append-only log of fetched pages plus a read pointer
//! - [`Controls`] - which user actions are currently enabled, and why not
//! - [`Session`] - controller owning the input, the cache and the source
//!
//! Moving back, or forward into a page that is already cached, never issues
//! a request. Only a step past the last fetched page does, using that page's
//! marker.

mod cache;
mod controls;
mod session;

pub use cache::PageCache;
pub use controls::{blocker, Action, Blocker, Controls};
pub use session::{Navigation, Session};
