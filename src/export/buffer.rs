//! Flattened transactions awaiting download

use crate::ledger::TxRecord;

/// Snapshot of every cached transaction, taken by an explicit prepare step
///
/// The buffer is not refreshed when more pages are fetched; it changes only
/// when it is prepared again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportBuffer {
    address: Option<String>,
    records: Vec<TxRecord>,
}

impl ExportBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `records` taken from `address`'s history
    pub fn replace(&mut self, address: Option<&str>, records: Vec<TxRecord>) {
        self.address = address.map(str::to_string);
        self.records = records;
    }

    /// Account the records were prepared from
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Prepared records in fetch order
    pub fn records(&self) -> &[TxRecord] {
        &self.records
    }

    /// Number of prepared records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is ready to download
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
