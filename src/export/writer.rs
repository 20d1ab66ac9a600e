//! CSV file writer
//!
//! Provides utilities for writing transaction records to CSV files.

use crate::error::{Error, Result};
use crate::ledger::TxRecord;
use crate::types::JsonValue;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Default name of the downloaded file
pub const DEFAULT_EXPORT_FILENAME: &str = "txns.csv";

/// Header row, one column per exported transaction field
pub const CSV_COLUMNS: [&str; 14] = [
    "Account",
    "Amount",
    "Destination",
    "DestinationTag",
    "Fee",
    "LastLedgerSequence",
    "Sequence",
    "SigningPubKey",
    "TransactionType",
    "TxnSignature",
    "date",
    "hash",
    "inLedger",
    "ledger_index",
];

/// Configuration for the CSV writer
#[derive(Debug, Clone)]
pub struct CsvWriterConfig {
    delimiter: u8,
    has_headers: bool,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

impl CsvWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enable or disable the header row
    #[must_use]
    pub fn with_headers(mut self, enabled: bool) -> Self {
        self.has_headers = enabled;
        self
    }

    /// Get the field delimiter
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Get header row enabled
    #[must_use]
    pub fn has_headers(&self) -> bool {
        self.has_headers
    }
}

/// Writes transaction records as CSV rows
pub struct CsvExporter<W: Write> {
    writer: Writer<W>,
    rows_written: usize,
}

impl<W: Write> CsvExporter<W> {
    /// Create an exporter over any writer, emitting the header row if enabled
    pub fn from_writer(inner: W, config: &CsvWriterConfig) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(false)
            .from_writer(inner);

        if config.has_headers {
            writer.write_record(CSV_COLUMNS)?;
        }

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Write one transaction
    pub fn write(&mut self, record: &TxRecord) -> Result<()> {
        self.writer.write_record(csv_row(record))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Get the number of rows written so far
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the inner writer together with the row count
    pub fn finish(self) -> Result<(W, usize)> {
        let rows = self.rows_written;
        let inner = self.writer.into_inner().map_err(|e| Error::Output {
            message: format!("Failed to flush CSV writer: {}", e.error()),
        })?;
        Ok((inner, rows))
    }
}

impl CsvExporter<File> {
    /// Create an exporter writing to a new file at `path`
    pub fn create(path: impl AsRef<Path>, config: &CsvWriterConfig) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|e| Error::Output {
            message: format!("Failed to create {}: {e}", path.as_ref().display()),
        })?;
        Self::from_writer(file, config)
    }
}

/// Write records to a CSV file, returning the number of rows written
pub fn write_records_to_csv(
    path: impl AsRef<Path>,
    records: &[TxRecord],
    config: Option<&CsvWriterConfig>,
) -> Result<usize> {
    let default_config = CsvWriterConfig::default();
    let config = config.unwrap_or(&default_config);

    let mut exporter = CsvExporter::create(path.as_ref(), config)?;
    for record in records {
        exporter.write(record)?;
    }
    let (_, rows) = exporter.finish()?;

    info!(rows, path = %path.as_ref().display(), "Wrote CSV export");
    Ok(rows)
}

/// Cells for one record, in [`CSV_COLUMNS`] order
pub fn csv_row(record: &TxRecord) -> [String; 14] {
    fn opt<T: ToString>(value: Option<&T>) -> String {
        value.map(ToString::to_string).unwrap_or_default()
    }

    let amount = match &record.amount {
        None => String::new(),
        Some(JsonValue::String(drops)) => drops.clone(),
        Some(other) => other.to_string(),
    };

    [
        opt(record.account.as_ref()),
        amount,
        opt(record.destination.as_ref()),
        opt(record.destination_tag.as_ref()),
        opt(record.fee.as_ref()),
        opt(record.last_ledger_sequence.as_ref()),
        opt(record.sequence.as_ref()),
        opt(record.signing_pub_key.as_ref()),
        opt(record.transaction_type.as_ref()),
        opt(record.txn_signature.as_ref()),
        opt(record.date.as_ref()),
        opt(record.hash.as_ref()),
        opt(record.in_ledger.as_ref()),
        opt(record.ledger_index.as_ref()),
    ]
}
