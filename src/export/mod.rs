//! Export module
//!
//! Turns the fetched history into a CSV file.
//!
//! # Overview
//!
//! Export is a two-step flow: preparing flattens every cached page into an
//! [`ExportBuffer`], downloading writes that buffer with [`CsvExporter`].

mod buffer;
mod writer;

pub use buffer::ExportBuffer;
pub use writer::{
    csv_row, write_records_to_csv, CsvExporter, CsvWriterConfig, CSV_COLUMNS,
    DEFAULT_EXPORT_FILENAME,
};
