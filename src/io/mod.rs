//! Tabular ingestion.
//!
//! Spreadsheet sheets are consumed as CSV exports and turned into typed
//! [`Table`](crate::core::Table)s at this boundary.

mod reader;

pub use reader::{read_csv, read_csv_path};
