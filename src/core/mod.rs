//! Core data structures for tabular sales and shipment records.

mod cell;
mod period;
mod schema;
mod table;

pub use cell::{parse_date, Cell};
pub use period::{Granularity, PeriodKey};
pub use schema::{ColumnSummary, ColumnType, Schema};
pub use table::{CellLayout, DatedPairs, Table, TableBuilder};
