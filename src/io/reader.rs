//! CSV reader producing typed tables.

use crate::core::{Cell, CellLayout, Table};
use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read a CSV document with a header row into a [`Table`].
///
/// Each cell is typed with [`Cell::parse`]. Short rows are padded with
/// missing cells; extra trailing fields are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let width = names.len();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row: Vec<Cell> = record.iter().take(width).map(Cell::parse).collect();
        row.resize(width, Cell::Missing);
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = width, "read csv table");
    Table::new(names, rows, CellLayout::Row)
}

/// Read a CSV file into a [`Table`].
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = File::open(path.as_ref())?;
    read_csv(file)
}
