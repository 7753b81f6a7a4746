//! Column schema summaries for ingested tables.

use super::cell::Cell;
use super::table::Table;
use std::fmt;

/// Inferred type of a column, from its non-missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Text,
    Date,
    /// More than one kind of non-missing cell.
    Mixed,
    /// Every cell is missing.
    Empty,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Mixed => "mixed",
            ColumnType::Empty => "empty",
        };
        f.pad(name)
    }
}

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub column_type: ColumnType,
    pub non_null: usize,
    pub null: usize,
}

/// Schema of a table: one summary per column, plus the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub columns: Vec<ColumnSummary>,
    pub rows: usize,
}

fn infer_type(cells: &[Cell]) -> ColumnType {
    let mut kind: Option<&'static str> = None;
    for cell in cells.iter().filter(|c| !c.is_missing()) {
        match kind {
            None => kind = Some(cell.kind()),
            Some(k) if k != cell.kind() => return ColumnType::Mixed,
            Some(_) => {}
        }
    }
    match kind {
        None => ColumnType::Empty,
        Some("number") => ColumnType::Numeric,
        Some("date") => ColumnType::Date,
        Some(_) => ColumnType::Text,
    }
}

impl Table {
    /// Summarize column types and null counts.
    pub fn schema(&self) -> Schema {
        let columns = self
            .column_names()
            .iter()
            .map(|name| {
                let cells = self.column(name).unwrap_or(&[]);
                let null = cells.iter().filter(|c| c.is_missing()).count();
                ColumnSummary {
                    name: name.clone(),
                    column_type: infer_type(cells),
                    non_null: cells.len() - null,
                    null,
                }
            })
            .collect();
        Schema {
            columns,
            rows: self.len(),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .columns
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max("Column".len());

        writeln!(f, "{}", "-".repeat(60))?;
        writeln!(f, "SCHEMA INFORMATION")?;
        writeln!(f, "{}", "-".repeat(60))?;
        writeln!(
            f,
            "{:<width$}  {:<9}  {:>14}  {:>10}",
            "Column", "Data Type", "Non-Null Count", "Null Count"
        )?;
        for c in &self.columns {
            writeln!(
                f,
                "{:<width$}  {:<9}  {:>14}  {:>10}",
                c.name, c.column_type, c.non_null, c.null
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Shape: {} rows x {} columns", self.rows, self.columns.len())?;
        write!(f, "{}", "-".repeat(60))
    }
}
