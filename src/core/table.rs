//! Table data structure for rectangular, typed sales and shipment records.

use super::cell::Cell;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use tracing::debug;

/// Layout of the cell data passed to [`Table::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellLayout {
    /// Each inner vector is a column.
    #[default]
    Column,
    /// Each inner vector is a row.
    Row,
}

/// A rectangular table of named, equal-length columns.
///
/// Tables are immutable once built; filtering returns a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    /// Column-major storage: columns[column][row]
    columns: Vec<Vec<Cell>>,
}

/// Builder for constructing a Table column by column.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    names: Vec<String>,
    columns: Vec<Vec<Cell>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column of cells.
    pub fn column<I, C>(mut self, name: &str, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.names.push(name.to_string());
        self.columns.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<Table> {
        Table::new(self.names, self.columns, CellLayout::Column)
    }
}

impl Table {
    /// Create a table, validating that every column has the same length
    /// and that column names are unique.
    pub fn new(names: Vec<String>, cells: Vec<Vec<Cell>>, layout: CellLayout) -> Result<Self> {
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(ForecastError::Ingest(format!("duplicate column name: {name}")));
            }
        }

        let columns = match layout {
            CellLayout::Column => {
                if cells.len() != names.len() {
                    return Err(ForecastError::LengthMismatch {
                        expected: names.len(),
                        got: cells.len(),
                    });
                }
                let rows = cells.first().map_or(0, |c| c.len());
                for column in &cells {
                    if column.len() != rows {
                        return Err(ForecastError::LengthMismatch {
                            expected: rows,
                            got: column.len(),
                        });
                    }
                }
                cells
            }
            CellLayout::Row => {
                for row in &cells {
                    if row.len() != names.len() {
                        return Err(ForecastError::LengthMismatch {
                            expected: names.len(),
                            got: row.len(),
                        });
                    }
                }
                // Transpose to column-major
                let mut columns: Vec<Vec<Cell>> = (0..names.len())
                    .map(|_| Vec::with_capacity(cells.len()))
                    .collect();
                for row in cells {
                    for (column, cell) in columns.iter_mut().zip(row) {
                        column.push(cell);
                    }
                }
                columns
            }
        };

        Ok(Self { names, columns })
    }

    /// Create a builder for column-wise construction.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Get the cells of a named column.
    pub fn column(&self, name: &str) -> Result<&[Cell]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| ForecastError::MissingColumn(name.to_string()))
    }

    /// Fail with `MissingColumn` on the first absent name.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.has_column(name) {
                return Err(ForecastError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    /// Indices of the rows where every `(column, value)` condition holds.
    pub fn matching_rows<'a, I>(&self, conditions: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = (&'a str, &'a Cell)>,
    {
        let checks = conditions
            .into_iter()
            .map(|(column, value)| Ok((self.column(column)?, value)))
            .collect::<Result<Vec<_>>>()?;
        Ok((0..self.len())
            .filter(|&row| checks.iter().all(|(cells, value)| cells[row] == **value))
            .collect())
    }

    /// Keep only the rows whose `column` equals `value`.
    pub fn filter_eq(&self, column: &str, value: &Cell) -> Result<Table> {
        let keep = self.matching_rows([(column, value)])?;
        Ok(self.take_rows(&keep))
    }

    /// Build a new table from the given row indices, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|column| rows.iter().map(|&r| column[r].clone()).collect())
            .collect();
        Table {
            names: self.names.clone(),
            columns,
        }
    }

    /// Distinct non-missing values of a column, in order of first appearance.
    pub fn unique(&self, column: &str) -> Result<Vec<Cell>> {
        let mut seen: Vec<Cell> = Vec::new();
        for cell in self.column(column)? {
            if !cell.is_missing() && !seen.contains(cell) {
                seen.push(cell.clone());
            }
        }
        Ok(seen)
    }

    /// Extract two aligned numeric sequences.
    ///
    /// Rows where either value does not coerce to a finite number are
    /// dropped. When `order_by` names a date column, rows with an
    /// unparseable date are dropped too and the rest are sorted by date
    /// (stable, so equal dates keep their table order).
    pub fn paired_series(
        &self,
        first: &str,
        second: &str,
        order_by: Option<&str>,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        let rows = self.aligned_rows(&[first, second], order_by)?;
        Ok(rows.into_iter().map(|(_, v)| (v[0], v[1])).unzip())
    }

    /// A numeric column in date order, with the date of each kept row.
    ///
    /// Cleaning is the same as [`paired_series`](Self::paired_series), so
    /// the dates line up with the values index for index.
    pub fn dated_values(&self, date_col: &str, value_col: &str) -> Result<(Vec<NaiveDate>, Vec<f64>)> {
        let rows = self.aligned_rows(&[value_col], Some(date_col))?;
        Ok(rows
            .into_iter()
            .filter_map(|(date, v)| Some((date?, v[0])))
            .unzip())
    }

    /// Two numeric columns in date order, with the date of each kept row.
    pub fn dated_pairs(&self, date_col: &str, first: &str, second: &str) -> Result<DatedPairs> {
        let rows = self.aligned_rows(&[first, second], Some(date_col))?;
        let mut pairs = DatedPairs::default();
        for (date, v) in rows {
            if let Some(date) = date {
                pairs.dates.push(date);
                pairs.first.push(v[0]);
                pairs.second.push(v[1]);
            }
        }
        Ok(pairs)
    }

    /// Rows where every named column is numeric, with the row's date when
    /// `order_by` is given (rows with a bad date are dropped then).
    fn aligned_rows(
        &self,
        names: &[&str],
        order_by: Option<&str>,
    ) -> Result<Vec<(Option<NaiveDate>, Vec<f64>)>> {
        let columns = names
            .iter()
            .map(|name| self.column(name))
            .collect::<Result<Vec<_>>>()?;
        let dates = order_by.map(|name| self.column(name)).transpose()?;

        let mut rows = Vec::with_capacity(self.len());
        for i in 0..self.len() {
            let date = match dates {
                Some(d) => match d[i].as_date() {
                    Some(date) => Some(date),
                    None => continue,
                },
                None => None,
            };
            let values: Option<Vec<f64>> = columns.iter().map(|c| c[i].as_number()).collect();
            if let Some(values) = values {
                rows.push((date, values));
            }
        }

        let dropped = self.len() - rows.len();
        if dropped > 0 {
            debug!(columns = ?names, dropped, "dropped rows without numeric values");
        }

        if order_by.is_some() {
            rows.sort_by_key(|(date, _)| *date);
        }
        Ok(rows)
    }
}

/// Aligned numeric sequences together with their row dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatedPairs {
    pub dates: Vec<NaiveDate>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}
