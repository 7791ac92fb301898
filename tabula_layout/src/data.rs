// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed tables handed to layout.
//!
//! A [`DataTable`] is a fixed, ordered list of typed columns plus rows aligned to it. Shape is
//! validated once at construction, so drawing never has to probe rows defensively.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashSet;

/// How a column's content is treated by the column allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColumnKind {
    /// Width follows the content.
    #[default]
    Text,
    /// Shares the remaining width equally with other numeric columns.
    Numeric,
}

/// Horizontal alignment of a column's text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Align {
    /// Anchor at `column_left + padding`.
    #[default]
    Left,
    /// Anchor at the column midpoint.
    Center,
    /// Anchor at `column_right - padding`.
    Right,
}

/// Schema entry for one column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDef {
    /// Source field key.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Text or numeric.
    pub kind: ColumnKind,
    /// Cell alignment.
    pub align: Align,
    /// Fixed number of decimals for numeric cells; `None` prints integers without a fraction
    /// and other values with up to two decimals.
    pub decimals: Option<usize>,
}

impl ColumnDef {
    /// A left-aligned text column.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::Text,
            align: Align::Left,
            decimals: None,
        }
    }

    /// A right-aligned numeric column.
    pub fn numeric(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::Numeric,
            align: Align::Right,
            decimals: None,
        }
    }

    /// Sets the alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Sets a fixed number of decimals.
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Formats a cell of this column for display. Missing and NaN values are empty.
    pub fn format(&self, value: &CellValue) -> String {
        match value {
            CellValue::Missing => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(v) => format_number(*v, self.decimals),
        }
    }
}

fn format_number(v: f64, decimals: Option<usize>) -> String {
    if !v.is_finite() {
        return String::new();
    }
    match decimals {
        Some(d) => format!("{v:.d$}"),
        None => {
            let rounded = format!("{v:.2}");
            let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
            if trimmed == "-0" {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// A single cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    /// No value; renders as an empty cell.
    #[default]
    Missing,
    /// Free text.
    Text(String),
    /// A number.
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for CellValue {
    #[allow(
        clippy::cast_precision_loss,
        reason = "row counts and tallies are far below 2^53"
    )]
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

/// Errors building a [`DataTable`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataTableError {
    /// Two columns share a key.
    #[error("duplicate column key `{0}`")]
    DuplicateKey(String),
    /// A row has a different number of cells than there are columns.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowArity {
        /// Row index.
        row: usize,
        /// Cells in the row.
        found: usize,
        /// Columns in the table.
        expected: usize,
    },
    /// A numeric column holds text.
    #[error("row {row}, column `{key}`: text in a numeric column")]
    TextInNumericColumn {
        /// Row index.
        row: usize,
        /// Column key.
        key: String,
    },
}

/// A typed table: ordered columns and rows aligned to them.
#[derive(Clone, Debug, PartialEq)]
pub struct DataTable {
    columns: Vec<ColumnDef>,
    rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Builds a table, validating the shape of every row.
    pub fn new(columns: Vec<ColumnDef>, rows: Vec<Vec<CellValue>>) -> Result<Self, DataTableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.key.as_str()) {
                return Err(DataTableError::DuplicateKey(col.key.clone()));
            }
        }
        drop(seen);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(DataTableError::RowArity {
                    row,
                    found: cells.len(),
                    expected: columns.len(),
                });
            }
            for (col, cell) in columns.iter().zip(cells) {
                if col.kind == ColumnKind::Numeric && matches!(cell, CellValue::Text(_)) {
                    return Err(DataTableError::TextInNumericColumn {
                        row,
                        key: col.key.clone(),
                    });
                }
            }
        }
        Ok(Self { columns, rows })
    }

    /// Builds a table from keyed records.
    ///
    /// Each record is a list of `(key, value)` pairs. Keys that are not columns are ignored and
    /// columns missing from a record become [`CellValue::Missing`].
    pub fn from_records<K, I>(
        columns: Vec<ColumnDef>,
        records: impl IntoIterator<Item = I>,
    ) -> Result<Self, DataTableError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, CellValue)>,
    {
        let mut rows = Vec::new();
        for record in records {
            let mut row = alloc::vec![CellValue::Missing; columns.len()];
            for (key, value) in record {
                if let Some(i) = columns.iter().position(|c| c.key == key.as_ref()) {
                    row[i] = value;
                }
            }
            rows.push(row);
        }
        Self::new(columns, rows)
    }

    /// An empty table with the given columns.
    pub fn empty(columns: Vec<ColumnDef>) -> Result<Self, DataTableError> {
        Self::new(columns, Vec::new())
    }

    /// Column definitions in order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column with `key`.
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// The cell at `(row, col)`, if both exist.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)
    }

    /// The display string for `(row, col)`; empty when missing.
    pub fn display(&self, row: usize, col: usize) -> String {
        match (self.columns.get(col), self.cell(row, col)) {
            (Some(def), Some(value)) => def.format(value),
            _ => String::new(),
        }
    }

    /// Display strings for every row of column `col`.
    pub fn column_strings(&self, col: usize) -> Vec<String> {
        (0..self.rows.len()).map(|r| self.display(r, col)).collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("name", "Name"),
            ColumnDef::numeric("count", "Count"),
            ColumnDef::numeric("pct", "Pct").with_decimals(1),
        ]
    }

    #[test]
    fn rows_must_match_column_count() {
        let err = DataTable::new(columns(), vec![vec!["Oak Park".into()]]).unwrap_err();
        assert_eq!(
            err,
            DataTableError::RowArity {
                row: 0,
                found: 1,
                expected: 3
            }
        );
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let cols = vec![ColumnDef::text("a", "A"), ColumnDef::text("a", "A again")];
        assert!(matches!(
            DataTable::empty(cols),
            Err(DataTableError::DuplicateKey(_))
        ));
    }

    #[test]
    fn text_in_numeric_column_is_rejected() {
        let rows = vec![vec!["Oak".into(), "lots".into(), CellValue::Missing]];
        assert!(matches!(
            DataTable::new(columns(), rows),
            Err(DataTableError::TextInNumericColumn { row: 0, .. })
        ));
    }

    #[test]
    fn missing_record_keys_render_empty() {
        let table = DataTable::from_records(
            columns(),
            vec![
                vec![("name", CellValue::from("Oak Park")), ("count", 12.0.into())],
                vec![("unknown", CellValue::from("x"))],
            ],
        )
        .expect("valid records");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.display(0, 0), "Oak Park");
        assert_eq!(table.display(0, 1), "12");
        assert_eq!(table.display(0, 2), "");
        assert_eq!(table.display(1, 0), "");
    }

    #[test]
    fn numbers_format_without_nan_tokens() {
        let def = ColumnDef::numeric("n", "N");
        assert_eq!(def.format(&CellValue::Number(f64::NAN)), "");
        assert_eq!(def.format(&CellValue::Number(3.0)), "3");
        assert_eq!(def.format(&CellValue::Number(2.5)), "2.5");
        assert_eq!(def.format(&CellValue::Number(-0.001)), "0");
        let fixed = ColumnDef::numeric("p", "P").with_decimals(1);
        assert_eq!(fixed.format(&CellValue::Number(42.0)), "42.0");
    }
}
