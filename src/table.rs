//! Table model types.
//!
//! A table is an ordered sequence of rows of optional cell values. Cells
//! stay `Option<String>` until the flatten boundary, where missing values
//! become empty strings.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A table extracted from a single page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table, top to bottom.
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flatten the table into a row-major sequence of cell strings.
    ///
    /// Missing cells come out as empty strings. The result length is the
    /// sum of the row lengths.
    pub fn flatten(&self) -> Vec<String> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.text.clone().unwrap_or_default())
            .collect()
    }

    /// Tab-separated plain text representation, one line per row.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialize the table to JSON. Missing cells serialize as `null`.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row, left to right.
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from optional text values.
    pub fn from_values<S: Into<String>>(values: impl IntoIterator<Item = Option<S>>) -> Self {
        Self::new(
            values
                .into_iter()
                .map(|v| match v {
                    Some(text) => TableCell::text(text),
                    None => TableCell::empty(),
                })
                .collect(),
        )
    }

    /// Tab-joined text of the row, missing cells rendered empty.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A single table cell. `text` is `None` when the grid position held no
/// content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content, if any.
    pub text: Option<String>,
}

impl TableCell {
    /// Create a cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Create a missing cell.
    pub fn empty() -> Self {
        Self { text: None }
    }

    /// Check if the cell has no content.
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, |t| t.trim().is_empty())
    }
}
