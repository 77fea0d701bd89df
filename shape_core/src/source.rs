//! Tabular Sources
//!
//! The catalog builder never reads files itself. Whatever decodes a shape
//! table (spreadsheet, CSV, an embedded table) hands it over through the
//! [`TabularSource`] trait: an identifier, a header row, and data rows.
//!
//! The first header column names the section-name column (e.g.
//! "AISC_Manual_Label"); every remaining column is a property.
//!
//! ## Example
//!
//! ```rust
//! use shape_core::source::{Cell, MemoryTable, TabularSource};
//!
//! let table = MemoryTable::new("shape files/W_shapes.xlsx", ["Label", "d", "weight"])
//!     .with_row(vec![Cell::from("W12X26"), Cell::from(12.2), Cell::from(26.0)]);
//!
//! assert_eq!(table.header().len(), 3);
//! assert_eq!(table.rows().count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A raw cell as delivered by a tabular reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Cell the reader already decoded as a number
    Number(f64),
    /// Cell delivered as text (may still hold a numeric literal)
    Text(String),
}

impl Cell {
    /// Check if the cell is empty text
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// A table of shape data handed to the catalog builder.
pub trait TabularSource {
    /// Identifier of the table, usually its file name
    fn identifier(&self) -> &str;

    /// Ordered column names; the first is the section-name column
    fn header(&self) -> &[String];

    /// Data rows in table order
    fn rows(&self) -> Box<dyn Iterator<Item = &[Cell]> + '_>;
}

/// Owned, in-memory table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryTable {
    identifier: String,
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl MemoryTable {
    /// Create an empty table with the given header
    pub fn new<I, S>(identifier: impl Into<String>, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryTable {
            identifier: identifier.into(),
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builder-style row append
    pub fn with_row(mut self, row: Vec<Cell>) -> Self {
        self.rows.push(row);
        self
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TabularSource for MemoryTable {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn header(&self) -> &[String] {
        &self.header
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &[Cell]> + '_> {
        Box::new(self.rows.iter().map(Vec::as_slice))
    }
}

/// Derive a family name from a source identifier.
///
/// Directory components and the extension are dropped:
/// `"shape files/W_shapes.xlsx"` becomes `"W_shapes"`. An identifier with
/// no file stem is returned unchanged.
pub fn family_name_from_identifier(identifier: &str) -> String {
    Path::new(identifier)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(identifier)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_name_from_identifier() {
        assert_eq!(family_name_from_identifier("shape files/W_shapes.xlsx"), "W_shapes");
        assert_eq!(family_name_from_identifier("C_shapes.csv"), "C_shapes");
        assert_eq!(family_name_from_identifier("L_shapes"), "L_shapes");
        assert_eq!(family_name_from_identifier(""), "");
    }

    #[test]
    fn test_memory_table_rows() {
        let mut table = MemoryTable::new("HSS.csv", ["Label", "Ht", "B"]);
        assert!(table.is_empty());

        table.push_row(vec!["HSS8X8X1/2".into(), 8.0.into(), 8.0.into()]);
        table.push_row(vec!["HSS6X4X1/4".into(), 6.0.into(), 4.0.into()]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.identifier(), "HSS.csv");
        let first: Vec<&[Cell]> = table.rows().collect();
        assert_eq!(first[0][0], Cell::from("HSS8X8X1/2"));
        assert_eq!(first[1][2], Cell::Number(4.0));
    }

    #[test]
    fn test_cell_blank() {
        assert!(Cell::from("   ").is_blank());
        assert!(Cell::from("").is_blank());
        assert!(!Cell::from("W8X10").is_blank());
        assert!(!Cell::from(0.0).is_blank());
    }
}
