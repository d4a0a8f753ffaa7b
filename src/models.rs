//! Core data structures for the conversion pipeline.
//!
//! A [`Table`] is stored column-major, the way the CSV reader hands it
//! over, and viewed row by row when it is encoded.

use crate::error::{ConvertError, Result};
use std::path::PathBuf;

/// A single typed CSV value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Cell::Null, Cell::Int)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Null, Cell::Float)
    }
}

impl From<Option<bool>> for Cell {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Cell::Null, Cell::Bool)
    }
}

impl From<Option<&str>> for Cell {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Cell::Null, |s| Cell::Str(s.to_string()))
    }
}

/// One named column and its cells in file order
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl TableColumn {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// In-memory table whose columns all have the same number of cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<TableColumn>,
    height: usize,
}

impl Table {
    /// Build a table, rejecting columns of unequal length
    pub fn from_columns(columns: Vec<TableColumn>) -> Result<Self> {
        let height = columns.first().map_or(0, |c| c.cells.len());

        if let Some(bad) = columns.iter().find(|c| c.cells.len() != height) {
            return Err(ConvertError::InconsistentTable {
                column: bad.name.clone(),
                expected: height,
                found: bad.cells.len(),
            });
        }

        Ok(Self { columns, height })
    }

    /// Number of data rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Column names in header order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// `(column name, cell)` pairs of row `index` in header order
    pub fn row(&self, index: usize) -> impl Iterator<Item = (&str, &Cell)> + '_ {
        self.columns
            .iter()
            .filter_map(move |c| c.cells.get(index).map(|cell| (c.name.as_str(), cell)))
    }
}

/// Summary of a completed conversion run
#[derive(Debug, Clone)]
pub struct ConversionStats {
    pub rows_written: usize,
    pub columns: usize,
    pub output_path: PathBuf,
    pub bytes_written: u64,
    pub created_output_dir: bool,
    pub processing_time_ms: u128,
}
