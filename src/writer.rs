//! Index-oriented JSON output.
//!
//! The document is an object keyed by row position (`"0"`, `"1"`, ...) whose
//! values map column names to cells in header order. Encoding is done with
//! serde directly from the [`Table`], so row and column order never pass
//! through a sorted map.

use crate::config::JsonOptions;
use crate::error::{ConvertError, Result};
use crate::models::{Cell, Table};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Create `dir` (one level, not its parents) if it does not exist yet.
///
/// Returns `true` when the directory was created by this call.
pub fn ensure_output_dir(dir: &Path) -> Result<bool> {
    if dir.exists() {
        debug!("Output directory already exists: {}", dir.display());
        return Ok(false);
    }

    fs::create_dir(dir).map_err(|e| ConvertError::filesystem("creating directory", dir, e))?;
    debug!("Created output directory: {}", dir.display());
    Ok(true)
}

/// Encode `table` and write it to `path`, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn write_index_json(table: &Table, path: &Path, options: &JsonOptions) -> Result<u64> {
    let bytes = to_index_json_bytes(table, options)?;

    let mut file =
        File::create(path).map_err(|e| ConvertError::filesystem("creating file", path, e))?;
    file.write_all(&bytes)
        .and_then(|()| file.flush())
        .map_err(|e| ConvertError::filesystem("writing file", path, e))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len() as u64)
}

pub fn to_index_json_string(table: &Table, options: &JsonOptions) -> Result<String> {
    let bytes = to_index_json_bytes(table, options)?;
    String::from_utf8(bytes)
        .map_err(|e| ConvertError::Serialization(serde::ser::Error::custom(e)))
}

pub fn to_index_json_bytes(table: &Table, options: &JsonOptions) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = EscapingFormatter::new(options);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

    IndexOriented::new(table, options.double_precision).serialize(&mut serializer)?;
    Ok(buffer)
}

/// Serializes a table as `{"<row>": {"<column>": value, ...}, ...}`
pub struct IndexOriented<'a> {
    table: &'a Table,
    double_precision: u8,
}

impl<'a> IndexOriented<'a> {
    pub fn new(table: &'a Table, double_precision: u8) -> Self {
        Self {
            table,
            double_precision,
        }
    }
}

impl Serialize for IndexOriented<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut rows = serializer.serialize_map(Some(self.table.height()))?;
        for index in 0..self.table.height() {
            let record = RowRecord {
                table: self.table,
                index,
                double_precision: self.double_precision,
            };
            rows.serialize_entry(&index.to_string(), &record)?;
        }
        rows.end()
    }
}

struct RowRecord<'a> {
    table: &'a Table,
    index: usize,
    double_precision: u8,
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_map(Some(self.table.width()))?;
        for (name, cell) in self.table.row(self.index) {
            record.serialize_entry(name, &EncodedCell::new(cell, self.double_precision))?;
        }
        record.end()
    }
}

struct EncodedCell<'a> {
    cell: &'a Cell,
    double_precision: u8,
}

impl<'a> EncodedCell<'a> {
    fn new(cell: &'a Cell, double_precision: u8) -> Self {
        Self {
            cell,
            double_precision,
        }
    }
}

impl Serialize for EncodedCell<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.cell {
            Cell::Null => serializer.serialize_unit(),
            Cell::Bool(value) => serializer.serialize_bool(*value),
            Cell::Int(value) => serializer.serialize_i64(*value),
            Cell::Float(value) if value.is_finite() => {
                serializer.serialize_f64(round_to_precision(*value, self.double_precision))
            }
            Cell::Float(_) => serializer.serialize_unit(),
            Cell::Str(value) => serializer.serialize_str(value),
        }
    }
}

/// Round to `precision` decimal places through decimal formatting
fn round_to_precision(value: f64, precision: u8) -> f64 {
    format!("{:.*}", usize::from(precision), value)
        .parse()
        .unwrap_or(value)
}

/// Compact JSON formatter that can escape non-ASCII characters and `/`
#[derive(Debug, Clone, Copy)]
pub struct EscapingFormatter {
    ensure_ascii: bool,
    escape_forward_slashes: bool,
}

impl EscapingFormatter {
    pub fn new(options: &JsonOptions) -> Self {
        Self {
            ensure_ascii: options.ensure_ascii,
            escape_forward_slashes: options.escape_forward_slashes,
        }
    }

    fn needs_escape(&self, ch: char) -> bool {
        (self.ensure_ascii && !ch.is_ascii()) || (self.escape_forward_slashes && ch == '/')
    }
}

impl Formatter for EscapingFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (offset, ch) in fragment.char_indices() {
            if !self.needs_escape(ch) {
                continue;
            }

            writer.write_all(&fragment.as_bytes()[start..offset])?;
            if ch == '/' {
                writer.write_all(b"\\/")?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units).iter() {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
            start = offset + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}
