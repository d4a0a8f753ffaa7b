//! CSV reading with column type inference.
//!
//! polars handles the CSV grammar (quoting, CRLF, ragged rows) and reads
//! every column as text, with the pandas NA tokens mapped to null. Each
//! column is then typed from all of its values:
//!
//! - every value an integer → `Int` (values beyond i64 push the column to `Float`)
//! - every value numeric → `Float`
//! - every value `true`/`false` in any case → `Bool`
//! - anything else → `Str`, kept verbatim
//!
//! Numeric and boolean checks ignore surrounding whitespace. Blank lines
//! outside quoted fields are dropped before parsing.

use crate::constants::{NA_VALUES, UTF8_BOM};
use crate::error::{ConvertError, Result};
use crate::models::{Cell, Table, TableColumn};
use polars::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Read a CSV file with a header line into a [`Table`]
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.is_file() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let parse_error = |source: PolarsError| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let bytes = fs::read(path).map_err(|e| ConvertError::filesystem("reading file", path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        parse_error(PolarsError::ComputeError(
            format!("input is not valid UTF-8: {}", e).into(),
        ))
    })?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);
    let text = drop_blank_lines(text);

    let df = parse_csv(&text).map_err(parse_error)?;

    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    let columns = df
        .get_columns()
        .iter()
        .map(|column| -> Result<TableColumn> {
            let cells = column_cells(column).map_err(parse_error)?;
            Ok(TableColumn::new(column.name().to_string(), cells))
        })
        .collect::<Result<Vec<TableColumn>>>()?;

    Table::from_columns(columns)
}

fn parse_csv(text: &str) -> PolarsResult<DataFrame> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|parse| {
            parse.with_null_values(Some(NullValues::AllColumns(na_values())))
        });

    let mut cursor = Cursor::new(text.as_bytes());
    CsvReader::new(&mut cursor).with_options(options).finish()
}

fn na_values() -> Vec<PlSmallStr> {
    NA_VALUES
        .iter()
        .map(|value| PlSmallStr::from_static(*value))
        .collect()
}

/// Remove empty and whitespace-only lines that are not inside a quoted field
fn drop_blank_lines(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut in_quotes = false;

    for line in text.split_inclusive('\n') {
        if in_quotes || !line.trim().is_empty() {
            kept.push_str(line);
        }
        // "" escapes toggle twice, so parity tracks the open quote
        if line.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }
    kept
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Empty,
    Int,
    Float,
    Bool,
    Text,
}

fn infer_kind(values: &[Option<&str>]) -> ColumnKind {
    let mut present = values
        .iter()
        .filter_map(|value| value.map(str::trim))
        .filter(|value| !value.is_empty())
        .peekable();

    if present.peek().is_none() {
        return ColumnKind::Empty;
    }

    let (mut int, mut float, mut boolean) = (true, true, true);
    for value in present {
        int = int && value.parse::<i64>().is_ok();
        float = float && value.parse::<f64>().is_ok();
        boolean = boolean && parse_bool(value).is_some();
        if !int && !float && !boolean {
            return ColumnKind::Text;
        }
    }

    if int {
        ColumnKind::Int
    } else if float {
        ColumnKind::Float
    } else {
        ColumnKind::Bool
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Trimmed, non-empty content of a cell
fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Convert one text column into typed cells
fn column_cells(column: &Column) -> PolarsResult<Vec<Cell>> {
    let as_text = match column.dtype() {
        DataType::String => column.clone(),
        _ => column.cast(&DataType::String)?,
    };
    let values: Vec<Option<&str>> = as_text.str()?.into_iter().collect();

    let kind = infer_kind(&values);
    debug!("Column '{}' typed as {:?}", column.name(), kind);

    let cells = match kind {
        ColumnKind::Empty => vec![Cell::Null; values.len()],
        ColumnKind::Int => values
            .iter()
            .map(|v| Cell::from(trimmed(*v).and_then(|s| s.parse::<i64>().ok())))
            .collect(),
        ColumnKind::Float => values
            .iter()
            .map(|v| Cell::from(trimmed(*v).and_then(|s| s.parse::<f64>().ok())))
            .collect(),
        ColumnKind::Bool => values
            .iter()
            .map(|v| Cell::from(trimmed(*v).and_then(parse_bool)))
            .collect(),
        ColumnKind::Text => values.iter().map(|v| Cell::from(*v)).collect(),
    };
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, contents: impl AsRef<[u8]>) -> std::path::PathBuf {
        let path = dir.path().join("inflation_data.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    fn read_str(contents: &str) -> Table {
        let dir = TempDir::new().unwrap();
        read_table(&write_csv(&dir, contents)).unwrap()
    }

    #[test]
    fn test_infers_integer_and_float_columns() {
        let table = read_str("year,rate\n2020,1.2\n2021,4.7\n");

        assert_eq!(table.column_names(), vec!["year", "rate"]);
        assert_eq!(table.height(), 2);
        assert_eq!(
            table.columns()[0].cells,
            vec![Cell::Int(2020), Cell::Int(2021)]
        );
        assert_eq!(
            table.columns()[1].cells,
            vec![Cell::Float(1.2), Cell::Float(4.7)]
        );
    }

    #[test]
    fn test_mixed_numeric_column_becomes_float() {
        let table = read_str("value\n1\n2.5\n");

        assert_eq!(
            table.columns()[0].cells,
            vec![Cell::Float(1.0), Cell::Float(2.5)]
        );
    }

    #[test]
    fn test_integer_beyond_i64_becomes_float() {
        let table = read_str("v\n99999999999999999999\n3\n");

        assert_eq!(
            table.columns()[0].cells,
            vec![Cell::Float(1e20), Cell::Float(3.0)]
        );
    }

    #[test]
    fn test_empty_cells_are_null() {
        let table = read_str("year,rate\n2020,\n2021,4.7\n");

        assert_eq!(
            table.columns()[1].cells,
            vec![Cell::Null, Cell::Float(4.7)]
        );
    }

    #[test]
    fn test_na_tokens_are_null() {
        let table = read_str("year,rate,note\n2020,NA,None\n2021,4.7,ok\n2022,NaN,null\n");

        assert_eq!(
            table.columns()[1].cells,
            vec![Cell::Null, Cell::Float(4.7), Cell::Null]
        );
        assert_eq!(
            table.columns()[2].cells,
            vec![Cell::Null, Cell::Str("ok".to_string()), Cell::Null]
        );
    }

    #[test]
    fn test_numbers_with_surrounding_whitespace() {
        let table = read_str("v,w\n 1.5,label \n2 , x\n");

        assert_eq!(
            table.columns()[0].cells,
            vec![Cell::Float(1.5), Cell::Float(2.0)]
        );
        assert_eq!(
            table.columns()[1].cells,
            vec![Cell::Str("label ".to_string()), Cell::Str(" x".to_string())]
        );
    }

    #[test]
    fn test_trailing_blank_lines_are_skipped() {
        let table = read_str("year,rate\n2020,1.2\n\n\n");

        assert_eq!(table.height(), 1);
        assert_eq!(table.columns()[0].cells, vec![Cell::Int(2020)]);
    }

    #[test]
    fn test_interior_blank_line_is_skipped() {
        let table = read_str("year,rate\n2020,1.2\n\n2021,4.7");

        assert_eq!(table.height(), 2);
        assert_eq!(
            table.columns()[0].cells,
            vec![Cell::Int(2020), Cell::Int(2021)]
        );
    }

    #[test]
    fn test_whitespace_only_line_is_skipped() {
        let table = read_str("year,rate\n2020,1.2\n   \n");

        assert_eq!(table.height(), 1);
        assert_eq!(table.columns()[0].cells, vec![Cell::Int(2020)]);
        assert_eq!(table.columns()[1].cells, vec![Cell::Float(1.2)]);
    }

    #[test]
    fn test_row_of_empty_fields_is_kept() {
        let table = read_str("year,rate\n2020,1.2\n,\n");

        assert_eq!(table.height(), 2);
        assert_eq!(
            table.columns()[0].cells,
            vec![Cell::Int(2020), Cell::Null]
        );
    }

    #[test]
    fn test_blank_line_inside_quoted_field_is_kept() {
        let table = read_str("year,note\n2020,\"first\n\nsecond\"\n2021,plain\n");

        assert_eq!(table.height(), 2);
        assert_eq!(
            table.columns()[1].cells,
            vec![
                Cell::Str("first\n\nsecond".to_string()),
                Cell::Str("plain".to_string())
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = read_str("year,rate\r\n2020,1.2\r\n\r\n2021,4.7\r\n");

        assert_eq!(table.column_names(), vec!["year", "rate"]);
        assert_eq!(
            table.columns()[0].cells,
            vec![Cell::Int(2020), Cell::Int(2021)]
        );
        assert_eq!(
            table.columns()[1].cells,
            vec![Cell::Float(1.2), Cell::Float(4.7)]
        );
    }

    #[test]
    fn test_byte_order_mark_is_not_part_of_header() {
        let table = read_str("\u{feff}year,rate\n2020,1.2\n");

        assert_eq!(table.column_names(), vec!["year", "rate"]);
        assert_eq!(table.columns()[0].cells, vec![Cell::Int(2020)]);
    }

    #[test]
    fn test_text_and_quoted_commas() {
        let table = read_str("country,note\nIndia,\"base year, 2010\"\nNepal,plain\n");

        assert_eq!(
            table.columns()[1].cells,
            vec![
                Cell::Str("base year, 2010".to_string()),
                Cell::Str("plain".to_string())
            ]
        );
    }

    #[test]
    fn test_boolean_column() {
        let table = read_str("year,estimated\n2020,true\n2021,False\n");

        assert_eq!(
            table.columns()[1].cells,
            vec![Cell::Bool(true), Cell::Bool(false)]
        );
    }

    #[test]
    fn test_leading_zeros_in_integer_column() {
        let table = read_str("code\n007\n12\n");

        assert_eq!(table.columns()[0].cells, vec![Cell::Int(7), Cell::Int(12)]);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inflation_data.csv");

        match read_table(&path) {
            Err(ConvertError::FileNotFound { path: missing }) => assert_eq!(missing, path),
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, b"year,note\n2020,caf\xe9\n".to_vec());

        match read_table(&path) {
            Err(ConvertError::Parse { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_row_with_extra_fields_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "year,rate\n2020,1.2,extra\n");

        match read_table(&path) {
            Err(ConvertError::Parse { .. }) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind(&[None, Some("")]), ColumnKind::Empty);
        assert_eq!(infer_kind(&[Some("1"), None, Some(" 2 ")]), ColumnKind::Int);
        assert_eq!(infer_kind(&[Some("1"), Some("2e3")]), ColumnKind::Float);
        assert_eq!(infer_kind(&[Some("TRUE"), Some("false")]), ColumnKind::Bool);
        assert_eq!(infer_kind(&[Some("1"), Some("true")]), ColumnKind::Text);
    }

    #[test]
    fn test_drop_blank_lines() {
        assert_eq!(drop_blank_lines("a\n\n \t\nb\n"), "a\nb\n");
        assert_eq!(drop_blank_lines("a\n\"x\n\ny\"\n"), "a\n\"x\n\ny\"\n");
        assert_eq!(drop_blank_lines(",\n"), ",\n");
    }
}
