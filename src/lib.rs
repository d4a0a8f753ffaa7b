//! Inflation CSV to JSON converter
//!
//! Reads `inflation_data.csv`, infers a type for every column and writes the
//! rows to `src/data/inflationData.json` as an object keyed by row index:
//!
//! ```text
//! year,rate            {"0":{"year":2020,"rate":1.2},
//! 2020,1.2      ==>     "1":{"year":2021,"rate":4.7}}
//! 2021,4.7
//! ```
//!
//! The pipeline is a single synchronous pass: read, ensure the output
//! directory, write. Any failure aborts the run.

pub mod cli;
pub mod config;
pub mod constants;
pub mod converter;
pub mod error;
pub mod models;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use config::{ConverterConfig, JsonOptions};
pub use converter::Converter;
pub use error::{ConvertError, Result};
pub use models::{Cell, ConversionStats, Table, TableColumn};
