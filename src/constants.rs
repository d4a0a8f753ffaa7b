//! Application constants for the inflation converter
//!
//! Fixed file locations and the JSON encoding defaults. The converter
//! takes no paths from the command line, so everything it touches is
//! named here.

// =============================================================================
// File Locations
// =============================================================================

/// CSV file read from the working directory
pub const INPUT_FILE_NAME: &str = "inflation_data.csv";

/// Directory (relative to the working directory) receiving the JSON output
pub const OUTPUT_DIR: &str = "src/data";

/// JSON document written inside [`OUTPUT_DIR`]
pub const OUTPUT_FILE_NAME: &str = "inflationData.json";

// =============================================================================
// CSV Parsing
// =============================================================================

/// Cell values read as missing, the default NA set of the pandas export
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Byte order mark stripped from the start of the input
pub const UTF8_BOM: char = '\u{feff}';

// =============================================================================
// JSON Encoding
// =============================================================================

/// Decimal places kept when encoding floating point cells
pub const DEFAULT_DOUBLE_PRECISION: u8 = 10;

/// Largest accepted value for the double precision setting
pub const MAX_DOUBLE_PRECISION: u8 = 15;

/// Escape non-ASCII characters as `\uXXXX` by default
pub const DEFAULT_ENSURE_ASCII: bool = true;

/// Write `/` as `\/` by default
pub const DEFAULT_ESCAPE_FORWARD_SLASHES: bool = true;

// =============================================================================
// Logging
// =============================================================================

/// Log level used when neither `--verbose` nor `--quiet` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Crate target used to build the default tracing filter
pub const LOG_TARGET: &str = "inflation_csv2json";
