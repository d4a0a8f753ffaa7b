//! Configuration management and validation.
//!
//! The converter has no user-facing configuration: [`ConverterConfig::default`]
//! reproduces the fixed paths and encoding settings. The struct exists so the
//! pipeline can be rooted somewhere other than the working directory.

use crate::constants::{
    DEFAULT_DOUBLE_PRECISION, DEFAULT_ENSURE_ASCII, DEFAULT_ESCAPE_FORWARD_SLASHES,
    INPUT_FILE_NAME, MAX_DOUBLE_PRECISION, OUTPUT_DIR, OUTPUT_FILE_NAME,
};
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// JSON encoding options, matching the defaults of the original data export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOptions {
    /// Decimal places kept for floating point cells
    pub double_precision: u8,

    /// Escape every non-ASCII character as `\uXXXX`
    pub ensure_ascii: bool,

    /// Write `/` as `\/`
    pub escape_forward_slashes: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            double_precision: DEFAULT_DOUBLE_PRECISION,
            ensure_ascii: DEFAULT_ENSURE_ASCII,
            escape_forward_slashes: DEFAULT_ESCAPE_FORWARD_SLASHES,
        }
    }
}

/// Locations and encoding settings for one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Directory every other path is resolved against
    pub root_dir: PathBuf,

    /// CSV file name inside `root_dir`
    pub input_file: String,

    /// Output directory relative to `root_dir`
    pub output_dir: PathBuf,

    /// JSON file name inside `output_dir`
    pub output_file: String,

    /// JSON encoding options
    pub json: JsonOptions,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            input_file: INPUT_FILE_NAME.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            output_file: OUTPUT_FILE_NAME.to_string(),
            json: JsonOptions::default(),
        }
    }
}

impl ConverterConfig {
    /// Default configuration resolved against `root_dir` instead of `.`
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.root_dir.join(&self.input_file)
    }

    pub fn output_dir_path(&self) -> PathBuf {
        self.root_dir.join(&self.output_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir_path().join(&self.output_file)
    }

    /// Check file names and encoding options before any I/O happens
    pub fn validate(&self) -> Result<()> {
        validate_file_name("input_file", &self.input_file)?;
        validate_file_name("output_file", &self.output_file)?;

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConvertError::configuration("output_dir must not be empty"));
        }

        if self.json.double_precision > MAX_DOUBLE_PRECISION {
            return Err(ConvertError::configuration(format!(
                "double_precision must be at most {}, got {}",
                MAX_DOUBLE_PRECISION, self.json.double_precision
            )));
        }

        debug!(
            "Configuration valid: input={}, output={}",
            self.input_path().display(),
            self.output_path().display()
        );
        Ok(())
    }
}

/// A file name must be a single normal path component
fn validate_file_name(field: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConvertError::configuration(format!(
            "{} must not be empty",
            field
        )));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ConvertError::configuration(format!(
            "{} must be a plain file name, got '{}'",
            field, name
        ))),
    }
}
