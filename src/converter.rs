//! Conversion pipeline.
//!
//! Runs read, ensure-directory and write in that order. The input is parsed
//! completely before anything is created on disk, so a missing or malformed
//! CSV leaves no output directory or file behind.

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::models::ConversionStats;
use crate::reader::read_table;
use crate::writer::{ensure_output_dir, write_index_json};
use std::time::Instant;
use tracing::{debug, info};

/// Converts the inflation CSV into the index-oriented JSON document
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    /// Create a converter after validating `config`
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the whole pipeline once
    pub fn run(&self) -> Result<ConversionStats> {
        let start_time = Instant::now();
        let input_path = self.config.input_path();
        let output_dir = self.config.output_dir_path();
        let output_path = self.config.output_path();

        // Step 1: Load the CSV
        debug!("Reading {}", input_path.display());
        let table = read_table(&input_path)?;

        // Step 2: Make sure the output directory exists
        let created_output_dir = ensure_output_dir(&output_dir)?;

        // Step 3: Encode and overwrite the output file
        let bytes_written = write_index_json(&table, &output_path, &self.config.json)?;

        let stats = ConversionStats {
            rows_written: table.height(),
            columns: table.width(),
            output_path,
            bytes_written,
            created_output_dir,
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "Converted {} rows x {} columns from {} to {} ({} bytes, {}ms)",
            stats.rows_written,
            stats.columns,
            input_path.display(),
            stats.output_path.display(),
            stats.bytes_written,
            stats.processing_time_ms
        );

        Ok(stats)
    }
}
