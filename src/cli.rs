//! Command-line interface components.
//!
//! The converter takes no inputs from the command line. The flags here only
//! control how much it logs.

use crate::config::ConverterConfig;
use crate::constants::{DEFAULT_LOG_LEVEL, LOG_TARGET};
use crate::converter::Converter;
use crate::models::ConversionStats;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "inflation_csv2json")]
#[command(
    about = "Convert inflation_data.csv into src/data/inflationData.json (index orientation)"
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            DEFAULT_LOG_LEVEL
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Convert using the fixed default locations
pub fn run(args: &Args) -> Result<ConversionStats> {
    setup_logging(args)?;

    let config = ConverterConfig::default();
    let converter = Converter::new(config).context("Invalid converter configuration")?;

    converter
        .run()
        .context("Failed to convert inflation data to JSON")
}
