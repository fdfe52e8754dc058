//! CLI error types.

use adapter_loader::LoaderError;
use pricer_risk::{AggregationInputError, RiskError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a CLI run.
///
/// Per-trade problems never surface here; they become rejections.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trade book or rate table could not be loaded.
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Rate table rejected a rate.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Bad `--group-by` selector.
    #[error(transparent)]
    Grouping(#[from] AggregationInputError),

    /// Writing a report tab failed.
    #[error("Failed to write report: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the report workbook failed.
    #[error("Failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// Serialising JSON output failed.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
