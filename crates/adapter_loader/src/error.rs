//! Loader errors.
//!
//! All of these are fatal for a run: they describe an input that could not
//! be read as a whole, as opposed to a single invalid trade.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while reading a trade book or rate table.
///
/// # Examples
/// ```
/// use adapter_loader::LoaderError;
///
/// let err = LoaderError::InvalidRow { row: 2, message: "rate must be > 0".to_string() };
/// assert_eq!(err.to_string(), "row 2: rate must be > 0");
/// ```
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Delimited text is structurally malformed.
    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),

    /// JSON input does not parse.
    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A workbook cannot be opened or read.
    #[error("malformed spreadsheet input: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// TOML input does not parse.
    #[error("malformed TOML input: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON input is not an array of objects.
    #[error("expected a JSON array of objects, found {0}")]
    UnexpectedShape(String),

    /// Delimited input or the first worksheet has no header row.
    #[error("input has no header row")]
    MissingHeader,

    /// A row of a rate table is unusable.
    #[error("row {row}: {message}")]
    InvalidRow {
        /// 0-based data row.
        row: usize,
        /// What is wrong with it.
        message: String,
    },

    /// A required column is absent.
    #[error("missing column '{0}'")]
    MissingColumn(String),
}

impl LoaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoaderError::Io {
            path: path.into(),
            source,
        }
    }
}
