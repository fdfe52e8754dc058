//! # Adapter Loader
//!
//! Ingestion for the FX option risk engine.
//!
//! Turns files on disk into the raw, unvalidated inputs of the pricing
//! pipeline:
//! - [`load_trades`]: a trade book (JSON array, spreadsheet workbook, CSV,
//!   TSV or semicolon separated) into [`RawRecord`](pricer_models::validation::RawRecord)s
//! - [`load_rates`]: an FX rate table (CSV or TOML) into `(currency, rate to USD)` pairs
//!
//! Only file-level problems are errors here. A row with a bad value is still
//! loaded and left for the validation gatekeeper to reject.
//!
//! ## Usage
//!
//! ```no_run
//! use adapter_loader::{load_rates, load_trades};
//!
//! let records = load_trades("book.csv")?;
//! let rates = load_rates("rates.toml")?;
//! println!("{} rows, {} rates", records.len(), rates.len());
//! # Ok::<(), adapter_loader::LoaderError>(())
//! ```

#![warn(clippy::all)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod rates;
pub mod trades;
pub mod workbook;

pub use error::LoaderError;
pub use rates::{load_rates, parse_rates_csv, parse_rates_toml};
pub use trades::{detect_delimiter, load_trades, parse_delimited, parse_json};
pub use workbook::parse_workbook;
