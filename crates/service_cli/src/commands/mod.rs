//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod price;

use clap::ValueEnum;

/// Terminal output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table.
    #[default]
    Table,
    /// Run summary and groupings as JSON.
    Json,
    /// Trade-level CSV.
    Csv,
}
