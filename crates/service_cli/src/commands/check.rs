//! Check command implementation
//!
//! Runs the validation gatekeeper alone and lists the rejections.

use std::path::Path;

use adapter_loader::load_trades;
use pricer_risk::pipeline::{validate_batch, ValidationOutcome};
use tracing::info;

use super::price::ensure_exists;
use crate::config::RunConfig;
use crate::Result;

/// Accepted and rejected counts of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckCounts {
    /// Records that passed validation.
    pub accepted: usize,
    /// Records that failed.
    pub rejected: usize,
}

/// Run the check command
pub fn run(input: &Path, config: &RunConfig) -> Result<CheckCounts> {
    info!("Checking {}", input.display());
    ensure_exists(input)?;

    let records = load_trades(input)?;
    let parallel = config.pipeline_config()?.parallel;
    let ValidationOutcome { accepted, rejected } = validate_batch(&records, &parallel);

    println!("{} accepted, {} rejected", accepted.len(), rejected.len());
    for (_, entry) in &rejected {
        println!(
            "  {} (row {}): {} {}",
            entry.trade_id,
            entry.row_index,
            entry.reason.code(),
            entry.reason
        );
    }

    Ok(CheckCounts {
        accepted: accepted.len(),
        rejected: rejected.len(),
    })
}
