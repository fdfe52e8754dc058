//! Price command implementation
//!
//! Loads a trade book, runs validate → price → normalise → aggregate, writes
//! the report directory and prints a summary.

use std::io;
use std::path::{Path, PathBuf};

use adapter_loader::{load_rates, load_trades};
use pricer_risk::aggregation::{GroupKey, PortfolioSummary};
use pricer_risk::normalization::FxRateTable;
use pricer_risk::pipeline::{run_portfolio, PortfolioRun};
use serde::Serialize;
use tracing::{info, warn};

use super::OutputFormat;
use crate::config::RunConfig;
use crate::report::{self, RunSummary};
use crate::{CliError, Result};

/// Arguments of `fxrisk price`.
#[derive(Debug, Clone)]
pub struct PriceArgs {
    /// Trade book.
    pub input: PathBuf,
    /// Optional FX rate table.
    pub rates: Option<PathBuf>,
    /// Report directory.
    pub output: PathBuf,
    /// `--group-by` lists; each replaces the configured groupings.
    pub group_by: Vec<String>,
    /// Terminal output format.
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: RunSummary,
    groupings: &'a [PortfolioSummary],
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &RunConfig) -> Result<PortfolioRun> {
    info!("Starting pricing...");
    info!("  Input: {}", args.input.display());
    info!("  Output directory: {}", args.output.display());

    ensure_exists(&args.input)?;
    let records = load_trades(&args.input)?;

    let mut pipeline = config.pipeline_config()?;
    let rates = match &args.rates {
        Some(path) => {
            ensure_exists(path)?;
            FxRateTable::from_rates(load_rates(path)?)?
        }
        None => {
            if !pipeline.imply_rates {
                warn!("No rate file given; implying rates from trade spots");
            }
            pipeline.imply_rates = true;
            FxRateTable::new()
        }
    };

    if !args.group_by.is_empty() {
        pipeline.groupings = args
            .group_by
            .iter()
            .map(|list| GroupKey::parse_list(list))
            .collect::<std::result::Result<_, _>>()?;
    }

    let run = run_portfolio(&records, &rates, &pipeline);
    report::write_report(&args.output, &run, pipeline.policy)?;

    match args.format {
        OutputFormat::Table => print!("{}", report::render_table(&run)),
        OutputFormat::Json => {
            let output = JsonOutput {
                summary: RunSummary::from_run(&run, pipeline.policy),
                groupings: &run.summaries,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => report::write_trade_level(io::stdout().lock(), &run)?,
    }

    info!("Pricing complete");
    Ok(run)
}

pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.display().to_string()))
    }
}
