//! End-to-end portfolio pipeline.
//!
//! Raw records flow through validate → price → normalise independently, on
//! the rayon pool once the batch reaches the parallel threshold. Results are
//! collected in input order and reduced once by the aggregator, so totals do
//! not depend on worker scheduling.
//!
//! # Rejections
//!
//! | Stage | Code |
//! |-------|------|
//! | Gatekeeper | validation codes |
//! | Duplicate trade id (second and later) | `DUPLICATE_TRADE_ID` |
//! | Pricing, degenerate inputs | `DEGENERATE_MARKET_INPUTS` |
//! | Normalisation, no rate | `MISSING_FX_RATE` |
//!
//! A run where every trade is rejected is still a valid run with zero totals.

use std::collections::HashSet;

use pricer_core::types::{Currency, PricingError};
use pricer_models::instruments::FxOptionTrade;
use pricer_models::validation::{validate, RawRecord, RejectionCode, RejectionReason};
use pricer_pricing::{DegeneratePolicy, PricingEngine};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregation::{aggregate, GroupKey, GroupTotals, PortfolioSummary};
use crate::error::RiskError;
use crate::normalization::{normalize, FxRateTable, NormalizedTrade};
use crate::parallel::ParallelConfig;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// What to do with degenerate market inputs.
    pub policy: DegeneratePolicy,
    /// Fill missing USD rates from the spot of USD-leg trades.
    pub imply_rates: bool,
    /// Parallel execution settings.
    pub parallel: ParallelConfig,
    /// One summary is produced per grouping.
    pub groupings: Vec<Vec<GroupKey>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            policy: DegeneratePolicy::Reject,
            imply_rates: true,
            parallel: ParallelConfig::default(),
            groupings: vec![vec![GroupKey::CurrencyPair], vec![GroupKey::QuoteCurrency]],
        }
    }
}

/// A record that did not make it into the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEntry {
    /// Trade id, or `Row_<index>` when the record has none.
    pub trade_id: String,
    /// 0-based source row.
    pub row_index: usize,
    /// Why the record was rejected.
    pub reason: RejectionReason,
    /// The record as received.
    pub record: RawRecord,
}

impl RejectedEntry {
    fn new(record: &RawRecord, reason: RejectionReason) -> Self {
        Self {
            trade_id: record.identifier(),
            row_index: record.row_index(),
            reason,
            record: record.clone(),
        }
    }
}

/// Outcome of validating a batch without pricing it.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Accepted trades with their position in the input.
    pub accepted: Vec<(usize, FxOptionTrade)>,
    /// Rejected records with their position in the input.
    pub rejected: Vec<(usize, RejectedEntry)>,
}

/// Validates a batch and rejects duplicate trade ids.
///
/// The first valid trade claiming an id keeps it; later valid trades with
/// the same id are rejected with `DUPLICATE_TRADE_ID`.
pub fn validate_batch(records: &[RawRecord], parallel: &ParallelConfig) -> ValidationOutcome {
    let results = parallel.map(records, validate);

    let mut outcome = ValidationOutcome::default();
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());

    for (position, (record, result)) in records.iter().zip(results).enumerate() {
        match result {
            Ok(trade) if !seen.insert(trade.trade_id().to_string()) => {
                let reason = RejectionReason::new(
                    RejectionCode::DuplicateTradeId,
                    format!("duplicate trade id '{}'", trade.trade_id()),
                );
                outcome.rejected.push((position, RejectedEntry::new(record, reason)));
            }
            Ok(trade) => outcome.accepted.push((position, trade)),
            Err(reason) => outcome.rejected.push((position, RejectedEntry::new(record, reason))),
        }
    }

    outcome
}

/// Result of a full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioRun {
    /// Number of input records.
    pub input_count: usize,
    /// Normalised trades in input order.
    pub trades: Vec<NormalizedTrade>,
    /// Rejected records in input order.
    pub rejected: Vec<RejectedEntry>,
    /// One summary per configured grouping.
    pub summaries: Vec<PortfolioSummary>,
    /// Grand total over all accepted trades.
    pub total: GroupTotals,
    /// Rates implied from trade spots during this run.
    #[serde(skip)]
    pub implied_rates: Vec<(Currency, f64)>,
}

impl PortfolioRun {
    /// Number of priced and normalised trades.
    pub fn valid_count(&self) -> usize {
        self.trades.len()
    }

    /// Number of rejected records.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

fn pricing_rejection(err: PricingError) -> RejectionReason {
    let code = match err {
        PricingError::InvalidInput(_) => RejectionCode::OutOfRange,
        PricingError::DegenerateMarketInputs(_) => RejectionCode::DegenerateMarketInputs,
    };
    RejectionReason::new(code, err.to_string())
}

fn rate_rejection(err: RiskError) -> RejectionReason {
    RejectionReason::new(RejectionCode::MissingFxRate, err.to_string())
}

fn log_rejection(entry: &RejectedEntry) {
    warn!(
        trade_id = %entry.trade_id,
        row = entry.row_index,
        code = %entry.reason.code(),
        "Trade rejected: {}",
        entry.reason
    );
}

/// Runs validate → price → normalise → aggregate over a batch of records.
///
/// # Examples
///
/// ```
/// use pricer_models::validation::RawRecord;
/// use pricer_risk::normalization::FxRateTable;
/// use pricer_risk::pipeline::{run_portfolio, PipelineConfig};
///
/// let records = vec![
///     RawRecord::new(0)
///         .with("trade_id", "T1")
///         .with("currency_pair", "USD/JPY")
///         .with("notional", 1_000_000.0)
///         .with("notional_currency", "USD")
///         .with("strike", 150.0)
///         .with("spot", 148.0)
///         .with("volatility", 0.10)
///         .with("domestic_rate", 0.05)
///         .with("foreign_rate", 0.001)
///         .with("time_to_expiry", 0.5)
///         .with("option_type", "call"),
///     RawRecord::new(1).with("trade_id", "T2"),
/// ];
///
/// let run = run_portfolio(&records, &FxRateTable::new(), &PipelineConfig::default());
/// assert_eq!(run.valid_count(), 1);
/// assert_eq!(run.rejected_count(), 1);
/// assert_eq!(run.total.trade_count, 1);
/// ```
pub fn run_portfolio(
    records: &[RawRecord],
    rates: &FxRateTable,
    config: &PipelineConfig,
) -> PortfolioRun {
    info!(records = records.len(), "Validating trades");
    let ValidationOutcome { accepted, mut rejected } = validate_batch(records, &config.parallel);
    info!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "Validation complete"
    );

    let mut table = rates.clone();
    let implied_rates = if config.imply_rates {
        let implied = table.imply_from_trades(accepted.iter().map(|(_, t)| t));
        for (currency, rate) in &implied {
            debug!(currency = %currency, rate, "Implied FX rate from trade spot");
        }
        implied
    } else {
        Vec::new()
    };

    let engine = PricingEngine::new(config.policy);
    let table = &table;
    let results = config.parallel.map_owned(accepted, |(position, trade)| {
        let outcome = engine
            .price(&trade)
            .map_err(pricing_rejection)
            .and_then(|priced| normalize(priced, table).map_err(rate_rejection));
        (position, outcome)
    });

    let mut trades = Vec::with_capacity(results.len());
    for (position, outcome) in results {
        match outcome {
            Ok(normalized) => trades.push(normalized),
            Err(reason) => rejected.push((position, RejectedEntry::new(&records[position], reason))),
        }
    }
    rejected.sort_by_key(|(position, _)| *position);
    let rejected: Vec<RejectedEntry> = rejected.into_iter().map(|(_, entry)| entry).collect();
    rejected.iter().for_each(log_rejection);

    let summaries: Vec<PortfolioSummary> = config
        .groupings
        .iter()
        .map(|keys| aggregate(&trades, keys))
        .collect();
    let total = aggregate(&trades, &[]).total();

    info!(
        valid = trades.len(),
        rejected = rejected.len(),
        pv_usd = total.pv_usd,
        delta_usd = total.delta_usd,
        vega_usd = total.vega_usd,
        "Portfolio aggregated"
    );

    PortfolioRun {
        input_count: records.len(),
        trades,
        rejected,
        summaries,
        total,
        implied_rates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(row: usize, id: &str, pair: &str, notional_ccy: &str, spot: f64) -> RawRecord {
        RawRecord::new(row)
            .with("trade_id", id)
            .with("currency_pair", pair)
            .with("notional", 1_000_000.0)
            .with("notional_currency", notional_ccy)
            .with("strike", spot * 1.01)
            .with("spot", spot)
            .with("volatility", 0.1)
            .with("domestic_rate", 0.03)
            .with("foreign_rate", 0.01)
            .with("time_to_expiry", 0.5)
            .with("option_type", "put")
    }

    #[test]
    fn test_duplicate_trade_ids() {
        let records = vec![
            record(0, "A", "EUR/USD", "EUR", 1.08),
            record(1, "A", "EUR/USD", "EUR", 1.08),
            record(2, "B", "EUR/USD", "EUR", 1.08),
        ];
        let outcome = validate_batch(&records, &ParallelConfig::default());
        assert_eq!(outcome.accepted.len(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        let (position, entry) = &outcome.rejected[0];
        assert_eq!(*position, 1);
        assert_eq!(entry.reason.code(), RejectionCode::DuplicateTradeId);
    }

    #[test]
    fn test_invalid_first_occurrence_does_not_claim_id() {
        let records = vec![
            record(0, "A", "EUR/USD", "JPY", 1.08),
            record(1, "A", "EUR/USD", "EUR", 1.08),
        ];
        let outcome = validate_batch(&records, &ParallelConfig::default());
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.rejected[0].1.reason.code(), RejectionCode::CurrencyPairMismatch);
    }

    #[test]
    fn test_missing_rate_rejects_trade() {
        let records = vec![
            record(0, "A", "EUR/GBP", "EUR", 0.85),
            record(1, "B", "EUR/USD", "EUR", 1.08),
        ];
        let config = PipelineConfig {
            imply_rates: false,
            ..PipelineConfig::default()
        };
        let run = run_portfolio(&records, &FxRateTable::new(), &config);

        assert_eq!(run.valid_count(), 0);
        assert_eq!(run.rejected_count(), 2);
        assert_eq!(run.rejected[0].reason.code(), RejectionCode::MissingFxRate);
        assert_eq!(run.rejected[0].reason.detail(), "missing FX rate for GBP");
        assert_eq!(run.rejected[1].reason.detail(), "missing FX rate for EUR");
        assert_eq!(run.total, GroupTotals::default());
    }

    #[test]
    fn test_implied_rates_fill_table() {
        let records = vec![
            record(0, "A", "EUR/GBP", "EUR", 0.85),
            record(1, "B", "EUR/USD", "EUR", 1.08),
            record(2, "C", "GBP/USD", "GBP", 1.27),
        ];
        let run = run_portfolio(&records, &FxRateTable::new(), &PipelineConfig::default());

        assert_eq!(run.valid_count(), 3);
        assert_eq!(run.implied_rates, vec![(Currency::EUR, 1.08), (Currency::GBP, 1.27)]);
        let eurgbp = &run.trades[0];
        assert_relative_eq!(eurgbp.pv_usd(), eurgbp.priced().pv() * 1.27, max_relative = 1e-15);
    }

    #[test]
    fn test_degenerate_policy() {
        let records = vec![record(0, "A", "EUR/USD", "EUR", 1.08).with("volatility", 0.0)];

        let run = run_portfolio(&records, &FxRateTable::new(), &PipelineConfig::default());
        assert_eq!(run.rejected[0].reason.code(), RejectionCode::DegenerateMarketInputs);

        let config = PipelineConfig {
            policy: DegeneratePolicy::ZeroRisk,
            ..PipelineConfig::default()
        };
        let run = run_portfolio(&records, &FxRateTable::new(), &config);
        assert_eq!(run.valid_count(), 1);
        assert_eq!(run.total.pv_usd, 0.0);
        assert_eq!(run.total.trade_count, 1);
    }

    #[test]
    fn test_rejections_in_input_order() {
        let records = vec![
            record(0, "A", "EUR/GBP", "EUR", 0.85),
            RawRecord::new(1),
            record(2, "C", "EUR/USD", "EUR", 1.08),
            record(3, "C", "EUR/USD", "EUR", 1.08),
        ];
        let config = PipelineConfig {
            imply_rates: false,
            ..PipelineConfig::default()
        };
        let run = run_portfolio(&records, &FxRateTable::new(), &config);
        let ids: Vec<&str> = run.rejected.iter().map(|r| r.trade_id.as_str()).collect();
        assert_eq!(ids, ["A", "Row_1", "C", "C"]);
        let codes: Vec<RejectionCode> = run.rejected.iter().map(|r| r.reason.code()).collect();
        assert_eq!(
            codes,
            [
                RejectionCode::MissingFxRate,
                RejectionCode::MissingField,
                RejectionCode::MissingFxRate,
                RejectionCode::DuplicateTradeId
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let run = run_portfolio(&[], &FxRateTable::new(), &PipelineConfig::default());
        assert_eq!(run.input_count, 0);
        assert_eq!(run.summaries.len(), 2);
        assert!(run.summaries.iter().all(|s| s.groups().is_empty()));
        assert_eq!(run.total.trade_count, 0);
    }

    #[test]
    fn test_pricing_errors_map_to_rejection_codes() {
        let reason = pricing_rejection(PricingError::InvalidInput("spot must be > 0".into()));
        assert_eq!(reason.code(), RejectionCode::OutOfRange);

        let reason = pricing_rejection(PricingError::DegenerateMarketInputs("PV is NaN".into()));
        assert_eq!(reason.code(), RejectionCode::DegenerateMarketInputs);
        assert_eq!(reason.detail(), "Degenerate market inputs: PV is NaN");
    }
}
