//! # Pricer Risk (L4: Application)
//!
//! Currency normalisation, portfolio aggregation, and the parallel
//! per-trade pipeline.
//!
//! This crate provides:
//! - FX rate table and USD normalisation ([`normalization`])
//! - Group-by aggregation with grand totals ([`aggregation`])
//! - Validate → price → normalise → aggregate over a batch ([`pipeline`])
//! - Rayon-based parallelisation ([`parallel`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  normalization/ - FxRateTable, USD     │
//! │  aggregation/   - GroupKey, summaries  │
//! │  pipeline/      - PortfolioRun         │
//! │  parallel/      - Rayon utilities      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)          │
//! │  Garman-Kohlhagen pricing engine       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::Currency;
//! use pricer_models::validation::RawRecord;
//! use pricer_risk::aggregation::GroupKey;
//! use pricer_risk::normalization::FxRateTable;
//! use pricer_risk::pipeline::{run_portfolio, PipelineConfig};
//!
//! let records: Vec<RawRecord> = ["EUR/USD", "USD/JPY", "EUR/USD"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, pair)| {
//!         let (base, spot) = if pair.starts_with("EUR") { ("EUR", 1.08) } else { ("USD", 148.0) };
//!         RawRecord::new(i)
//!             .with("trade_id", format!("T{}", i))
//!             .with("currency_pair", *pair)
//!             .with("notional", 1_000_000.0)
//!             .with("notional_currency", base)
//!             .with("strike", spot)
//!             .with("spot", spot)
//!             .with("volatility", 0.1)
//!             .with("domestic_rate", 0.03)
//!             .with("foreign_rate", 0.02)
//!             .with("time_to_expiry", 1.0)
//!             .with("option_type", "call")
//!     })
//!     .collect();
//!
//! let rates = FxRateTable::from_rates([(Currency::EUR, 1.08), (Currency::JPY, 1.0 / 148.0)]).unwrap();
//! let config = PipelineConfig {
//!     groupings: vec![vec![GroupKey::CurrencyPair]],
//!     ..PipelineConfig::default()
//! };
//! let run = run_portfolio(&records, &rates, &config);
//!
//! let by_pair = &run.summaries[0];
//! assert_eq!(by_pair.groups().len(), 2);
//! assert_eq!(by_pair.group(&["EUR/USD"]).unwrap().totals.trade_count, 2);
//! assert_eq!(run.total.trade_count, 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod aggregation;
pub mod error;
pub mod normalization;
pub mod parallel;
pub mod pipeline;

pub use aggregation::{aggregate, GroupKey, GroupTotals, PortfolioSummary, RiskGroup};
pub use error::{AggregationInputError, RiskError};
pub use normalization::{normalize, FxRateTable, NormalizedTrade};
pub use pipeline::{run_portfolio, PipelineConfig, PortfolioRun, RejectedEntry};
