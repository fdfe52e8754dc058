//! Risk layer error types.
//!
//! This module provides structured error types for normalisation and
//! aggregation using `thiserror` for derivation.

use pricer_core::types::Currency;
use thiserror::Error;

/// Errors from the FX rate table and normalisation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// No rate is available for a currency a trade needs.
    #[error("missing FX rate for {0}")]
    MissingRate(Currency),

    /// A rate is zero, negative, or not finite.
    #[error("Invalid FX rate for {currency}: {rate} (must be positive and finite)")]
    InvalidRate {
        /// Currency the rate was supplied for
        currency: Currency,
        /// The offending rate
        rate: f64,
    },

    /// A rate for the reporting currency other than 1.0.
    #[error("FX rate for reporting currency {currency} must be 1.0, got {rate}")]
    ReportingCurrencyRate {
        /// The reporting currency
        currency: Currency,
        /// The offending rate
        rate: f64,
    },

    /// Malformed aggregation configuration.
    #[error(transparent)]
    Aggregation(#[from] AggregationInputError),
}

/// Errors in group-by selector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationInputError {
    /// Selector name is not recognised.
    #[error("Unknown group-by selector '{0}': expected one of currency_pair, base_currency, quote_currency, notional_currency, option_type, trade_date")]
    UnknownSelector(String),

    /// The same selector appears twice in one grouping.
    #[error("Duplicate group-by selector '{0}'")]
    DuplicateSelector(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rate_display() {
        let err = RiskError::MissingRate(Currency::CHF);
        assert_eq!(format!("{}", err), "missing FX rate for CHF");
    }

    #[test]
    fn test_invalid_rate_display() {
        let err = RiskError::InvalidRate {
            currency: Currency::EUR,
            rate: -1.0,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid FX rate for EUR: -1 (must be positive and finite)"
        );
    }

    #[test]
    fn test_aggregation_error_is_transparent() {
        let err: RiskError = AggregationInputError::UnknownSelector("desk".into()).into();
        assert!(err.to_string().starts_with("Unknown group-by selector 'desk'"));
    }
}
