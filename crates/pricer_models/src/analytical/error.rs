//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to analytical pricing models

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot`: Non-positive or non-finite spot
/// - `InvalidStrike`: Non-positive or non-finite strike
/// - `InvalidVolatility`: Negative volatility
/// - `InvalidExpiry`: Negative expiry
/// - `DegenerateInputs`: `σ·√T` is zero, below threshold, or non-finite
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::DegenerateInputs { vol_sqrt_t: 0.0 };
/// assert!(format!("{}", err).contains("σ√T"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Negative volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Negative expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Volatility times square-root of expiry is too small or not finite.
    #[error("σ√T = {vol_sqrt_t} is zero, too small, or not finite")]
    DegenerateInputs {
        /// The offending σ·√T value
        vol_sqrt_t: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::DegenerateInputs { .. } => {
                PricingError::DegenerateMarketInputs(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
