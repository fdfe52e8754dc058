//! Error types for structured error handling.
//!
//! This module provides:
//! - `CurrencyError`: Errors from currency and currency pair parsing
//! - `PricingError`: Errors from pricing operations

use thiserror::Error;

/// Currency-related errors.
///
/// # Variants
/// - `InvalidCode`: Code does not match `^[A-Z]{3}$`
/// - `InvalidPairFormat`: Pair does not match `^[A-Z]{3}/[A-Z]{3}$`
/// - `SameCurrency`: Base and quote currencies are the same
///
/// # Examples
/// ```
/// use pricer_core::types::CurrencyError;
///
/// let err = CurrencyError::InvalidCode("usd".to_string());
/// assert_eq!(format!("{}", err), "Invalid currency code 'usd': expected three uppercase letters");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Code does not match the three-uppercase-letter pattern.
    #[error("Invalid currency code '{0}': expected three uppercase letters")]
    InvalidCode(String),

    /// Pair does not match the BASE/QUOTE pattern.
    #[error("Invalid currency pair '{0}': expected format XXX/YYY")]
    InvalidPairFormat(String),

    /// Base and quote currencies are the same.
    #[error("Base and quote currencies are the same: {0}")]
    SameCurrency(String),
}

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `DegenerateMarketInputs`: `σ·√T` is zero, too small, or non-finite, or a computed figure is not finite
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Volatility times square-root of expiry is degenerate.
    #[error("Degenerate market inputs: {0}")]
    DegenerateMarketInputs(String),
}
