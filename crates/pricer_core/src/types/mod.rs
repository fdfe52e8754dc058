//! Core financial types.
//!
//! This module provides:
//! - `currency`: ISO 4217 style three-letter currency codes
//! - `currency_pair`: BASE/QUOTE currency pairs for FX quotes
//! - `error`: Structured error types for currency parsing and pricing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Currency`] from `currency`
//! - [`CurrencyPair`] from `currency_pair`
//! - [`CurrencyError`], [`PricingError`] from `error`

pub mod currency;
pub mod currency_pair;
pub mod error;

// Re-export commonly used types at module level
pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use error::{CurrencyError, PricingError};
