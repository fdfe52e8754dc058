//! FX option trade definitions.
//!
//! [`FxOptionTrade`] is the validated unit of work. It has no public
//! constructor: the only way to obtain one is through
//! [`validate`](crate::validation::validate), so every instance satisfies the
//! field invariants checked there.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::fx::FxOptionType;
//! use pricer_models::validation::{validate, RawRecord};
//! use pricer_core::types::Currency;
//!
//! let record = RawRecord::new(0)
//!     .with("trade_id", "T1")
//!     .with("currency_pair", "EUR/USD")
//!     .with("notional", 1_000_000.0)
//!     .with("notional_currency", "EUR")
//!     .with("strike", 1.12)
//!     .with("spot", 1.10)
//!     .with("volatility", 0.15)
//!     .with("domestic_rate", 0.03)
//!     .with("foreign_rate", 0.01)
//!     .with("time_to_expiry", 1.0)
//!     .with("option_type", "call");
//!
//! let trade = validate(&record).unwrap();
//! assert_eq!(trade.option_type(), FxOptionType::Call);
//! assert_eq!(trade.currency_pair().base(), Currency::EUR);
//! assert_eq!(trade.base_units(), 1_000_000.0);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use pricer_core::conventions::NOTIONAL_CONVENTION;
use pricer_core::types::{Currency, CurrencyPair};
use serde::{Deserialize, Serialize};

/// FX option type (Call or Put).
///
/// - Call: Right to buy base currency, sell quote currency
/// - Put: Right to sell base currency, buy quote currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FxOptionType {
    /// Right to buy base currency at strike price in quote currency.
    Call,
    /// Right to sell base currency at strike price in quote currency.
    Put,
}

impl FxOptionType {
    /// Returns whether this is a call option.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, FxOptionType::Call)
    }

    /// Returns whether this is a put option.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, FxOptionType::Put)
    }
}

impl fmt::Display for FxOptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxOptionType::Call => write!(f, "Call"),
            FxOptionType::Put => write!(f, "Put"),
        }
    }
}

/// Error returned when an option type string is neither call nor put.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid option type '{0}': expected Call or Put")]
pub struct ParseOptionTypeError(pub String);

impl FromStr for FxOptionType {
    type Err = ParseOptionTypeError;

    /// Parses `call` or `put`, case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("call") {
            Ok(FxOptionType::Call)
        } else if trimmed.eq_ignore_ascii_case("put") {
            Ok(FxOptionType::Put)
        } else {
            Err(ParseOptionTypeError(s.to_string()))
        }
    }
}

/// A validated vanilla European FX option trade.
///
/// # Conventions
///
/// - Spot and strike are quoted as units of quote currency per 1 unit of base
/// - `domestic_rate` applies to the quote currency, `foreign_rate` to the base
/// - The sign of `notional` encodes long (positive) or short (negative)
/// - Position size in base units follows
///   [`NOTIONAL_CONVENTION`](pricer_core::conventions::NOTIONAL_CONVENTION)
///
/// Immutable once built. Downstream stages attach derived records that own a
/// copy of the trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FxOptionTrade {
    pub(crate) trade_id: String,
    pub(crate) currency_pair: CurrencyPair,
    pub(crate) notional: f64,
    pub(crate) notional_currency: Currency,
    pub(crate) strike: f64,
    pub(crate) spot: f64,
    pub(crate) volatility: f64,
    pub(crate) domestic_rate: f64,
    pub(crate) foreign_rate: f64,
    pub(crate) time_to_expiry: f64,
    pub(crate) option_type: FxOptionType,
    pub(crate) trade_date: Option<NaiveDate>,
}

impl FxOptionTrade {
    /// Returns the trade identifier.
    #[inline]
    pub fn trade_id(&self) -> &str {
        &self.trade_id
    }

    /// Returns the currency pair.
    #[inline]
    pub fn currency_pair(&self) -> CurrencyPair {
        self.currency_pair
    }

    /// Returns the signed notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the currency the notional is expressed in.
    #[inline]
    pub fn notional_currency(&self) -> Currency {
        self.notional_currency
    }

    /// Returns the strike (quote per base).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the spot rate (quote per base).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the domestic (quote currency) rate.
    #[inline]
    pub fn domestic_rate(&self) -> f64 {
        self.domestic_rate
    }

    /// Returns the foreign (base currency) rate.
    #[inline]
    pub fn foreign_rate(&self) -> f64 {
        self.foreign_rate
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> FxOptionType {
        self.option_type
    }

    /// Returns the trade date, if one was supplied.
    #[inline]
    pub fn trade_date(&self) -> Option<NaiveDate> {
        self.trade_date
    }

    /// Returns the signed position size in base-currency units.
    pub fn base_units(&self) -> f64 {
        NOTIONAL_CONVENTION.base_units(
            self.notional,
            self.notional_currency,
            &self.currency_pair,
            self.strike,
        )
    }

    /// Returns `true` for a long position.
    #[inline]
    pub fn is_long(&self) -> bool {
        self.notional > 0.0
    }
}
