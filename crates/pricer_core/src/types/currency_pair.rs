//! Currency pair types for FX calculations.
//!
//! The convention is BASE/QUOTE: a spot of 150 on USD/JPY means
//! 1 USD = 150 JPY. The quote currency is the domestic currency of the
//! Garman-Kohlhagen model and the base currency is the foreign one.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let pair: CurrencyPair = "USD/JPY".parse().unwrap();
//! assert_eq!(pair.base(), Currency::USD);
//! assert_eq!(pair.quote(), Currency::JPY);
//!
//! // Invert the pair (JPY/USD)
//! let inverted = pair.invert();
//! assert_eq!(inverted.code(), "JPY/USD");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::error::CurrencyError;

/// An ordered BASE/QUOTE currency pair.
///
/// Base and quote are always distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    /// Base currency (foreign leg, the one being priced)
    base: Currency,
    /// Quote currency (domestic leg, the pricing currency)
    quote: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::SameCurrency` if base and quote are the same.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::{Currency, CurrencyPair};
    ///
    /// let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
    /// assert_eq!(pair.code(), "EUR/USD");
    ///
    /// assert!(CurrencyPair::new(Currency::USD, Currency::USD).is_err());
    /// ```
    pub fn new(base: Currency, quote: Currency) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        Ok(Self { base, quote })
    }

    /// Returns `true` if `s` matches the pair pattern `^[A-Z]{3}/[A-Z]{3}$`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::CurrencyPair;
    ///
    /// assert!(CurrencyPair::matches_pattern("EUR/USD"));
    /// assert!(!CurrencyPair::matches_pattern("EURUSD"));
    /// assert!(!CurrencyPair::matches_pattern("eur/usd"));
    /// ```
    pub fn matches_pattern(s: &str) -> bool {
        match s.split_once('/') {
            Some((base, quote)) => Currency::matches_pattern(base) && Currency::matches_pattern(quote),
            None => false,
        }
    }

    /// Returns the base currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the quote currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Returns `true` if `currency` is one of the two legs.
    #[inline]
    pub fn contains(&self, currency: Currency) -> bool {
        self.base == currency || self.quote == currency
    }

    /// Returns the currency pair code in standard format (BASE/QUOTE).
    pub fn code(&self) -> String {
        format!("{}/{}", self.base.code(), self.quote.code())
    }

    /// Creates an inverted currency pair (swaps base and quote).
    pub fn invert(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyError;

    /// Parses `BASE/QUOTE`, strictly matching `^[A-Z]{3}/[A-Z]{3}$`.
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        if !Self::matches_pattern(s) {
            return Err(CurrencyError::InvalidPairFormat(s.to_string()));
        }
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| CurrencyError::InvalidPairFormat(s.to_string()))?;
        Self::new(base.parse()?, quote.parse()?)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.code()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
