//! Currency types for financial calculations.
//!
//! This module provides three-letter currency codes. A code is only ever
//! constructed from exactly three uppercase ASCII letters (`^[A-Z]{3}$`),
//! so every `Currency` value in the system is known to be well formed.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::currency::Currency;
//!
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//!
//! let nok: Currency = "NOK".parse().unwrap();
//! assert_eq!(nok.code(), "NOK");
//!
//! // Lowercase codes do not match the strict pattern
//! assert!("nok".parse::<Currency>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CurrencyError;

/// Three-letter currency code.
///
/// Stored inline as three ASCII bytes, so the type is `Copy` and cheap to
/// hash. Major trading currencies are available as associated constants.
///
/// # Examples
///
/// ```
/// use pricer_core::types::currency::Currency;
///
/// // Get currency code
/// assert_eq!(Currency::JPY.code(), "JPY");
///
/// // Parse from string (strict pattern)
/// let eur: Currency = "EUR".parse().unwrap();
/// assert_eq!(eur, Currency::EUR);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// United States Dollar
    pub const USD: Currency = Currency(*b"USD");
    /// Euro
    pub const EUR: Currency = Currency(*b"EUR");
    /// British Pound Sterling
    pub const GBP: Currency = Currency(*b"GBP");
    /// Japanese Yen
    pub const JPY: Currency = Currency(*b"JPY");
    /// Swiss Franc
    pub const CHF: Currency = Currency(*b"CHF");

    /// Returns `true` if `s` matches the currency code pattern `^[A-Z]{3}$`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::currency::Currency;
    ///
    /// assert!(Currency::matches_pattern("GBP"));
    /// assert!(!Currency::matches_pattern("GB"));
    /// assert!(!Currency::matches_pattern("gbp"));
    /// assert!(!Currency::matches_pattern("GBP "));
    /// ```
    pub fn matches_pattern(s: &str) -> bool {
        s.len() == 3 && s.bytes().all(|b| b.is_ascii_uppercase())
    }

    /// Returns the three-letter currency code.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::USD.code(), "USD");
    /// assert_eq!(Currency::CHF.code(), "CHF");
    /// ```
    pub fn code(&self) -> &str {
        // Bytes are always uppercase ASCII, see `from_str`.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses a currency code matching `^[A-Z]{3}$`.
    ///
    /// No trimming or case folding is applied.
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        if !Self::matches_pattern(s) {
            return Err(CurrencyError::InvalidCode(s.to_string()));
        }
        let bytes = s.as_bytes();
        Ok(Currency([bytes[0], bytes[1], bytes[2]]))
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_constants() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::EUR.code(), "EUR");
        assert_eq!(Currency::GBP.code(), "GBP");
        assert_eq!(Currency::JPY.code(), "JPY");
        assert_eq!(Currency::CHF.code(), "CHF");
    }

    #[test]
    fn test_currency_from_str_any_code() {
        let aud: Currency = "AUD".parse().unwrap();
        assert_eq!(aud.code(), "AUD");
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::USD);
    }

    #[test]
    fn test_currency_from_str_rejects_bad_patterns() {
        for bad in ["", "US", "USDX", "usd", "Usd", "U1D", " USD", "US/"] {
            match bad.parse::<Currency>() {
                Err(CurrencyError::InvalidCode(code)) => assert_eq!(code, bad),
                other => panic!("Expected InvalidCode for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_currency_display_and_debug() {
        assert_eq!(format!("{}", Currency::JPY), "JPY");
        assert_eq!(format!("{:?}", Currency::JPY), "Currency(JPY)");
    }

    #[test]
    fn test_currency_ordering_is_alphabetical() {
        let mut codes = vec![Currency::USD, Currency::CHF, Currency::EUR];
        codes.sort();
        assert_eq!(codes, vec![Currency::CHF, Currency::EUR, Currency::USD]);
    }

    #[test]
    fn test_currency_serde() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");

        let parsed: Currency = serde_json::from_str("\"SEK\"").unwrap();
        assert_eq!(parsed.code(), "SEK");

        assert!(serde_json::from_str::<Currency>("\"sek\"").is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_uppercase_codes_always_parse(code in "[A-Z]{3}") {
                let currency: Currency = code.parse().unwrap();
                prop_assert_eq!(currency.code(), code.as_str());
            }

            #[test]
            fn test_codes_with_lowercase_never_parse(code in "[a-z][A-Za-z]{2}") {
                prop_assert!(code.parse::<Currency>().is_err());
            }
        }
    }
}
