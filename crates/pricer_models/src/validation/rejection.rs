//! Rejection reasons.
//!
//! Every rejected trade carries exactly one [`RejectionReason`]: a closed
//! [`RejectionCode`] plus a human-readable detail string.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Validation stages, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationRule {
    /// Every required field present and non-empty.
    RequiredFields,
    /// Numeric and date fields coerce.
    TypeCoercion,
    /// Currency pair and code patterns.
    PatternMatch,
    /// Consistency between fields.
    CrossField,
    /// Finite values within bounds.
    NumericRange,
}

impl ValidationRule {
    /// All stages in evaluation order.
    pub const ORDER: [ValidationRule; 5] = [
        ValidationRule::RequiredFields,
        ValidationRule::TypeCoercion,
        ValidationRule::PatternMatch,
        ValidationRule::CrossField,
        ValidationRule::NumericRange,
    ];

    /// Stage name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ValidationRule::RequiredFields => "required-fields",
            ValidationRule::TypeCoercion => "type-coercion",
            ValidationRule::PatternMatch => "pattern-match",
            ValidationRule::CrossField => "cross-field",
            ValidationRule::NumericRange => "numeric-range",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of rejection codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    /// A required field is absent or empty.
    MissingField,
    /// A numeric field does not parse.
    InvalidNumber,
    /// The trade date does not parse.
    InvalidDate,
    /// Currency pair does not match `XXX/YYY`.
    InvalidCurrencyPairFormat,
    /// Notional currency does not match `XXX`.
    InvalidCurrencyCode,
    /// Notional currency is neither leg of the pair.
    CurrencyPairMismatch,
    /// Base and quote currencies are identical.
    SameCurrencyPair,
    /// Option type is neither call nor put.
    InvalidOptionType,
    /// A numeric field is non-finite or outside its bounds.
    OutOfRange,
    /// `σ·√T` is degenerate.
    DegenerateMarketInputs,
    /// No FX rate available for a required currency.
    MissingFxRate,
    /// The trade identifier was already seen.
    DuplicateTradeId,
}

impl RejectionCode {
    /// Stable upper-case name used in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            RejectionCode::MissingField => "MISSING_FIELD",
            RejectionCode::InvalidNumber => "INVALID_NUMBER",
            RejectionCode::InvalidDate => "INVALID_DATE",
            RejectionCode::InvalidCurrencyPairFormat => "INVALID_CURRENCY_PAIR_FORMAT",
            RejectionCode::InvalidCurrencyCode => "INVALID_CURRENCY_CODE",
            RejectionCode::CurrencyPairMismatch => "CURRENCY_PAIR_MISMATCH",
            RejectionCode::SameCurrencyPair => "SAME_CURRENCY_PAIR",
            RejectionCode::InvalidOptionType => "INVALID_OPTION_TYPE",
            RejectionCode::OutOfRange => "OUT_OF_RANGE",
            RejectionCode::DegenerateMarketInputs => "DEGENERATE_MARKET_INPUTS",
            RejectionCode::MissingFxRate => "MISSING_FX_RATE",
            RejectionCode::DuplicateTradeId => "DUPLICATE_TRADE_ID",
        }
    }

    /// Validation stage that emits this code, or `None` for pipeline codes.
    pub const fn rule(self) -> Option<ValidationRule> {
        match self {
            RejectionCode::MissingField => Some(ValidationRule::RequiredFields),
            RejectionCode::InvalidNumber | RejectionCode::InvalidDate => {
                Some(ValidationRule::TypeCoercion)
            }
            RejectionCode::InvalidCurrencyPairFormat | RejectionCode::InvalidCurrencyCode => {
                Some(ValidationRule::PatternMatch)
            }
            RejectionCode::CurrencyPairMismatch
            | RejectionCode::SameCurrencyPair
            | RejectionCode::InvalidOptionType => Some(ValidationRule::CrossField),
            RejectionCode::OutOfRange => Some(ValidationRule::NumericRange),
            RejectionCode::DegenerateMarketInputs
            | RejectionCode::MissingFxRate
            | RejectionCode::DuplicateTradeId => None,
        }
    }
}

impl fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a trade was rejected.
///
/// # Examples
/// ```
/// use pricer_models::validation::{RejectionCode, RejectionReason};
///
/// let reason = RejectionReason::new(RejectionCode::MissingFxRate, "missing FX rate for CHF");
/// assert_eq!(reason.to_string(), "missing FX rate for CHF");
/// assert_eq!(reason.code().as_str(), "MISSING_FX_RATE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{detail}")]
pub struct RejectionReason {
    code: RejectionCode,
    detail: String,
}

/// Per-trade validation failure.
pub type ValidationError = RejectionReason;

impl RejectionReason {
    /// Creates a rejection reason.
    pub fn new(code: RejectionCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    /// Returns the rejection code.
    #[inline]
    pub fn code(&self) -> RejectionCode {
        self.code
    }

    /// Returns the detail text.
    #[inline]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns the validation stage that produced this rejection, if any.
    #[inline]
    pub fn rule(&self) -> Option<ValidationRule> {
        self.code.rule()
    }
}
