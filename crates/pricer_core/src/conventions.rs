//! Numeric reporting conventions.
//!
//! Every convention that affects how risk figures are scaled or which
//! currency they are expressed in is fixed here, once, at build time.
//! Pricing, normalisation, reporting, and tests all read these constants
//! rather than choosing per call site.
//!
//! | Constant | Value |
//! |----------|-------|
//! | [`REPORTING_CURRENCY`] | USD |
//! | [`VEGA_SCALING`] | [`VegaScaling::PerVolPoint`] |
//! | [`PV_DENOMINATION`] | [`PvDenomination::QuoteCurrency`] |
//! | [`DELTA_CONVENTION`] | [`DeltaConvention::BaseCurrencyAmount`] |
//! | [`NOTIONAL_CONVENTION`] | [`NotionalConvention::QuoteNotionalAtStrike`] |
//! | [`MIN_VOL_SQRT_T`] | 1e-12 |

use crate::types::{Currency, CurrencyPair};

/// Currency all portfolio figures are normalised into.
pub const REPORTING_CURRENCY: Currency = Currency::USD;

/// How Vega is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VegaScaling {
    /// PV change for a move of 1.0 (100 vol points) in volatility.
    PerUnitVol,
    /// PV change for a move of 0.01 (one vol point) in volatility.
    PerVolPoint,
}

impl VegaScaling {
    /// Multiplier applied to the raw `∂PV/∂σ`.
    #[inline]
    pub const fn factor(self) -> f64 {
        match self {
            VegaScaling::PerUnitVol => 1.0,
            VegaScaling::PerVolPoint => 0.01,
        }
    }
}

/// Which leg of the pair PV and Vega are denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PvDenomination {
    /// Garman-Kohlhagen prices in units of the quote (domestic) currency.
    QuoteCurrency,
}

impl PvDenomination {
    /// Returns the denomination currency for `pair`.
    #[inline]
    pub fn currency(self, pair: &CurrencyPair) -> Currency {
        match self {
            PvDenomination::QuoteCurrency => pair.quote(),
        }
    }
}

/// How position Delta is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaConvention {
    /// Dimensionless unit delta times the signed position size. Not
    /// currency-scaled during normalisation.
    Ratio,
    /// Unit delta times the signed base-currency position, i.e. an amount of
    /// base currency. Normalised with the base currency's USD rate.
    BaseCurrencyAmount,
}

impl DeltaConvention {
    /// Currency Delta must be converted from, or `None` for a pure ratio.
    #[inline]
    pub fn currency(self, pair: &CurrencyPair) -> Option<Currency> {
        match self {
            DeltaConvention::Ratio => None,
            DeltaConvention::BaseCurrencyAmount => Some(pair.base()),
        }
    }
}

/// How the trade notional maps to a position size in base-currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotionalConvention {
    /// A base-currency notional is already the position size; a
    /// quote-currency notional is converted at the strike.
    QuoteNotionalAtStrike,
}

impl NotionalConvention {
    /// Signed position size in base-currency units.
    #[inline]
    pub fn base_units(
        self,
        notional: f64,
        notional_currency: Currency,
        pair: &CurrencyPair,
        strike: f64,
    ) -> f64 {
        match self {
            NotionalConvention::QuoteNotionalAtStrike => {
                if notional_currency == pair.base() {
                    notional
                } else {
                    notional / strike
                }
            }
        }
    }
}

/// Vega scaling used throughout the engine.
pub const VEGA_SCALING: VegaScaling = VegaScaling::PerVolPoint;

/// PV and Vega denomination used throughout the engine.
pub const PV_DENOMINATION: PvDenomination = PvDenomination::QuoteCurrency;

/// Delta convention used throughout the engine.
pub const DELTA_CONVENTION: DeltaConvention = DeltaConvention::BaseCurrencyAmount;

/// Notional convention used throughout the engine.
pub const NOTIONAL_CONVENTION: NotionalConvention = NotionalConvention::QuoteNotionalAtStrike;

/// `σ·√T` at or below this value is treated as degenerate.
pub const MIN_VOL_SQRT_T: f64 = 1e-12;
