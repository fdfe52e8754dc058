//! Priced trade result type.
//!
//! Provides [`PricedTrade`], the output of the pricing engine: the validated
//! trade, its per-unit Garman-Kohlhagen figures, and the position figures
//! scaled by the signed base-currency position size.

use pricer_core::conventions::{DELTA_CONVENTION, PV_DENOMINATION};
use pricer_core::types::Currency;
use pricer_models::analytical::FxGreeks;
use pricer_models::instruments::FxOptionTrade;
use serde::Serialize;

/// Per-unit figures (one unit of base currency, long).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct UnitFigures {
    /// PV per unit of base, in quote currency.
    pub pv: f64,
    /// Spot Delta, dimensionless.
    pub delta: f64,
    /// Vega per vol point per unit of base, in quote currency.
    pub vega: f64,
}

impl From<FxGreeks<f64>> for UnitFigures {
    fn from(greeks: FxGreeks<f64>) -> Self {
        Self {
            pv: greeks.price,
            delta: greeks.delta,
            vega: greeks.vega,
        }
    }
}

/// A trade with its risk figures in the option's natural currencies.
///
/// - PV and Vega are denominated in [`PricedTrade::pv_currency`] (quote)
/// - Delta is an amount of [`PricedTrade::delta_currency`] (base)
///
/// # Examples
///
/// ```
/// use pricer_models::validation::{validate, RawRecord};
/// use pricer_pricing::price;
///
/// let trade = validate(
///     &RawRecord::new(0)
///         .with("trade_id", "T1")
///         .with("currency_pair", "EUR/USD")
///         .with("notional", -2_000_000.0)
///         .with("notional_currency", "EUR")
///         .with("strike", 1.10)
///         .with("spot", 1.08)
///         .with("volatility", 0.08)
///         .with("domestic_rate", 0.045)
///         .with("foreign_rate", 0.03)
///         .with("time_to_expiry", 0.25)
///         .with("option_type", "call"),
/// )
/// .unwrap();
///
/// let priced = price(&trade).unwrap();
/// assert_eq!(priced.pv_currency().code(), "USD");
/// assert!(priced.pv() < 0.0); // short call
/// assert_eq!(priced.pv(), priced.unit().pv * -2_000_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedTrade {
    trade: FxOptionTrade,
    unit: UnitFigures,
    base_units: f64,
    pv: f64,
    delta: f64,
    vega: f64,
    zero_risk: bool,
}

impl PricedTrade {
    /// Scales unit figures by the trade's signed base-unit position.
    pub(crate) fn from_unit(trade: &FxOptionTrade, unit: UnitFigures) -> Self {
        let base_units = trade.base_units();
        Self {
            trade: trade.clone(),
            unit,
            base_units,
            pv: unit.pv * base_units,
            delta: unit.delta * base_units,
            vega: unit.vega * base_units,
            zero_risk: false,
        }
    }

    /// Zero-valued placeholder for a degenerate trade kept under
    /// [`DegeneratePolicy::ZeroRisk`](crate::DegeneratePolicy::ZeroRisk).
    pub(crate) fn zero_risk(trade: &FxOptionTrade) -> Self {
        Self {
            zero_risk: true,
            ..Self::from_unit(trade, UnitFigures::default())
        }
    }

    /// Returns the priced trade.
    #[inline]
    pub fn trade(&self) -> &FxOptionTrade {
        &self.trade
    }

    /// Returns the per-unit figures.
    #[inline]
    pub fn unit(&self) -> UnitFigures {
        self.unit
    }

    /// Returns the signed position size in base-currency units.
    #[inline]
    pub fn base_units(&self) -> f64 {
        self.base_units
    }

    /// Returns the position PV in [`pv_currency`](Self::pv_currency).
    #[inline]
    pub fn pv(&self) -> f64 {
        self.pv
    }

    /// Returns the position Delta in [`delta_currency`](Self::delta_currency).
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the position Vega per vol point in [`pv_currency`](Self::pv_currency).
    #[inline]
    pub fn vega(&self) -> f64 {
        self.vega
    }

    /// Currency of PV and Vega.
    #[inline]
    pub fn pv_currency(&self) -> Currency {
        PV_DENOMINATION.currency(&self.trade.currency_pair())
    }

    /// Currency of Delta, or `None` when Delta is a pure ratio.
    #[inline]
    pub fn delta_currency(&self) -> Option<Currency> {
        DELTA_CONVENTION.currency(&self.trade.currency_pair())
    }

    /// Returns `true` if the figures are a zero-risk placeholder.
    #[inline]
    pub fn is_zero_risk(&self) -> bool {
        self.zero_risk
    }
}
