//! Garman-Kohlhagen pricing engine.
//!
//! Turns a validated [`FxOptionTrade`] into a [`PricedTrade`]. The engine
//! never emits NaN or infinity: degenerate inputs and non-finite results both
//! surface as [`PricingError::DegenerateMarketInputs`], which the configured
//! [`DegeneratePolicy`] either propagates or replaces with zero risk.

use pricer_core::types::PricingError;
use pricer_models::analytical::{GarmanKohlhagen, GarmanKohlhagenParams};
use pricer_models::instruments::FxOptionTrade;

use crate::policy::DegeneratePolicy;
use crate::priced::{PricedTrade, UnitFigures};

/// Pricing engine carrying the degenerate-input policy.
///
/// # Examples
///
/// ```
/// use pricer_models::validation::{validate, RawRecord};
/// use pricer_pricing::{DegeneratePolicy, PricingEngine};
///
/// let record = RawRecord::new(0)
///     .with("trade_id", "T0")
///     .with("currency_pair", "USD/JPY")
///     .with("notional", 1_000_000.0)
///     .with("notional_currency", "USD")
///     .with("strike", 150.0)
///     .with("spot", 148.0)
///     .with("volatility", 0.0)
///     .with("domestic_rate", 0.05)
///     .with("foreign_rate", 0.001)
///     .with("time_to_expiry", 0.5)
///     .with("option_type", "call");
/// let trade = validate(&record).unwrap();
///
/// assert!(PricingEngine::default().price(&trade).is_err());
///
/// let lenient = PricingEngine::new(DegeneratePolicy::ZeroRisk);
/// let priced = lenient.price(&trade).unwrap();
/// assert!(priced.is_zero_risk());
/// assert_eq!(priced.pv(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingEngine {
    policy: DegeneratePolicy,
}

impl PricingEngine {
    /// Creates an engine with the given policy.
    pub fn new(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    /// Returns the degenerate-input policy.
    #[inline]
    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Prices one trade.
    ///
    /// # Errors
    ///
    /// - `PricingError::DegenerateMarketInputs` under [`DegeneratePolicy::Reject`]
    ///   when `σ·√T` is degenerate or a figure is not finite
    /// - `PricingError::InvalidInput` if the closed form refuses the parameters
    pub fn price(&self, trade: &FxOptionTrade) -> Result<PricedTrade, PricingError> {
        match price_position(trade) {
            Err(PricingError::DegenerateMarketInputs(_))
                if self.policy == DegeneratePolicy::ZeroRisk =>
            {
                Ok(PricedTrade::zero_risk(trade))
            }
            other => other,
        }
    }
}

/// Prices one trade under [`DegeneratePolicy::Reject`].
///
/// # Errors
///
/// See [`PricingEngine::price`].
pub fn price(trade: &FxOptionTrade) -> Result<PricedTrade, PricingError> {
    PricingEngine::default().price(trade)
}

fn price_position(trade: &FxOptionTrade) -> Result<PricedTrade, PricingError> {
    let params = GarmanKohlhagenParams::new(
        trade.spot(),
        trade.strike(),
        trade.domestic_rate(),
        trade.foreign_rate(),
        trade.volatility(),
        trade.time_to_expiry(),
    )?;
    let model = GarmanKohlhagen::new(params)?;
    let greeks = model.greeks(trade.option_type());
    if !greeks.is_finite() {
        return Err(PricingError::DegenerateMarketInputs(format!(
            "non-finite figures for trade {}: pv={}, delta={}, vega={}",
            trade.trade_id(),
            greeks.price,
            greeks.delta,
            greeks.vega
        )));
    }

    let priced = PricedTrade::from_unit(trade, UnitFigures::from(greeks));
    if !(priced.pv().is_finite() && priced.delta().is_finite() && priced.vega().is_finite()) {
        return Err(PricingError::DegenerateMarketInputs(format!(
            "position figures overflow for trade {}",
            trade.trade_id()
        )));
    }
    Ok(priced)
}
