//! Garman-Kohlhagen model for FX option pricing.
//!
//! This module provides the Garman-Kohlhagen closed-form solution for pricing
//! European FX options. It extends Black-Scholes to account for two interest
//! rates (domestic and foreign).
//!
//! # Mathematical Background
//!
//! - S: spot exchange rate (quote per base)
//! - K: strike price
//! - rd: domestic (quote currency) rate, continuous compounding
//! - rf: foreign (base currency) rate, continuous compounding
//! - σ: volatility of the exchange rate
//! - T: time to maturity in years
//!
//! ## Call Option Price
//! C = S * e^(-rf*T) * N(d1) - K * e^(-rd*T) * N(d2)
//!
//! ## Put Option Price
//! P = K * e^(-rd*T) * N(-d2) - S * e^(-rf*T) * N(-d1)
//!
//! where:
//! d1 = [ln(S/K) + (rd - rf + σ²/2) * T] / (σ * √T)
//! d2 = d1 - σ * √T
//!
//! ## Degenerate inputs
//!
//! When `σ·√T` is at or below [`MIN_VOL_SQRT_T`] or is not finite, d1 and d2
//! are undefined. [`GarmanKohlhagen::new`] refuses such parameters with
//! [`AnalyticalError::DegenerateInputs`] instead of producing NaN or infinity.
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::garman_kohlhagen::{
//!     GarmanKohlhagen, GarmanKohlhagenParams,
//! };
//! use pricer_models::instruments::fx::FxOptionType;
//!
//! let params = GarmanKohlhagenParams::new(
//!     1.10,   // spot
//!     1.12,   // strike
//!     0.03,   // domestic rate (3%)
//!     0.01,   // foreign rate (1%)
//!     0.15,   // volatility (15%)
//!     1.0,    // expiry (1 year)
//! ).unwrap();
//!
//! let model = GarmanKohlhagen::new(params).unwrap();
//! let call_price = model.price(FxOptionType::Call);
//! let put_price = model.price(FxOptionType::Put);
//!
//! // Put-call parity check
//! let parity_diff = call_price - put_price
//!     - (1.10 * (-0.01_f64).exp() - 1.12 * (-0.03_f64).exp());
//! assert!(parity_diff.abs() < 1e-10);
//! ```

use num_traits::Float;
use pricer_core::conventions::{MIN_VOL_SQRT_T, VEGA_SCALING};

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::fx::FxOptionType;

#[inline]
fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Parameters for the Garman-Kohlhagen model.
///
/// # Type Parameters
///
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
#[derive(Debug, Clone, Copy)]
pub struct GarmanKohlhagenParams<T: Float> {
    /// Spot exchange rate (quote per base).
    pub spot: T,
    /// Strike price.
    pub strike: T,
    /// Domestic risk-free rate (continuous compounding).
    pub rate_domestic: T,
    /// Foreign risk-free rate (continuous compounding).
    pub rate_foreign: T,
    /// Volatility of the exchange rate.
    pub volatility: T,
    /// Time to expiry in years.
    pub expiry: T,
}

impl<T: Float> GarmanKohlhagenParams<T> {
    /// Creates new Garman-Kohlhagen parameters.
    ///
    /// # Arguments
    ///
    /// * `spot` - Spot exchange rate (must be positive)
    /// * `strike` - Strike price (must be positive)
    /// * `rate_domestic` - Domestic risk-free rate (can be negative)
    /// * `rate_foreign` - Foreign risk-free rate (can be negative)
    /// * `volatility` - Volatility (must be non-negative)
    /// * `expiry` - Time to expiry in years (must be non-negative)
    ///
    /// Zero volatility or zero expiry are accepted here; they are rejected as
    /// degenerate when the model is built.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticalError` if any parameter is out of its domain.
    pub fn new(
        spot: T,
        strike: T,
        rate_domestic: T,
        rate_foreign: T,
        volatility: T,
        expiry: T,
    ) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot { spot: to_f64(spot) });
        }
        if !(strike > T::zero()) || !strike.is_finite() {
            return Err(AnalyticalError::InvalidStrike {
                strike: to_f64(strike),
            });
        }
        if !(volatility >= T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: to_f64(volatility),
            });
        }
        if !(expiry >= T::zero()) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: to_f64(expiry),
            });
        }

        Ok(Self {
            spot,
            strike,
            rate_domestic,
            rate_foreign,
            volatility,
            expiry,
        })
    }

    /// Returns the forward exchange rate.
    ///
    /// F = S * exp((rd - rf) * T)
    #[inline]
    pub fn forward(&self) -> T {
        let drift = (self.rate_domestic - self.rate_foreign) * self.expiry;
        self.spot * drift.exp()
    }

    /// Returns `σ·√T`.
    #[inline]
    pub fn vol_sqrt_t(&self) -> T {
        self.volatility * self.expiry.sqrt()
    }
}

/// Garman-Kohlhagen model for FX option pricing.
///
/// Provides closed-form PV, Delta and Vega for European FX options.
/// Construction succeeds only for non-degenerate parameters, so every
/// figure computed from an instance is finite for finite rates.
///
/// # Type Parameters
///
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
#[derive(Debug, Clone)]
pub struct GarmanKohlhagen<T: Float> {
    params: GarmanKohlhagenParams<T>,
    /// d1 term from the formula.
    d1: T,
    /// d2 term from the formula.
    d2: T,
    /// √T
    sqrt_t: T,
    /// e^(-rd * T)
    df_domestic: T,
    /// e^(-rf * T)
    df_foreign: T,
}

impl<T: Float> GarmanKohlhagen<T> {
    /// Creates a new Garman-Kohlhagen model instance.
    ///
    /// Pre-computes d1, d2, and discount factors.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticalError::DegenerateInputs` if `σ·√T` is not finite or
    /// is at or below [`MIN_VOL_SQRT_T`].
    pub fn new(params: GarmanKohlhagenParams<T>) -> Result<Self, AnalyticalError> {
        let sqrt_t = params.expiry.sqrt();
        let vol_sqrt_t = params.volatility * sqrt_t;

        let threshold = T::from(MIN_VOL_SQRT_T).unwrap_or_else(T::epsilon);
        if !vol_sqrt_t.is_finite() || vol_sqrt_t <= threshold {
            return Err(AnalyticalError::DegenerateInputs {
                vol_sqrt_t: to_f64(vol_sqrt_t),
            });
        }

        // d1 = [ln(S/K) + (rd - rf + σ²/2) * T] / (σ * √T)
        let two = T::one() + T::one();
        let log_sk = (params.spot / params.strike).ln();
        let drift = params.rate_domestic - params.rate_foreign
            + params.volatility * params.volatility / two;
        let d1 = (log_sk + drift * params.expiry) / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        let df_domestic = (-params.rate_domestic * params.expiry).exp();
        let df_foreign = (-params.rate_foreign * params.expiry).exp();

        Ok(Self {
            params,
            d1,
            d2,
            sqrt_t,
            df_domestic,
            df_foreign,
        })
    }

    /// Returns a reference to the parameters.
    #[inline]
    pub fn params(&self) -> &GarmanKohlhagenParams<T> {
        &self.params
    }

    /// Returns d1.
    #[inline]
    pub fn d1(&self) -> T {
        self.d1
    }

    /// Returns d2.
    #[inline]
    pub fn d2(&self) -> T {
        self.d2
    }

    /// Returns the domestic discount factor e^(-rd*T).
    #[inline]
    pub fn df_domestic(&self) -> T {
        self.df_domestic
    }

    /// Returns the foreign discount factor e^(-rf*T).
    #[inline]
    pub fn df_foreign(&self) -> T {
        self.df_foreign
    }

    /// Computes the option price per unit of base currency.
    ///
    /// The result is denominated in the quote (domestic) currency.
    pub fn price(&self, option_type: FxOptionType) -> T {
        let spot = self.params.spot;
        let strike = self.params.strike;

        match option_type {
            FxOptionType::Call => {
                spot * self.df_foreign * norm_cdf(self.d1)
                    - strike * self.df_domestic * norm_cdf(self.d2)
            }
            FxOptionType::Put => {
                strike * self.df_domestic * norm_cdf(-self.d2)
                    - spot * self.df_foreign * norm_cdf(-self.d1)
            }
        }
    }

    /// Computes spot Delta per unit of base currency.
    ///
    /// Call delta lies in (0, e^(-rf*T)), put delta in (-e^(-rf*T), 0).
    pub fn delta(&self, option_type: FxOptionType) -> T {
        let nd1 = norm_cdf(self.d1);

        match option_type {
            // Δ_call = e^(-rf*T) * N(d1)
            FxOptionType::Call => self.df_foreign * nd1,
            // Δ_put = e^(-rf*T) * (N(d1) - 1)
            FxOptionType::Put => self.df_foreign * (nd1 - T::one()),
        }
    }

    /// Computes Vega per unit of base currency.
    ///
    /// Same for both call and put options. Scaled by
    /// [`VEGA_SCALING`](pricer_core::conventions::VEGA_SCALING), i.e. the PV
    /// change for a one vol point move.
    pub fn vega(&self) -> T {
        let scaling = T::from(VEGA_SCALING.factor()).unwrap_or_else(T::one);

        // ν = S * e^(-rf*T) * φ(d1) * √T
        self.params.spot * self.df_foreign * norm_pdf(self.d1) * self.sqrt_t * scaling
    }

    /// Computes price, Delta and Vega in one pass.
    pub fn greeks(&self, option_type: FxOptionType) -> FxGreeks<T> {
        FxGreeks {
            price: self.price(option_type),
            delta: self.delta(option_type),
            vega: self.vega(),
        }
    }
}

/// Per-unit Garman-Kohlhagen figures for one option type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FxGreeks<T: Float> {
    /// Present value in quote currency.
    pub price: T,
    /// Spot Delta.
    pub delta: T,
    /// Vega, scaled per vol point.
    pub vega: T,
}

impl<T: Float> FxGreeks<T> {
    /// Returns `true` if every figure is finite.
    pub fn is_finite(&self) -> bool {
        self.price.is_finite() && self.delta.is_finite() && self.vega.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn eurusd_model() -> GarmanKohlhagen<f64> {
        let params = GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, 0.15, 1.0).unwrap();
        GarmanKohlhagen::new(params).unwrap()
    }

    #[test]
    fn test_params_validation() {
        assert!(matches!(
            GarmanKohlhagenParams::new(-1.0, 1.0, 0.0, 0.0, 0.1, 1.0),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            GarmanKohlhagenParams::new(1.0, 0.0, 0.0, 0.0, 0.1, 1.0),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            GarmanKohlhagenParams::new(1.0, 1.0, 0.0, 0.0, -0.1, 1.0),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            GarmanKohlhagenParams::new(1.0, 1.0, 0.0, 0.0, 0.1, -1.0),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
        assert!(GarmanKohlhagenParams::new(1.0, 1.0, 0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_forward() {
        let params = GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, 0.15, 1.0).unwrap();
        assert_relative_eq!(params.forward(), 1.10 * 0.02_f64.exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_zero_volatility_is_degenerate() {
        let params = GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, 0.0, 1.0).unwrap();
        match GarmanKohlhagen::new(params) {
            Err(AnalyticalError::DegenerateInputs { vol_sqrt_t }) => assert_eq!(vol_sqrt_t, 0.0),
            other => panic!("Expected DegenerateInputs, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_expiry_is_degenerate() {
        let params = GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, 0.15, 0.0).unwrap();
        assert!(matches!(
            GarmanKohlhagen::new(params),
            Err(AnalyticalError::DegenerateInputs { .. })
        ));
    }

    #[test]
    fn test_tiny_vol_sqrt_t_is_degenerate() {
        let params = GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, 1e-7, 1e-12).unwrap();
        assert!(matches!(
            GarmanKohlhagen::new(params),
            Err(AnalyticalError::DegenerateInputs { .. })
        ));
    }

    #[test]
    fn test_infinite_volatility_is_degenerate() {
        let params =
            GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, f64::INFINITY, 1.0).unwrap();
        assert!(matches!(
            GarmanKohlhagen::new(params),
            Err(AnalyticalError::DegenerateInputs { .. })
        ));
    }

    #[test]
    fn test_reference_prices() {
        // S=100, K=100, rd=5%, rf=2%, σ=20%, T=1
        let params = GarmanKohlhagenParams::new(100.0, 100.0, 0.05, 0.02, 0.20, 1.0).unwrap();
        let model = GarmanKohlhagen::new(params).unwrap();

        assert_relative_eq!(model.d1(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(model.d2(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(model.price(FxOptionType::Call), 9.227005508154036, epsilon = 1e-9);
        assert_relative_eq!(model.price(FxOptionType::Put), 6.330080627549918, epsilon = 1e-9);
    }

    #[test]
    fn test_put_call_parity() {
        let model = eurusd_model();
        let p = model.params();
        let parity = p.spot * model.df_foreign() - p.strike * model.df_domestic();
        let diff = model.price(FxOptionType::Call) - model.price(FxOptionType::Put);
        assert_relative_eq!(diff, parity, epsilon = 1e-12);
    }

    #[test]
    fn test_delta_bounds() {
        let model = eurusd_model();
        let call_delta = model.delta(FxOptionType::Call);
        let put_delta = model.delta(FxOptionType::Put);

        assert!(call_delta > 0.0 && call_delta < model.df_foreign());
        assert!(put_delta < 0.0 && put_delta > -model.df_foreign());
        assert_relative_eq!(call_delta - put_delta, model.df_foreign(), epsilon = 1e-14);
    }

    #[test]
    fn test_vega_per_vol_point_matches_bump() {
        let model = eurusd_model();
        let bump = 1e-4;
        let p = *model.params();

        let up = GarmanKohlhagenParams { volatility: p.volatility + bump, ..p };
        let down = GarmanKohlhagenParams { volatility: p.volatility - bump, ..p };
        let up_price = GarmanKohlhagen::new(up).unwrap().price(FxOptionType::Call);
        let down_price = GarmanKohlhagen::new(down).unwrap().price(FxOptionType::Call);
        let per_unit_vol = (up_price - down_price) / (2.0 * bump);

        assert_relative_eq!(model.vega(), per_unit_vol * 0.01, max_relative = 1e-6);
        assert!(model.vega() > 0.0);
    }

    #[test]
    fn test_greeks_bundle() {
        let model = eurusd_model();
        let greeks = model.greeks(FxOptionType::Put);
        assert_eq!(greeks.price, model.price(FxOptionType::Put));
        assert_eq!(greeks.delta, model.delta(FxOptionType::Put));
        assert_eq!(greeks.vega, model.vega());
        assert!(greeks.is_finite());
    }

    #[test]
    fn test_negative_rates() {
        let params = GarmanKohlhagenParams::new(0.95, 0.97, -0.005, 0.02, 0.08, 2.0).unwrap();
        let model = GarmanKohlhagen::new(params).unwrap();
        assert!(model.greeks(FxOptionType::Call).is_finite());
        assert!(model.price(FxOptionType::Call) >= 0.0);
    }

    proptest! {
        #[test]
        fn prop_put_call_parity(
            spot in 0.5f64..200.0,
            moneyness in 0.5f64..1.5,
            rd in -0.02f64..0.10,
            rf in -0.02f64..0.10,
            vol in 0.01f64..1.0,
            expiry in 0.01f64..10.0,
        ) {
            let strike = spot * moneyness;
            let params = GarmanKohlhagenParams::new(spot, strike, rd, rf, vol, expiry).unwrap();
            let model = GarmanKohlhagen::new(params).unwrap();
            let parity = spot * model.df_foreign() - strike * model.df_domestic();
            let diff = model.price(FxOptionType::Call) - model.price(FxOptionType::Put);
            prop_assert!((diff - parity).abs() < 1e-6 * spot.max(1.0));
        }

        #[test]
        fn prop_prices_non_negative(
            spot in 0.5f64..200.0,
            moneyness in 0.5f64..1.5,
            vol in 0.01f64..1.0,
            expiry in 0.01f64..10.0,
        ) {
            let params =
                GarmanKohlhagenParams::new(spot, spot * moneyness, 0.03, 0.01, vol, expiry).unwrap();
            let model = GarmanKohlhagen::new(params).unwrap();
            prop_assert!(model.price(FxOptionType::Call) > -1e-9);
            prop_assert!(model.price(FxOptionType::Put) > -1e-9);
            prop_assert!(model.vega() >= 0.0);
        }
    }
}
