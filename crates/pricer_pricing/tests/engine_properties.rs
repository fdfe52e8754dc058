//! Integration tests for the pricing engine.
//!
//! Raw record → gatekeeper → engine, checked against closed-form identities.

use approx::assert_relative_eq;
use pricer_core::types::PricingError;
use pricer_models::validation::{validate, RawRecord};
use pricer_pricing::{price, DegeneratePolicy, PricingEngine};
use proptest::prelude::*;

#[allow(clippy::too_many_arguments)]
fn record(
    pair: &str,
    notional_ccy: &str,
    spot: f64,
    strike: f64,
    vol: f64,
    rd: f64,
    rf: f64,
    expiry: f64,
    option_type: &str,
) -> RawRecord {
    RawRecord::new(0)
        .with("trade_id", "P")
        .with("currency_pair", pair)
        .with("notional", 1.0)
        .with("notional_currency", notional_ccy)
        .with("strike", strike)
        .with("spot", spot)
        .with("volatility", vol)
        .with("domestic_rate", rd)
        .with("foreign_rate", rf)
        .with("time_to_expiry", expiry)
        .with("option_type", option_type)
}

#[test]
fn test_vega_is_shared_by_call_and_put() {
    let call = price(&validate(&record("EUR/USD", "EUR", 1.08, 1.1, 0.08, 0.045, 0.03, 0.25, "call")).unwrap()).unwrap();
    let put = price(&validate(&record("EUR/USD", "EUR", 1.08, 1.1, 0.08, 0.045, 0.03, 0.25, "put")).unwrap()).unwrap();
    assert_relative_eq!(call.vega(), put.vega(), max_relative = 1e-14);
    assert_relative_eq!(call.delta() - put.delta(), (-0.03_f64 * 0.25).exp(), epsilon = 1e-14);
}

#[test]
fn test_policies_agree_on_healthy_trades() {
    let trade = validate(&record("USD/CHF", "USD", 0.88, 0.9, 0.07, 0.01, 0.05, 2.0, "put")).unwrap();
    let strict = PricingEngine::new(DegeneratePolicy::Reject).price(&trade).unwrap();
    let lenient = PricingEngine::new(DegeneratePolicy::ZeroRisk).price(&trade).unwrap();
    assert_eq!(strict, lenient);
}

#[test]
fn test_degenerate_error_is_never_nan() {
    let trade = validate(&record("USD/JPY", "USD", 148.0, 150.0, 0.0, 0.05, 0.001, 0.5, "call")).unwrap();
    let err = price(&trade).unwrap_err();
    assert!(matches!(err, PricingError::DegenerateMarketInputs(_)));
}

proptest! {
    #[test]
    fn prop_put_call_parity_within_tolerance(
        spot in 0.5f64..200.0,
        moneyness in 0.7f64..1.3,
        vol in 0.01f64..2.0,
        rd in -0.02f64..0.10,
        rf in -0.02f64..0.10,
        expiry in 0.01f64..30.0,
    ) {
        let strike = spot * moneyness;
        let call = price(&validate(&record("GBP/USD", "GBP", spot, strike, vol, rd, rf, expiry, "call")).unwrap()).unwrap();
        let put = price(&validate(&record("GBP/USD", "GBP", spot, strike, vol, rd, rf, expiry, "put")).unwrap()).unwrap();

        let forward_pv = spot * (-rf * expiry).exp() - strike * (-rd * expiry).exp();
        prop_assert!((call.pv() - put.pv() - forward_pv).abs() < 1e-6 * spot.max(1.0));
    }

    #[test]
    fn prop_figures_always_finite(
        spot in 0.01f64..1000.0,
        moneyness in 0.1f64..10.0,
        vol in 0.0f64..5.0,
        expiry in 1e-6f64..100.0,
    ) {
        let trade = validate(&record("AUD/USD", "AUD", spot, spot * moneyness, vol, 0.04, 0.03, expiry, "call")).unwrap();
        match price(&trade) {
            Ok(priced) => {
                prop_assert!(priced.pv().is_finite());
                prop_assert!(priced.delta().is_finite());
                prop_assert!(priced.vega().is_finite());
            }
            Err(err) => prop_assert!(matches!(err, PricingError::DegenerateMarketInputs(_))),
        }
    }
}
