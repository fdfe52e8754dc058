//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths.

/// Types are reachable both through their modules and the re-exports.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::currency::Currency;
    use pricer_core::types::currency_pair::CurrencyPair;
    use pricer_core::types::error::{CurrencyError, PricingError};

    let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
    assert_eq!(pair.code(), "EUR/USD");

    let err: CurrencyError = "usd".parse::<Currency>().unwrap_err();
    assert!(matches!(err, CurrencyError::InvalidCode(_)));

    let err = PricingError::InvalidInput("x".to_string());
    assert_eq!(err.to_string(), "Invalid input: x");

    let _: pricer_core::types::Currency = Currency::GBP;
    let _: pricer_core::types::CurrencyPair = pair;
}

/// Convention constants are reachable and mutually consistent.
#[test]
fn test_conventions_module_exports() {
    use pricer_core::conventions::{
        DeltaConvention, PvDenomination, VegaScaling, DELTA_CONVENTION, MIN_VOL_SQRT_T,
        NOTIONAL_CONVENTION, PV_DENOMINATION, REPORTING_CURRENCY, VEGA_SCALING,
    };
    use pricer_core::types::{Currency, CurrencyPair};

    assert_eq!(REPORTING_CURRENCY, Currency::USD);
    assert_eq!(VEGA_SCALING, VegaScaling::PerVolPoint);
    assert_eq!(PV_DENOMINATION, PvDenomination::QuoteCurrency);
    assert_eq!(DELTA_CONVENTION, DeltaConvention::BaseCurrencyAmount);
    assert!(MIN_VOL_SQRT_T > 0.0 && MIN_VOL_SQRT_T < 1e-6);

    let pair: CurrencyPair = "EUR/GBP".parse().unwrap();
    assert_eq!(PV_DENOMINATION.currency(&pair), Currency::GBP);
    assert_eq!(DELTA_CONVENTION.currency(&pair), Some(Currency::EUR));
    assert_eq!(NOTIONAL_CONVENTION.base_units(850.0, Currency::GBP, &pair, 0.85), 1000.0);
}
