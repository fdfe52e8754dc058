//! Currency normalisation into the reporting currency.
//!
//! [`FxRateTable`] maps a currency to the USD value of one unit of it.
//! [`normalize`] converts a [`PricedTrade`]'s figures with that table:
//!
//! - PV and Vega are multiplied by the rate of the PV currency (quote)
//! - Delta follows [`DELTA_CONVENTION`]: a base-currency amount is
//!   multiplied by the base currency's rate, a pure ratio is left alone
//!
//! A missing rate is an error, never a default.

use std::collections::BTreeMap;

use pricer_core::conventions::{DELTA_CONVENTION, REPORTING_CURRENCY};
use pricer_core::types::Currency;
use pricer_models::instruments::FxOptionTrade;
use pricer_pricing::PricedTrade;
use serde::Serialize;

use crate::error::RiskError;

/// Currency → USD value of one unit.
///
/// The reporting currency always resolves to exactly 1.0.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_risk::normalization::FxRateTable;
///
/// let table = FxRateTable::from_rates([(Currency::EUR, 1.08), (Currency::JPY, 0.0067)]).unwrap();
/// assert_eq!(table.rate(Currency::USD).unwrap(), 1.0);
/// assert_eq!(table.rate(Currency::EUR).unwrap(), 1.08);
/// assert!(table.rate(Currency::CHF).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FxRateTable {
    rates: BTreeMap<Currency, f64>,
}

impl FxRateTable {
    /// Creates a table holding only the reporting currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(currency, rate)` pairs.
    ///
    /// # Errors
    ///
    /// Returns the first invalid entry, see [`FxRateTable::insert`].
    pub fn from_rates<I>(rates: I) -> Result<Self, RiskError>
    where
        I: IntoIterator<Item = (Currency, f64)>,
    {
        let mut table = Self::new();
        for (currency, rate) in rates {
            table.insert(currency, rate)?;
        }
        Ok(table)
    }

    /// Adds or replaces a rate.
    ///
    /// # Errors
    ///
    /// - `RiskError::InvalidRate` if `rate` is not positive and finite
    /// - `RiskError::ReportingCurrencyRate` for a reporting currency rate other than 1.0
    pub fn insert(&mut self, currency: Currency, rate: f64) -> Result<(), RiskError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RiskError::InvalidRate { currency, rate });
        }
        if currency == REPORTING_CURRENCY {
            if rate != 1.0 {
                return Err(RiskError::ReportingCurrencyRate { currency, rate });
            }
            return Ok(());
        }
        self.rates.insert(currency, rate);
        Ok(())
    }

    /// Returns the USD value of one unit of `currency`.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::MissingRate` if the currency is unknown.
    pub fn rate(&self, currency: Currency) -> Result<f64, RiskError> {
        if currency == REPORTING_CURRENCY {
            return Ok(1.0);
        }
        self.rates
            .get(&currency)
            .copied()
            .ok_or(RiskError::MissingRate(currency))
    }

    /// Returns `true` if a rate for `currency` is available.
    pub fn contains(&self, currency: Currency) -> bool {
        currency == REPORTING_CURRENCY || self.rates.contains_key(&currency)
    }

    /// Number of explicit (non-reporting) entries.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns `true` if only the reporting currency is known.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterates over explicit entries in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }

    /// Adds rates implied by the spot of trades with a USD leg.
    ///
    /// For `XXX/USD` the rate of `XXX` is the spot; for `USD/XXX` it is the
    /// reciprocal. The first trade for a currency wins and existing entries
    /// are never overridden. Returns the currencies added, in order.
    pub fn imply_from_trades<'a, I>(&mut self, trades: I) -> Vec<(Currency, f64)>
    where
        I: IntoIterator<Item = &'a FxOptionTrade>,
    {
        let mut added = Vec::new();
        for trade in trades {
            let pair = trade.currency_pair();
            let implied = if pair.quote() == REPORTING_CURRENCY {
                Some((pair.base(), trade.spot()))
            } else if pair.base() == REPORTING_CURRENCY {
                Some((pair.quote(), 1.0 / trade.spot()))
            } else {
                None
            };

            if let Some((currency, rate)) = implied {
                if !self.contains(currency) && self.insert(currency, rate).is_ok() {
                    added.push((currency, rate));
                }
            }
        }
        added
    }
}

/// A priced trade with figures in the reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTrade {
    priced: PricedTrade,
    pv_usd: f64,
    delta_usd: f64,
    vega_usd: f64,
}

impl NormalizedTrade {
    /// Returns the underlying priced trade.
    #[inline]
    pub fn priced(&self) -> &PricedTrade {
        &self.priced
    }

    /// Returns the validated trade.
    #[inline]
    pub fn trade(&self) -> &FxOptionTrade {
        self.priced.trade()
    }

    /// PV in the reporting currency.
    #[inline]
    pub fn pv_usd(&self) -> f64 {
        self.pv_usd
    }

    /// Delta in the reporting currency.
    #[inline]
    pub fn delta_usd(&self) -> f64 {
        self.delta_usd
    }

    /// Vega per vol point in the reporting currency.
    #[inline]
    pub fn vega_usd(&self) -> f64 {
        self.vega_usd
    }
}

/// Converts a priced trade's figures into the reporting currency.
///
/// # Errors
///
/// Returns `RiskError::MissingRate` naming the first currency without a rate.
pub fn normalize(priced: PricedTrade, table: &FxRateTable) -> Result<NormalizedTrade, RiskError> {
    let pv_rate = table.rate(priced.pv_currency())?;
    let delta_rate = match DELTA_CONVENTION.currency(&priced.trade().currency_pair()) {
        Some(currency) => table.rate(currency)?,
        None => 1.0,
    };

    Ok(NormalizedTrade {
        pv_usd: priced.pv() * pv_rate,
        delta_usd: priced.delta() * delta_rate,
        vega_usd: priced.vega() * pv_rate,
        priced,
    })
}
