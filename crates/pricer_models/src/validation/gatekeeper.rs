//! Trade validation gatekeeper.
//!
//! [`validate`] runs the stages of
//! [`ValidationRule::ORDER`](super::ValidationRule::ORDER) in sequence and
//! stops at the first failure:
//!
//! 1. **required-fields**: every required field present and non-empty
//! 2. **type-coercion**: numerics parse as decimals, trade date as `YYYY-MM-DD`
//! 3. **pattern-match**: pair is `XXX/YYY`, notional currency is `XXX`
//! 4. **cross-field**: notional currency is a leg of the pair, option type is
//!    call or put, base differs from quote
//! 5. **numeric-range**: all numerics finite, notional non-zero, spot and
//!    strike positive, `0 < T <= 100`, `0 <= σ <= 5`
//!
//! Each stage consumes what the previous one produced. The function is pure
//! and may be called from any number of threads.

use chrono::NaiveDate;
use pricer_core::types::{Currency, CurrencyError, CurrencyPair};

use super::raw::{RawRecord, RawValue, TradeField};
use super::rejection::{RejectionCode, RejectionReason};
use crate::instruments::fx::{FxOptionTrade, FxOptionType};

/// Longest accepted time to expiry, in years.
pub const MAX_TIME_TO_EXPIRY: f64 = 100.0;

/// Highest accepted annualised volatility.
pub const MAX_VOLATILITY: f64 = 5.0;

/// Accepted trade date format.
pub const TRADE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates one raw record.
///
/// # Errors
///
/// Returns the [`RejectionReason`] of the first failing check.
///
/// # Examples
///
/// ```
/// use pricer_models::validation::{validate, RawRecord, RejectionCode};
///
/// let record = RawRecord::new(0)
///     .with("TradeID", "FX-1")
///     .with("Underlying", "USD/JPY")
///     .with("Notional", 1_000_000.0)
///     .with("NotionalCurrency", "EUR")
///     .with("Strike", 150.0)
///     .with("Spot", 148.0)
///     .with("Vol", 0.10)
///     .with("RateDomestic", 0.05)
///     .with("RateForeign", 0.001)
///     .with("Expiry", 0.5)
///     .with("OptionType", "Call");
///
/// let reason = validate(&record).unwrap_err();
/// assert_eq!(reason.code(), RejectionCode::CurrencyPairMismatch);
/// ```
pub fn validate(record: &RawRecord) -> Result<FxOptionTrade, RejectionReason> {
    check_required(record)?;
    let coerced = coerce(record)?;
    let patterned = match_patterns(coerced)?;
    let consistent = check_cross_field(patterned)?;
    check_ranges(consistent)
}

/// Output of the type-coercion stage.
struct Coerced {
    trade_id: String,
    pair_text: String,
    notional_currency_text: String,
    option_type_text: String,
    numbers: Numbers,
    trade_date: Option<NaiveDate>,
}

#[derive(Clone, Copy)]
struct Numbers {
    notional: f64,
    strike: f64,
    spot: f64,
    volatility: f64,
    domestic_rate: f64,
    foreign_rate: f64,
    time_to_expiry: f64,
}

/// Output of the pattern-match stage.
struct Patterned {
    coerced: Coerced,
    base: Currency,
    quote: Currency,
    notional_currency: Currency,
}

/// Output of the cross-field stage.
struct Consistent {
    coerced: Coerced,
    pair: CurrencyPair,
    notional_currency: Currency,
    option_type: FxOptionType,
}

fn check_required(record: &RawRecord) -> Result<(), RejectionReason> {
    match TradeField::REQUIRED
        .iter()
        .find(|field| record.get(**field).is_blank())
    {
        Some(field) => Err(RejectionReason::new(
            RejectionCode::MissingField,
            format!("missing required field '{}'", field),
        )),
        None => Ok(()),
    }
}

fn text(record: &RawRecord, field: TradeField) -> String {
    record.get(field).as_text().unwrap_or_default()
}

fn coerce_number(record: &RawRecord, field: TradeField) -> Result<f64, RejectionReason> {
    match record.get(field) {
        RawValue::Number(v) => Ok(*v),
        RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            RejectionReason::new(
                RejectionCode::InvalidNumber,
                format!("field '{}' is not a number: '{}'", field, s.trim()),
            )
        }),
        RawValue::Missing => Err(RejectionReason::new(
            RejectionCode::MissingField,
            format!("missing required field '{}'", field),
        )),
    }
}

fn coerce_date(record: &RawRecord) -> Result<Option<NaiveDate>, RejectionReason> {
    let value = record.get(TradeField::TradeDate);
    if value.is_blank() {
        return Ok(None);
    }
    let raw = value.as_text().unwrap_or_default();
    NaiveDate::parse_from_str(&raw, TRADE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            RejectionReason::new(
                RejectionCode::InvalidDate,
                format!("field '{}' is not a YYYY-MM-DD date: '{}'", TradeField::TradeDate, raw),
            )
        })
}

fn coerce(record: &RawRecord) -> Result<Coerced, RejectionReason> {
    let numbers = Numbers {
        notional: coerce_number(record, TradeField::Notional)?,
        strike: coerce_number(record, TradeField::Strike)?,
        spot: coerce_number(record, TradeField::Spot)?,
        volatility: coerce_number(record, TradeField::Volatility)?,
        domestic_rate: coerce_number(record, TradeField::DomesticRate)?,
        foreign_rate: coerce_number(record, TradeField::ForeignRate)?,
        time_to_expiry: coerce_number(record, TradeField::TimeToExpiry)?,
    };
    let trade_date = coerce_date(record)?;

    Ok(Coerced {
        trade_id: text(record, TradeField::TradeId),
        pair_text: text(record, TradeField::CurrencyPair),
        notional_currency_text: text(record, TradeField::NotionalCurrency),
        option_type_text: text(record, TradeField::OptionType),
        numbers,
        trade_date,
    })
}

fn match_patterns(coerced: Coerced) -> Result<Patterned, RejectionReason> {
    let (base, quote) = match coerced.pair_text.split_once('/') {
        Some((b, q)) if CurrencyPair::matches_pattern(&coerced.pair_text) => {
            (parse_code(b)?, parse_code(q)?)
        }
        _ => {
            return Err(RejectionReason::new(
                RejectionCode::InvalidCurrencyPairFormat,
                format!(
                    "currency pair '{}' does not match XXX/YYY",
                    coerced.pair_text
                ),
            ))
        }
    };

    if !Currency::matches_pattern(&coerced.notional_currency_text) {
        return Err(RejectionReason::new(
            RejectionCode::InvalidCurrencyCode,
            format!(
                "notional currency '{}' is not a three-letter code",
                coerced.notional_currency_text
            ),
        ));
    }
    let notional_currency = parse_code(&coerced.notional_currency_text)?;

    Ok(Patterned {
        coerced,
        base,
        quote,
        notional_currency,
    })
}

fn parse_code(code: &str) -> Result<Currency, RejectionReason> {
    code.parse::<Currency>().map_err(currency_rejection)
}

fn currency_rejection(err: CurrencyError) -> RejectionReason {
    let code = match err {
        CurrencyError::InvalidCode(_) => RejectionCode::InvalidCurrencyCode,
        CurrencyError::InvalidPairFormat(_) => RejectionCode::InvalidCurrencyPairFormat,
        CurrencyError::SameCurrency(_) => RejectionCode::SameCurrencyPair,
    };
    RejectionReason::new(code, err.to_string())
}

fn check_cross_field(patterned: Patterned) -> Result<Consistent, RejectionReason> {
    let Patterned {
        coerced,
        base,
        quote,
        notional_currency,
    } = patterned;

    if notional_currency != base && notional_currency != quote {
        return Err(RejectionReason::new(
            RejectionCode::CurrencyPairMismatch,
            format!(
                "notional currency '{}' is invalid for pair '{}': must be either '{}' or '{}'",
                notional_currency, coerced.pair_text, base, quote
            ),
        ));
    }

    let option_type = coerced
        .option_type_text
        .parse::<FxOptionType>()
        .map_err(|err| RejectionReason::new(RejectionCode::InvalidOptionType, err.to_string()))?;

    let pair = CurrencyPair::new(base, quote).map_err(currency_rejection)?;

    Ok(Consistent {
        coerced,
        pair,
        notional_currency,
        option_type,
    })
}

fn out_of_range(detail: String) -> RejectionReason {
    RejectionReason::new(RejectionCode::OutOfRange, detail)
}

fn check_ranges(consistent: Consistent) -> Result<FxOptionTrade, RejectionReason> {
    let Consistent {
        coerced,
        pair,
        notional_currency,
        option_type,
    } = consistent;
    let n = coerced.numbers;

    let named = [
        (TradeField::Notional, n.notional),
        (TradeField::Strike, n.strike),
        (TradeField::Spot, n.spot),
        (TradeField::Volatility, n.volatility),
        (TradeField::DomesticRate, n.domestic_rate),
        (TradeField::ForeignRate, n.foreign_rate),
        (TradeField::TimeToExpiry, n.time_to_expiry),
    ];
    if let Some((field, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
        return Err(out_of_range(format!("{} must be finite, got {}", field, value)));
    }

    if n.notional == 0.0 {
        return Err(out_of_range("notional must be non-zero".to_string()));
    }
    if n.spot <= 0.0 {
        return Err(out_of_range(format!("spot must be > 0, got {}", n.spot)));
    }
    if n.strike <= 0.0 {
        return Err(out_of_range(format!("strike must be > 0, got {}", n.strike)));
    }
    if n.time_to_expiry <= 0.0 || n.time_to_expiry > MAX_TIME_TO_EXPIRY {
        return Err(out_of_range(format!(
            "time_to_expiry must be in (0, {}], got {}",
            MAX_TIME_TO_EXPIRY, n.time_to_expiry
        )));
    }
    if n.volatility < 0.0 || n.volatility > MAX_VOLATILITY {
        return Err(out_of_range(format!(
            "volatility must be in [0, {}], got {}",
            MAX_VOLATILITY, n.volatility
        )));
    }

    Ok(FxOptionTrade {
        trade_id: coerced.trade_id,
        currency_pair: pair,
        notional: n.notional,
        notional_currency,
        strike: n.strike,
        spot: n.spot,
        volatility: n.volatility,
        domestic_rate: n.domestic_rate,
        foreign_rate: n.foreign_rate,
        time_to_expiry: n.time_to_expiry,
        option_type,
        trade_date: coerced.trade_date,
    })
}
