//! FX rate table loading.
//!
//! Rates are quoted as USD per one unit of the currency. Two layouts are
//! read:
//!
//! ```text
//! currency,rate_to_usd        [rates]
//! EUR,1.08                    EUR = 1.08
//! JPY,0.006757                JPY = 0.006757
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use pricer_core::types::Currency;
use serde::Deserialize;
use tracing::info;

use crate::error::LoaderError;

const CURRENCY_COLUMN: &str = "currency";
const RATE_COLUMN: &str = "rate_to_usd";

/// Loads a rate table from a `.toml` file or from CSV.
///
/// Entries come back in file order for CSV and in currency order for TOML.
///
/// # Errors
///
/// Any unreadable file, malformed row, bad currency code, non-positive or
/// non-finite rate, or repeated currency.
pub fn load_rates(path: impl AsRef<Path>) -> Result<Vec<(Currency, f64)>, LoaderError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let rates = if is_toml {
        parse_rates_toml(text)?
    } else {
        parse_rates_csv(text)?
    };

    info!(path = %path.display(), currencies = rates.len(), "Loaded FX rate table");
    Ok(rates)
}

#[derive(Debug, Deserialize)]
struct RateFile {
    rates: BTreeMap<String, f64>,
}

/// Parses a TOML `[rates]` table.
///
/// # Examples
/// ```
/// use adapter_loader::parse_rates_toml;
/// use pricer_core::types::Currency;
///
/// let rates = parse_rates_toml("[rates]\nEUR = 1.08\nGBP = 1.27\n").unwrap();
/// assert_eq!(rates, vec![(Currency::EUR, 1.08), (Currency::GBP, 1.27)]);
/// ```
pub fn parse_rates_toml(text: &str) -> Result<Vec<(Currency, f64)>, LoaderError> {
    let file: RateFile = toml::from_str(text)?;
    file.rates
        .iter()
        .enumerate()
        .map(|(row, (code, rate))| entry(row, code, *rate))
        .collect()
}

/// Parses a `currency,rate_to_usd` CSV table.
///
/// Header names are matched case-insensitively; other columns are ignored.
pub fn parse_rates_csv(text: &str) -> Result<Vec<(Currency, f64)>, LoaderError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| LoaderError::MissingColumn(name.to_string()))
    };
    let currency_idx = column(CURRENCY_COLUMN)?;
    let rate_idx = column(RATE_COLUMN)?;

    let mut rates: Vec<(Currency, f64)> = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let code = record.get(currency_idx).unwrap_or_default();
        let raw_rate = record.get(rate_idx).unwrap_or_default();
        let rate = raw_rate.parse::<f64>().map_err(|_| LoaderError::InvalidRow {
            row,
            message: format!("rate '{}' is not a number", raw_rate),
        })?;

        let (currency, rate) = entry(row, code, rate)?;
        if rates.iter().any(|(c, _)| *c == currency) {
            return Err(LoaderError::InvalidRow {
                row,
                message: format!("duplicate rate for {}", currency),
            });
        }
        rates.push((currency, rate));
    }
    Ok(rates)
}

fn entry(row: usize, code: &str, rate: f64) -> Result<(Currency, f64), LoaderError> {
    let currency = code
        .parse::<Currency>()
        .map_err(|e| LoaderError::InvalidRow {
            row,
            message: e.to_string(),
        })?;
    if !(rate.is_finite() && rate > 0.0) {
        return Err(LoaderError::InvalidRow {
            row,
            message: format!("rate for {} must be finite and > 0, got {}", currency, rate),
        });
    }
    Ok((currency, rate))
}
