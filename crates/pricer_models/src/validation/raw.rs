//! Raw, unvalidated trade records.
//!
//! A [`RawRecord`] is the field mapping handed over by ingestion: an ordered
//! list of `(column name, value)` pairs plus the source row index. Column
//! names are matched against [`TradeField`] by canonical name or by the
//! spreadsheet alias, case-insensitively.

use std::fmt;

use serde::Serialize;

/// A single raw cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A numeric cell.
    Number(f64),
    /// A text cell, not yet trimmed.
    Text(String),
    /// An empty or absent cell.
    Missing,
}

static MISSING: RawValue = RawValue::Missing;

impl RawValue {
    /// Returns `true` for missing values and text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Number(_) => false,
        }
    }

    /// Returns the textual form of the value, exactly as given.
    ///
    /// Whole numbers render without a fractional part so that numeric trade
    /// identifiers such as `1001` survive a spreadsheet round trip.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Missing => None,
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Number(v) => Some(format_number(*v)),
        }
    }
}

fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(v) => write!(f, "{}", format_number(*v)),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Missing => Ok(()),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Number(v as f64)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl<V: Into<RawValue>> From<Option<V>> for RawValue {
    fn from(v: Option<V>) -> Self {
        v.map_or(RawValue::Missing, Into::into)
    }
}

/// Trade fields recognised by the gatekeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeField {
    /// Unique trade identifier.
    TradeId,
    /// BASE/QUOTE pair.
    CurrencyPair,
    /// Signed notional.
    Notional,
    /// Currency of the notional.
    NotionalCurrency,
    /// Strike.
    Strike,
    /// Spot.
    Spot,
    /// Annualised volatility.
    Volatility,
    /// Quote currency rate.
    DomesticRate,
    /// Base currency rate.
    ForeignRate,
    /// Time to expiry in years.
    TimeToExpiry,
    /// Call or put.
    OptionType,
    /// Optional trade date.
    TradeDate,
}

impl TradeField {
    /// Fields that must be present and non-empty, in check order.
    pub const REQUIRED: [TradeField; 11] = [
        TradeField::TradeId,
        TradeField::CurrencyPair,
        TradeField::Notional,
        TradeField::NotionalCurrency,
        TradeField::Strike,
        TradeField::Spot,
        TradeField::Volatility,
        TradeField::DomesticRate,
        TradeField::ForeignRate,
        TradeField::TimeToExpiry,
        TradeField::OptionType,
    ];

    /// Fields coerced to decimals, in check order.
    pub const NUMERIC: [TradeField; 7] = [
        TradeField::Notional,
        TradeField::Strike,
        TradeField::Spot,
        TradeField::Volatility,
        TradeField::DomesticRate,
        TradeField::ForeignRate,
        TradeField::TimeToExpiry,
    ];

    /// Every recognised field.
    pub const ALL: [TradeField; 12] = [
        TradeField::TradeId,
        TradeField::CurrencyPair,
        TradeField::Notional,
        TradeField::NotionalCurrency,
        TradeField::Strike,
        TradeField::Spot,
        TradeField::Volatility,
        TradeField::DomesticRate,
        TradeField::ForeignRate,
        TradeField::TimeToExpiry,
        TradeField::OptionType,
        TradeField::TradeDate,
    ];

    /// Canonical snake_case name.
    pub const fn canonical(self) -> &'static str {
        match self {
            TradeField::TradeId => "trade_id",
            TradeField::CurrencyPair => "currency_pair",
            TradeField::Notional => "notional",
            TradeField::NotionalCurrency => "notional_currency",
            TradeField::Strike => "strike",
            TradeField::Spot => "spot",
            TradeField::Volatility => "volatility",
            TradeField::DomesticRate => "domestic_rate",
            TradeField::ForeignRate => "foreign_rate",
            TradeField::TimeToExpiry => "time_to_expiry",
            TradeField::OptionType => "option_type",
            TradeField::TradeDate => "trade_date",
        }
    }

    /// Spreadsheet column alias.
    pub const fn alias(self) -> &'static str {
        match self {
            TradeField::TradeId => "TradeID",
            TradeField::CurrencyPair => "Underlying",
            TradeField::Notional => "Notional",
            TradeField::NotionalCurrency => "NotionalCurrency",
            TradeField::Strike => "Strike",
            TradeField::Spot => "Spot",
            TradeField::Volatility => "Vol",
            TradeField::DomesticRate => "RateDomestic",
            TradeField::ForeignRate => "RateForeign",
            TradeField::TimeToExpiry => "Expiry",
            TradeField::OptionType => "OptionType",
            TradeField::TradeDate => "TradeDate",
        }
    }

    /// Returns `true` if `name` is this field's canonical name or alias.
    pub fn matches(self, name: &str) -> bool {
        let name = name.trim();
        name.eq_ignore_ascii_case(self.canonical()) || name.eq_ignore_ascii_case(self.alias())
    }

    /// Resolves a column header to a field.
    pub fn from_header(name: &str) -> Option<TradeField> {
        Self::ALL.into_iter().find(|field| field.matches(name))
    }
}

impl fmt::Display for TradeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// An unvalidated field mapping for one input row.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RawRecord {
    row_index: usize,
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    /// Creates an empty record for the given 0-based data row.
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            fields: Vec::new(),
        }
    }

    /// Adds a field, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the 0-based source row index.
    #[inline]
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Iterates over fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the value of `field`, or [`RawValue::Missing`] if absent.
    ///
    /// The first column matching the canonical name or alias wins.
    pub fn get(&self, field: TradeField) -> &RawValue {
        self.fields
            .iter()
            .find(|(name, _)| field.matches(name))
            .map_or(&MISSING, |(_, value)| value)
    }

    /// Returns the trade identifier if present and non-blank.
    pub fn trade_id(&self) -> Option<String> {
        let value = self.get(TradeField::TradeId);
        if value.is_blank() {
            None
        } else {
            value.as_text()
        }
    }

    /// Returns the trade identifier, falling back to `Row_<index>`.
    pub fn identifier(&self) -> String {
        self.trade_id()
            .unwrap_or_else(|| format!("Row_{}", self.row_index))
    }
}
