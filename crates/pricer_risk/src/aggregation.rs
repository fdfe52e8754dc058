//! Portfolio aggregation of normalised risk.
//!
//! Groups [`NormalizedTrade`]s by an ordered list of [`GroupKey`] selectors
//! and sums PV, Delta and Vega in the reporting currency per group, plus a
//! grand total across all groups.
//!
//! - Groups appear in order of first appearance in the input
//! - Sums accumulate in input order, so results are reproducible
//! - An empty selector list yields a single `ALL` group

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AggregationInputError;
use crate::normalization::NormalizedTrade;

/// Label of the single group produced by an empty selector list.
pub const ALL_GROUP: &str = "ALL";

/// Label for trades without a value for the selected key.
pub const NOT_AVAILABLE: &str = "N/A";

/// A group-by selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    /// BASE/QUOTE pair.
    CurrencyPair,
    /// Base currency.
    BaseCurrency,
    /// Quote currency, i.e. the PV currency.
    QuoteCurrency,
    /// Notional currency.
    NotionalCurrency,
    /// Call or put.
    OptionType,
    /// Trade date, `N/A` when absent.
    TradeDate,
}

impl GroupKey {
    /// Canonical selector name.
    pub const fn as_str(self) -> &'static str {
        match self {
            GroupKey::CurrencyPair => "currency_pair",
            GroupKey::BaseCurrency => "base_currency",
            GroupKey::QuoteCurrency => "quote_currency",
            GroupKey::NotionalCurrency => "notional_currency",
            GroupKey::OptionType => "option_type",
            GroupKey::TradeDate => "trade_date",
        }
    }

    /// Extracts this key's value from a trade.
    pub fn value(self, trade: &NormalizedTrade) -> String {
        let t = trade.trade();
        match self {
            GroupKey::CurrencyPair => t.currency_pair().code(),
            GroupKey::BaseCurrency => t.currency_pair().base().to_string(),
            GroupKey::QuoteCurrency => t.currency_pair().quote().to_string(),
            GroupKey::NotionalCurrency => t.notional_currency().to_string(),
            GroupKey::OptionType => t.option_type().to_string(),
            GroupKey::TradeDate => t
                .trade_date()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.to_string()),
        }
    }

    /// Parses a comma-separated selector list such as `"pair, option-type"`.
    ///
    /// Empty text yields an empty list.
    ///
    /// # Errors
    ///
    /// - `AggregationInputError::UnknownSelector` for an unrecognised name
    /// - `AggregationInputError::DuplicateSelector` for a repeated name
    pub fn parse_list(text: &str) -> Result<Vec<GroupKey>, AggregationInputError> {
        let mut keys = Vec::new();
        for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let key: GroupKey = part.parse()?;
            if keys.contains(&key) {
                return Err(AggregationInputError::DuplicateSelector(part.to_string()));
            }
            keys.push(key);
        }
        Ok(keys)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKey {
    type Err = AggregationInputError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "currency_pair" | "pair" => Ok(GroupKey::CurrencyPair),
            "base_currency" | "base" => Ok(GroupKey::BaseCurrency),
            "quote_currency" | "quote" | "currency" => Ok(GroupKey::QuoteCurrency),
            "notional_currency" => Ok(GroupKey::NotionalCurrency),
            "option_type" | "type" => Ok(GroupKey::OptionType),
            "trade_date" | "date" => Ok(GroupKey::TradeDate),
            _ => Err(AggregationInputError::UnknownSelector(s.to_string())),
        }
    }
}

/// Summed figures for a set of trades.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GroupTotals {
    /// Sum of PV in the reporting currency.
    pub pv_usd: f64,
    /// Sum of Delta in the reporting currency.
    pub delta_usd: f64,
    /// Sum of Vega in the reporting currency.
    pub vega_usd: f64,
    /// Number of trades summed.
    pub trade_count: usize,
}

impl GroupTotals {
    /// Adds one trade.
    pub fn add(&mut self, trade: &NormalizedTrade) {
        self.pv_usd += trade.pv_usd();
        self.delta_usd += trade.delta_usd();
        self.vega_usd += trade.vega_usd();
        self.trade_count += 1;
    }
}

/// One row of a grouped summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskGroup {
    /// Key values, one per selector.
    pub key: Vec<String>,
    /// Summed figures.
    pub totals: GroupTotals,
}

impl RiskGroup {
    /// Key values joined with `" | "`.
    pub fn label(&self) -> String {
        self.key.join(" | ")
    }
}

/// Aggregated risk for one grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    selectors: Vec<GroupKey>,
    groups: Vec<RiskGroup>,
    total: GroupTotals,
}

impl PortfolioSummary {
    /// Selectors the summary was grouped by.
    pub fn selectors(&self) -> &[GroupKey] {
        &self.selectors
    }

    /// Groups in order of first appearance.
    pub fn groups(&self) -> &[RiskGroup] {
        &self.groups
    }

    /// Grand total across all groups.
    pub fn total(&self) -> GroupTotals {
        self.total
    }

    /// Looks up a group by its key values.
    pub fn group(&self, key: &[&str]) -> Option<&RiskGroup> {
        self.groups
            .iter()
            .find(|g| g.key.len() == key.len() && g.key.iter().zip(key).all(|(a, b)| a == b))
    }

    /// Selector names joined with `_`, or `all` for an empty list.
    pub fn name(&self) -> String {
        if self.selectors.is_empty() {
            "all".to_string()
        } else {
            self.selectors
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join("_")
        }
    }
}

/// Groups and sums normalised trades.
///
/// # Examples
///
/// ```
/// use pricer_risk::aggregation::{aggregate, GroupKey};
///
/// let summary = aggregate(&[], &[GroupKey::CurrencyPair]);
/// assert!(summary.groups().is_empty());
/// assert_eq!(summary.total().trade_count, 0);
/// assert_eq!(summary.total().pv_usd, 0.0);
/// ```
pub fn aggregate(trades: &[NormalizedTrade], keys: &[GroupKey]) -> PortfolioSummary {
    let mut groups: Vec<RiskGroup> = Vec::new();
    let mut index: HashMap<Vec<String>, usize> = HashMap::new();
    let mut total = GroupTotals::default();

    for trade in trades {
        let key: Vec<String> = if keys.is_empty() {
            vec![ALL_GROUP.to_string()]
        } else {
            keys.iter().map(|k| k.value(trade)).collect()
        };

        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RiskGroup {
                    key,
                    totals: GroupTotals::default(),
                });
                groups.len() - 1
            }
        };
        groups[slot].totals.add(trade);
        total.add(trade);
    }

    PortfolioSummary {
        selectors: keys.to_vec(),
        groups,
        total,
    }
}
