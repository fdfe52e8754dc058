//! Degenerate-input policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the engine does when `σ·√T` (or a computed figure) is degenerate.
///
/// # Examples
/// ```
/// use pricer_pricing::DegeneratePolicy;
///
/// assert_eq!(DegeneratePolicy::default(), DegeneratePolicy::Reject);
/// assert_eq!("zero-risk".parse::<DegeneratePolicy>().unwrap(), DegeneratePolicy::ZeroRisk);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Fail with `DegenerateMarketInputs`; the trade is rejected.
    #[default]
    Reject,
    /// Keep the trade with zero PV, Delta and Vega.
    ZeroRisk,
}

impl DegeneratePolicy {
    /// Configuration name.
    pub const fn as_str(self) -> &'static str {
        match self {
            DegeneratePolicy::Reject => "reject",
            DegeneratePolicy::ZeroRisk => "zero_risk",
        }
    }
}

impl fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown degenerate policy '{0}': expected reject or zero_risk")]
pub struct ParsePolicyError(pub String);

impl FromStr for DegeneratePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "reject" => Ok(DegeneratePolicy::Reject),
            "zero_risk" | "zero" => Ok(DegeneratePolicy::ZeroRisk),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("REJECT".parse::<DegeneratePolicy>().unwrap(), DegeneratePolicy::Reject);
        assert_eq!("zero_risk".parse::<DegeneratePolicy>().unwrap(), DegeneratePolicy::ZeroRisk);
        assert!("ignore".parse::<DegeneratePolicy>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for policy in [DegeneratePolicy::Reject, DegeneratePolicy::ZeroRisk] {
            assert_eq!(policy.to_string().parse::<DegeneratePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DegeneratePolicy::ZeroRisk).unwrap();
        assert_eq!(json, "\"zero_risk\"");
    }
}
