//! Run configuration.
//!
//! Loaded from a TOML file, then overridden from `FXRISK_*` environment
//! variables, then validated. A missing file means defaults.
//!
//! ```toml
//! groupings = [["currency_pair"], ["quote_currency"], ["pair", "type"]]
//! degenerate_policy = "reject"
//! imply_rates = true
//! parallel_threshold = 100
//! log_level = "info"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_pricing::DegeneratePolicy;
use pricer_risk::aggregation::GroupKey;
use pricer_risk::parallel::ParallelConfig;
use pricer_risk::pipeline::PipelineConfig;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding [`RunConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "FXRISK_LOG_LEVEL";
/// Environment variable overriding [`RunConfig::degenerate_policy`].
pub const ENV_DEGENERATE_POLICY: &str = "FXRISK_DEGENERATE_POLICY";
/// Environment variable overriding [`RunConfig::imply_rates`].
pub const ENV_IMPLY_RATES: &str = "FXRISK_IMPLY_RATES";
/// Environment variable overriding [`RunConfig::parallel_threshold`].
pub const ENV_PARALLEL_THRESHOLD: &str = "FXRISK_PARALLEL_THRESHOLD";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`RunConfig`].
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// One or more settings are invalid.
    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace.
    Trace,
    /// Debug.
    Debug,
    /// Info.
    #[default]
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
}

impl LogLevel {
    /// Filter directive for `tracing_subscriber::EnvFilter`.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                s
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Settings for a pricing run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Selector lists, one risk tab per entry.
    pub groupings: Vec<Vec<String>>,
    /// Handling of degenerate `σ·√T`.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub degenerate_policy: DegeneratePolicy,
    /// Fill missing rates from trade spots where USD is a leg.
    pub imply_rates: bool,
    /// Batch size above which work is spread across threads.
    pub parallel_threshold: usize,
    /// Default log level when `RUST_LOG` is unset.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            groupings: vec![
                vec![GroupKey::CurrencyPair.as_str().to_string()],
                vec![GroupKey::QuoteCurrency.as_str().to_string()],
            ],
            degenerate_policy: DegeneratePolicy::default(),
            imply_rates: true,
            parallel_threshold: ParallelConfig::default().parallel_threshold,
            log_level: LogLevel::default(),
        }
    }
}

impl RunConfig {
    /// Parses TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, or returns defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Loads the file, applies environment overrides and validates.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `FXRISK_*` overrides read through `lookup`.
    ///
    /// Every unparseable override is reported, not just the first.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            match value.parse() {
                Ok(level) => self.log_level = level,
                Err(e) => errors.push(format!("{}: {}", ENV_LOG_LEVEL, e)),
            }
        }

        if let Some(value) = lookup(ENV_DEGENERATE_POLICY) {
            match value.parse() {
                Ok(policy) => self.degenerate_policy = policy,
                Err(e) => errors.push(format!("{}: {}", ENV_DEGENERATE_POLICY, e)),
            }
        }

        if let Some(value) = lookup(ENV_IMPLY_RATES) {
            match parse_bool(&value) {
                Some(flag) => self.imply_rates = flag,
                None => errors.push(format!(
                    "{}: expected true or false, got '{}'",
                    ENV_IMPLY_RATES, value
                )),
            }
        }

        if let Some(value) = lookup(ENV_PARALLEL_THRESHOLD) {
            match value.trim().parse() {
                Ok(threshold) => self.parallel_threshold = threshold,
                Err(_) => errors.push(format!(
                    "{}: expected a non-negative integer, got '{}'",
                    ENV_PARALLEL_THRESHOLD, value
                )),
            }
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Checks every grouping, collecting all problems.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        for (i, grouping) in self.groupings.iter().enumerate() {
            if let Err(e) = GroupKey::parse_list(&grouping.join(",")) {
                errors.push(format!("groupings[{}]: {}", i, e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Resolved selector lists.
    pub fn group_keys(&self) -> Result<Vec<Vec<GroupKey>>, ConfigError> {
        self.groupings
            .iter()
            .map(|g| GroupKey::parse_list(&g.join(",")))
            .collect::<Result<_, _>>()
            .map_err(|e| ConfigError::Validation(vec![e.to_string()]))
    }

    /// Builds the pipeline settings.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigError> {
        Ok(PipelineConfig {
            policy: self.degenerate_policy,
            imply_rates: self.imply_rates,
            parallel: ParallelConfig {
                parallel_threshold: self.parallel_threshold,
                ..ParallelConfig::default()
            },
            groupings: self.group_keys()?,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.groupings, vec![vec!["currency_pair"], vec!["quote_currency"]]);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Reject);
        assert!(config.imply_rates);
        assert_eq!(config.parallel_threshold, 100);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
            groupings = [["pair", "type"], []]
            degenerate_policy = "zero_risk"
            imply_rates = false
            parallel_threshold = 10
            log_level = "DEBUG"
        "#;
        let config = RunConfig::from_toml_str(text, Path::new("fxrisk.toml")).unwrap();
        assert_eq!(config.degenerate_policy, DegeneratePolicy::ZeroRisk);
        assert!(!config.imply_rates);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.group_keys().unwrap(),
            vec![vec![GroupKey::CurrencyPair, GroupKey::OptionType], vec![]]
        );

        let pipeline = config.pipeline_config().unwrap();
        assert_eq!(pipeline.parallel.parallel_threshold, 10);
        assert_eq!(pipeline.policy, DegeneratePolicy::ZeroRisk);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RunConfig::from_toml_str("imply_rates = false", Path::new("x.toml")).unwrap();
        assert!(!config.imply_rates);
        assert_eq!(config.groupings.len(), 2);
    }

    #[test]
    fn test_bad_toml_is_fatal() {
        let err = RunConfig::from_toml_str("log_level = \"loud\"", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let err = RunConfig::from_toml_str("unknown_key = 1", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = RunConfig::load_or_default(Path::new("/no/such/fxrisk.toml")).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = RunConfig::default()
            .with_overrides(lookup(&[
                (ENV_LOG_LEVEL, "warn"),
                (ENV_DEGENERATE_POLICY, "zero-risk"),
                (ENV_IMPLY_RATES, "no"),
                (ENV_PARALLEL_THRESHOLD, "0"),
            ]))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::ZeroRisk);
        assert!(!config.imply_rates);
        assert_eq!(config.parallel_threshold, 0);
    }

    #[test]
    fn test_env_override_errors_are_collected() {
        let err = RunConfig::default()
            .with_overrides(lookup(&[
                (ENV_IMPLY_RATES, "maybe"),
                (ENV_PARALLEL_THRESHOLD, "-3"),
            ]))
            .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_collects_grouping_errors() {
        let config = RunConfig {
            groupings: vec![vec!["desk".into()], vec!["pair".into(), "currency_pair".into()]],
            ..RunConfig::default()
        };
        match config.validate().unwrap_err() {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("groupings[0]"));
                assert!(errors[1].starts_with("groupings[1]"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
