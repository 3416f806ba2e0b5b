//! Configuration for swap valuation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do when a rate cut-off exceeds the number of fixings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateCutOffPolicy {
    /// Fail with a precondition error.
    #[default]
    Reject,
    /// Reduce the cut-off to the number of fixings.
    Clamp,
}

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML is malformed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for swap valuation.
///
/// Built once and passed to the pricers explicitly.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `rate_cut_off_policy` | `reject` | Cut-off longer than the fixings |
/// | `parallel_batch_threshold` | 64 | Batch size above which rayon is used |
/// | `explain_periods` | true | Per-period entries in the explain map |
///
/// # Examples
///
/// ```
/// use pricer_pricing::rates::{RateCutOffPolicy, SwapPricerConfig};
///
/// let config = SwapPricerConfig::from_toml_str(
///     r#"
///     rate_cut_off_policy = "clamp"
///     parallel_batch_threshold = 8
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.rate_cut_off_policy, RateCutOffPolicy::Clamp);
/// assert!(config.explain_periods);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwapPricerConfig {
    /// Handling of a cut-off exceeding the fixings of a period.
    pub rate_cut_off_policy: RateCutOffPolicy,

    /// Batch size above which batch valuation runs in parallel.
    pub parallel_batch_threshold: usize,

    /// Whether the explain map carries per-period entries.
    pub explain_periods: bool,
}

impl Default for SwapPricerConfig {
    fn default() -> Self {
        Self {
            rate_cut_off_policy: RateCutOffPolicy::Reject,
            parallel_batch_threshold: 64,
            explain_periods: true,
        }
    }
}

impl SwapPricerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rate cut-off policy.
    pub fn with_rate_cut_off_policy(mut self, policy: RateCutOffPolicy) -> Self {
        self.rate_cut_off_policy = policy;
        self
    }

    /// Sets the parallel batch threshold.
    pub fn with_parallel_batch_threshold(mut self, threshold: usize) -> Self {
        self.parallel_batch_threshold = threshold;
        self
    }

    /// Sets whether the explain map carries per-period entries.
    pub fn with_explain_periods(mut self, explain_periods: bool) -> Self {
        self.explain_periods = explain_periods;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_batch_threshold == 0 {
            return Err(ConfigError::Invalid(
                "parallel_batch_threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a TOML document; missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwapPricerConfig::default();
        assert_eq!(config.rate_cut_off_policy, RateCutOffPolicy::Reject);
        assert_eq!(config.parallel_batch_threshold, 64);
        assert!(config.explain_periods);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = SwapPricerConfig::new()
            .with_rate_cut_off_policy(RateCutOffPolicy::Clamp)
            .with_parallel_batch_threshold(4)
            .with_explain_periods(false);
        assert_eq!(config.rate_cut_off_policy, RateCutOffPolicy::Clamp);
        assert_eq!(config.parallel_batch_threshold, 4);
        assert!(!config.explain_periods);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(
            SwapPricerConfig::from_toml_str("").unwrap(),
            SwapPricerConfig::default()
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SwapPricerConfig::from_toml_str("parallel_batch_threshold = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SwapPricerConfig::from_toml_str("rate_cut_off_policy = \"truncate\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SwapPricerConfig::from_toml_str("unknown_key = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            SwapPricerConfig::from_file("/nonexistent/swap_pricer.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SwapPricerConfig::new().with_rate_cut_off_policy(RateCutOffPolicy::Clamp);
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SwapPricerConfig::from_toml_str(&text).unwrap(), config);
    }
}
