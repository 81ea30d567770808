//! Run configuration for the in-crate hosts.

use serde::{Deserialize, Serialize};

use crate::result::{DescribeError, DescribeResult};

/// Environment variable holding a test name filter.
pub const FILTER_ENV: &str = "DESCRIBE_COMPONENT_FILTER";

/// Environment variable enabling fail-fast mode.
pub const FAIL_FAST_ENV: &str = "DESCRIBE_COMPONENT_FAIL_FAST";

/// How a host runs its registered tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Stop after the first failure and report the rest as skipped
    pub fail_fast: bool,
    /// Only run tests whose full name contains this substring
    pub filter: Option<String>,
    /// Report panics as failures instead of propagating them
    pub catch_panics: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            filter: None,
            catch_panics: true,
        }
    }
}

impl RunConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::Json`] if the document is malformed.
    pub fn from_json(json: &str) -> DescribeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read [`FILTER_ENV`] and [`FAIL_FAST_ENV`] from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::Config`] if the fail-fast value is not a boolean.
    pub fn from_env() -> DescribeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::Config`] if the fail-fast value is not a boolean.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DescribeResult<Self> {
        let mut config = Self::default();
        if let Some(filter) = lookup(FILTER_ENV).filter(|f| !f.is_empty()) {
            config.filter = Some(filter);
        }
        if let Some(raw) = lookup(FAIL_FAST_ENV) {
            config.fail_fast = parse_flag(FAIL_FAST_ENV, &raw)?;
        }
        Ok(config)
    }

    /// Enable fail-fast mode
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set the name filter
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable panic catching
    #[must_use]
    pub const fn with_catch_panics(mut self, enabled: bool) -> Self {
        self.catch_panics = enabled;
        self
    }

    /// Whether a test with this full name should run
    #[must_use]
    pub fn selects(&self, full_name: &str) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |filter| full_name.contains(filter))
    }
}

fn parse_flag(key: &str, raw: &str) -> DescribeResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DescribeError::Config {
            message: format!("{key} must be a boolean, got `{other}`"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::new();
        assert!(!config.fail_fast);
        assert!(config.filter.is_none());
        assert!(config.catch_panics);
        assert!(config.selects("anything"));
    }

    #[test]
    fn test_builder() {
        let config = RunConfig::new()
            .with_fail_fast()
            .with_filter("ColorableDiv")
            .with_catch_panics(false);
        assert!(config.fail_fast);
        assert!(!config.catch_panics);
        assert!(config.selects("ColorableDiv renders red"));
        assert!(!config.selects("Toggle renders"));
    }

    #[test]
    fn test_from_json_partial() {
        let config = RunConfig::from_json(r#"{"fail_fast": true}"#).unwrap();
        assert!(config.fail_fast);
        assert!(config.catch_panics);
        assert!(config.filter.is_none());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = RunConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, DescribeError::Json(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_filter() {
        let config = RunConfig::new().with_filter("mount");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RunConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_lookup() {
        let config = RunConfig::from_lookup(lookup(&[
            (FILTER_ENV, "shallow"),
            (FAIL_FAST_ENV, "yes"),
        ]))
        .unwrap();
        assert_eq!(config.filter.as_deref(), Some("shallow"));
        assert!(config.fail_fast);
    }

    #[test]
    fn test_from_lookup_empty_filter_ignored() {
        let config = RunConfig::from_lookup(lookup(&[(FILTER_ENV, "")])).unwrap();
        assert!(config.filter.is_none());
    }

    #[test]
    fn test_from_lookup_bad_flag() {
        let err = RunConfig::from_lookup(lookup(&[(FAIL_FAST_ENV, "sometimes")])).unwrap_err();
        assert!(err.to_string().contains(FAIL_FAST_ENV));
    }
}
