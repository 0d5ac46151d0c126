//! Declarative logger configuration
//!
//! `LoggerConfig` carries the plain-data part of a logger's setup (everything
//! except the injected sink, capture client and process controller) so it can
//! be read from a JSON document.

use super::error::{LoggerError, Result};
use super::meta::Meta;
use super::severity::Severity;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub service_name: String,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub env_tags: Option<Meta>,
    #[serde(default)]
    pub min_severity: Option<Severity>,
    /// Presence switches the logger into buffered mode
    #[serde(default)]
    pub flush_interval_ms: Option<u64>,
}

impl LoggerConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            return Err(LoggerError::config(
                "LoggerConfig",
                "service_name must not be empty",
            ));
        }
        if self.flush_interval_ms == Some(0) {
            return Err(LoggerError::config(
                "LoggerConfig",
                "flush_interval_ms must be positive",
            ));
        }
        Ok(())
    }

    pub fn flush_interval(&self) -> Option<Duration> {
        self.flush_interval_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_config() {
        let config = LoggerConfig::from_json(r#"{"service_name": "billing"}"#).unwrap();
        assert_eq!(config, LoggerConfig::new("billing"));
        assert_eq!(config.flush_interval(), None);
    }

    #[test]
    fn test_full_config() {
        let config = LoggerConfig::from_json(
            r#"{
                "service_name": "billing",
                "release": "billing-1.4.2",
                "env_tags": {"env": "staging", "region": "eu-west-1"},
                "min_severity": "warn",
                "flush_interval_ms": 250
            }"#,
        )
        .unwrap();

        assert_eq!(config.release.as_deref(), Some("billing-1.4.2"));
        assert_eq!(config.min_severity, Some(Severity::Warn));
        assert_eq!(config.flush_interval(), Some(Duration::from_millis(250)));
        let tags = config.env_tags.unwrap();
        assert_eq!(tags.get("env"), Some(&json!("staging")));
    }

    #[test]
    fn test_rejects_empty_service_name() {
        let err = LoggerConfig::from_json(r#"{"service_name": "  "}"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err =
            LoggerConfig::from_json(r#"{"service_name": "a", "flush_interval_ms": 0}"#).unwrap_err();
        assert!(err.to_string().contains("flush_interval_ms"));
    }

    #[test]
    fn test_rejects_unknown_severity() {
        let err =
            LoggerConfig::from_json(r#"{"service_name": "a", "min_severity": "loud"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::Json(_)));
    }
}
