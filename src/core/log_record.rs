//! Log record structure

use super::error::Result;
use super::meta::Meta;
use super::severity::Severity;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format a timestamp as ISO-8601 UTC with millisecond precision
/// (`2024-05-01T12:00:00.000Z`).
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One log event. Field order here is the field order on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    timestamp: String,
    service_name: String,
    severity: Severity,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

impl LogRecord {
    pub fn new(
        service_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: format_timestamp(&Utc::now()),
            service_name: service_name.into(),
            severity,
            message: message.into(),
            meta: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Option<Meta>) -> Self {
        self.meta = meta;
        self
    }

    /// Attach an already logified error value
    #[must_use]
    pub fn with_error(mut self, error: Option<Value>) -> Self {
        self.error = error;
        self
    }

    /// Pin the record to a specific instant
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = format_timestamp(&timestamp);
        self
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn error(&self) -> Option<&Value> {
        self.error.as_ref()
    }

    /// Serialize as a single JSON line, without trailing newline
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap()
    }

    #[test]
    fn test_minimal_record_omits_optional_fields() {
        let record = LogRecord::new("svc", Severity::Operational, "hello").at(fixed_time());
        assert_eq!(
            record.to_json_line().unwrap(),
            r#"{"timestamp":"2024-05-01T12:30:05.000Z","service_name":"svc","severity":"operational","message":"hello"}"#
        );
    }

    #[test]
    fn test_field_order_with_meta_and_error() {
        let record = LogRecord::new("svc", Severity::Error, "boom")
            .with_meta(Some(Meta::new().with_field("req", 42)))
            .with_error(Some(json!("bad")))
            .at(fixed_time());
        assert_eq!(
            record.to_json_line().unwrap(),
            r#"{"timestamp":"2024-05-01T12:30:05.000Z","service_name":"svc","severity":"error","message":"boom","meta":{"req":42},"error":"bad"}"#
        );
    }

    #[test]
    fn test_newlines_stay_on_one_line() {
        let record = LogRecord::new("svc", Severity::Warn, "line one\nline two");
        let line = record.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains(r"line one\nline two"));
    }

    #[test]
    fn test_parse_back() {
        let record = LogRecord::new("svc", Severity::Debug, "x")
            .with_meta(Some(Meta::new().with_field("a", 1)));
        let parsed: LogRecord = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_timestamp_millisecond_precision() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(format_timestamp(&at), "2023-11-14T22:13:20.123Z");
    }
}
