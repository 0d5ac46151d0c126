//! Error inputs accepted by the error-tier logging methods
//!
//! Callers hand over whatever they have: a real error, a bare string, or an
//! arbitrary JSON object. Two normalizations exist because the two consumers
//! want different shapes:
//! - [`errorify`] always yields a [`CapturedError`] for the capture client
//! - [`logify`] yields the value embedded in the record's `error` field

use serde_json::{json, Value};
use std::backtrace::Backtrace;
use std::fmt::Write as _;

/// A throwable-style error: message plus the stack captured at creation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CapturedError {
    message: String,
    stack: String,
}

impl CapturedError {
    /// Create an error and capture the current backtrace as its stack
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let stack = format!("Error: {}\n{}", message, Backtrace::force_capture());
        Self { message, stack }
    }

    /// Build from any error, recording its `source()` chain ahead of the backtrace
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let message = err.to_string();
        let mut stack = format!("Error: {}\n", message);
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = writeln!(stack, "Caused by: {}", cause);
            source = cause.source();
        }
        let _ = write!(stack, "{}", Backtrace::force_capture());
        Self { message, stack }
    }

    /// Replace the captured stack
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }
}

/// Heterogeneous error argument of `error`/`critical`
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorInput {
    Error(CapturedError),
    Message(String),
    Object(Value),
}

impl From<CapturedError> for ErrorInput {
    fn from(err: CapturedError) -> Self {
        ErrorInput::Error(err)
    }
}

impl From<&str> for ErrorInput {
    fn from(s: &str) -> Self {
        ErrorInput::Message(s.to_string())
    }
}

impl From<String> for ErrorInput {
    fn from(s: String) -> Self {
        ErrorInput::Message(s)
    }
}

impl From<Value> for ErrorInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => ErrorInput::Message(s),
            other => ErrorInput::Object(other),
        }
    }
}

/// Normalize an error input into a proper error for the capture client.
///
/// Errors pass through unchanged, strings become the message, anything else
/// becomes its compact JSON serialization.
pub fn errorify(input: &ErrorInput) -> CapturedError {
    match input {
        ErrorInput::Error(err) => err.clone(),
        ErrorInput::Message(s) => CapturedError::new(s.as_str()),
        ErrorInput::Object(value) => CapturedError::new(value.to_string()),
    }
}

/// Produce the `error` field of a log record.
///
/// Errors become `{message, stack}`; strings and objects are kept verbatim.
pub fn logify(input: &ErrorInput) -> Value {
    match input {
        ErrorInput::Error(err) => json!({
            "message": err.message(),
            "stack": err.stack(),
        }),
        ErrorInput::Message(s) => Value::String(s.clone()),
        ErrorInput::Object(value) => value.clone(),
    }
}
