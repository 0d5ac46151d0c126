//! Logging macros for ergonomic message formatting.
//!
//! These macros format the message like `format!` and log it without meta
//! or error input. Each expands to the `Result` of the underlying call.
//!
//! # Examples
//!
//! ```
//! use service_logger::prelude::*;
//! use service_logger::operational;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder("api").sink(Arc::new(MemorySink::new())).build();
//!
//! let port = 8080;
//! operational!(logger, "listening on port {}", port).unwrap();
//! ```

/// Log a formatted message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use service_logger::prelude::*;
/// # use std::sync::Arc;
/// # let logger = Logger::builder("api").sink(Arc::new(MemorySink::new())).build();
/// use service_logger::log;
/// log!(logger, Severity::Warn, "retry {} of {}", 2, 5).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log_at($severity, format!($($arg)+), None, None)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an operational message.
#[macro_export]
macro_rules! operational {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Operational, $($arg)+)
    };
}

/// Log a warning.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message. Forwarded to the capture client as a message.
///
/// # Examples
///
/// ```
/// # use service_logger::prelude::*;
/// # use std::sync::Arc;
/// # let logger = Logger::builder("api").sink(Arc::new(MemorySink::new())).build();
/// use service_logger::error;
/// error!(logger, "upstream returned {}", 502).unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a critical message. Forwarded to the capture client as a message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Critical, $($arg)+)
    };
}
