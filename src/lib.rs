//! # Service Logger
//!
//! Structured logging for services: every event becomes one JSON line,
//! optionally batched for a periodic flush, and error-tier events are
//! forwarded to an error-tracking capture client.
//!
//! ## Features
//!
//! - **Fixed wire format**: `timestamp`, `service_name`, `severity`, `message`,
//!   then `meta` and `error` only when present
//! - **Buffered mode**: records queue in memory and a timer drains them
//! - **Error forwarding**: strings, objects and real errors are normalized
//!   before they reach the capture client
//! - **Last-resort handler**: uncaught panics are logged, flushed, and the
//!   process exits
//!
//! ```
//! use service_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::builder("checkout").sink(sink.clone()).build();
//!
//! logger.log("order placed", Some(Meta::new().with_field("order_id", 991))).unwrap();
//! logger.error("payment failed", None, Some("card declined".into())).unwrap();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        errorify, logify, merge_tags, CaptureClient, CaptureContext, CapturedError, ErrorInput,
        GlobalHandler, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Meta, ProcessController, Result, Severity, Sink, StdProcess,
        UncaughtHandler,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use crate::core::{
    errorify, logify, merge_tags, CaptureClient, CaptureContext, CapturedError, ErrorInput,
    GlobalHandler, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Meta, ProcessController, Result, Severity, Sink, StdProcess, UncaughtHandler,
    UNCAUGHT_EXIT_CODE, UNCAUGHT_MESSAGE,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink};
