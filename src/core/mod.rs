//! Core logger types and traits

pub mod capture;
pub mod config;
pub mod error;
pub mod error_input;
pub mod flush_timer;
pub mod log_record;
pub mod logger;
pub mod meta;
pub mod metrics;
pub mod process;
pub mod severity;
pub mod sink;

pub use capture::{CaptureClient, CaptureContext, GlobalHandler};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use error_input::{errorify, logify, CapturedError, ErrorInput};
pub use flush_timer::FlushTimer;
pub use log_record::{format_timestamp, LogRecord};
pub use logger::{Logger, LoggerBuilder, UNCAUGHT_EXIT_CODE, UNCAUGHT_MESSAGE};
pub use meta::{merge_tags, Meta};
pub use metrics::LoggerMetrics;
pub use process::{captured_from_panic, ProcessController, StdProcess, UncaughtHandler};
pub use severity::Severity;
pub use sink::Sink;
