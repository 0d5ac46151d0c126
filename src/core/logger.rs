//! Main logger implementation

use super::{
    capture::{CaptureClient, CaptureContext},
    config::LoggerConfig,
    error::Result,
    error_input::{errorify, logify, CapturedError, ErrorInput},
    flush_timer::FlushTimer,
    log_record::LogRecord,
    meta::{merge_tags, Meta},
    metrics::LoggerMetrics,
    process::{ProcessController, StdProcess},
    severity::Severity,
    sink::Sink,
};
use crate::sinks::ConsoleSink;
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Message of the record written when an uncaught error reaches the handler
pub const UNCAUGHT_MESSAGE: &str = "uncaught exception, exiting";

/// Exit status used after an uncaught error
pub const UNCAUGHT_EXIT_CODE: i32 = 1;

/// How long the uncaught-error path waits for a flush running on another thread
const FORCED_FLUSH_WAIT: Duration = Duration::from_secs(2);

const NO_CAPTURE_NOTICE: &str = "capture client not configured, error forwarding disabled";
const NO_SINK_NOTICE: &str = "no sink configured, writing to stdout";

/// State shared with the flush timer and the uncaught-error handler
struct Shared {
    service_name: String,
    release: Option<String>,
    env_tags: Option<Meta>,
    min_severity: Option<Severity>,
    buffered: bool,
    sink: RwLock<Arc<dyn Sink>>,
    capture: RwLock<Option<Arc<dyn CaptureClient>>>,
    buffer: Mutex<Vec<LogRecord>>,
    /// Held from taking the buffer until the last write of a cycle
    flush_lock: ReentrantMutex<()>,
    metrics: LoggerMetrics,
}

impl Shared {
    fn accepts(&self, severity: Severity) -> bool {
        self.min_severity.is_none_or(|min| severity >= min)
    }

    /// Write immediately or queue, depending on the delivery mode
    fn emit(&self, record: LogRecord) -> Result<()> {
        if self.buffered {
            self.buffer.lock().push(record);
            self.metrics.record_buffered();
            Ok(())
        } else {
            let sink = Arc::clone(&*self.sink.read());
            self.write_to(sink.as_ref(), &record)
        }
    }

    fn write_to(&self, sink: &dyn Sink, record: &LogRecord) -> Result<()> {
        let line = record.to_json_line()?;
        match sink.write(&line) {
            Ok(()) => {
                self.metrics.record_written();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_dropped();
                Err(e)
            }
        }
    }

    /// Drain the buffer to the sink that is current right now.
    ///
    /// Cycles are serialized by `flush_lock`, so a cycle started while another
    /// is writing waits for it and records keep their order.
    fn flush(&self) -> Result<()> {
        let _cycle = self.flush_lock.lock();
        self.drain()
    }

    /// Flush for the exit path. The lock is reentrant, so a panic raised
    /// inside a flush on this thread gets straight through; a cycle stuck on
    /// another thread is waited for only up to `FORCED_FLUSH_WAIT`.
    fn forced_flush(&self) -> Result<()> {
        match self.flush_lock.try_lock_for(FORCED_FLUSH_WAIT) {
            Some(_cycle) => self.drain(),
            None => {
                eprintln!(
                    "[LOGGER WARNING] Flush in progress did not finish within {:?}, flushing anyway",
                    FORCED_FLUSH_WAIT
                );
                self.drain()
            }
        }
    }

    /// The buffer is swapped out under its lock before any write, so records
    /// logged while the loop runs go into the next cycle. A failed write ends
    /// the cycle; the records after it are lost.
    fn drain(&self) -> Result<()> {
        let pending = std::mem::take(&mut *self.buffer.lock());
        if pending.is_empty() {
            return Ok(());
        }
        self.metrics.record_flush_cycle();

        let sink = Arc::clone(&*self.sink.read());
        let total = pending.len();
        for (idx, record) in pending.iter().enumerate() {
            if let Err(e) = self.write_to(sink.as_ref(), record) {
                let lost = (total - idx - 1) as u64;
                if lost > 0 {
                    self.metrics.record_dropped_many(lost);
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn forward(&self, message: &str, meta: Option<&Meta>, error: Option<&ErrorInput>) {
        let Some(client) = self.capture.read().clone() else {
            return;
        };

        let mut extra = Meta::new();
        if let Some(meta) = meta {
            extra.insert("meta", meta.to_json_value());
        }

        match error {
            Some(input) => {
                extra.insert("message", message);
                let context = CaptureContext::new(merge_tags(self.env_tags.as_ref(), Some(&extra)));
                client.capture_exception(&errorify(input), &context);
            }
            None => {
                let context = CaptureContext::new(merge_tags(self.env_tags.as_ref(), Some(&extra)));
                client.capture_message(message, &context);
            }
        }
        self.metrics.record_capture();
    }

    /// Last-resort path: record the error, force out everything buffered, exit
    fn handle_uncaught(
        &self,
        capture_sent: Option<bool>,
        error: CapturedError,
        process: &dyn ProcessController,
    ) {
        let mut meta = Meta::new();
        if let Some(sent) = capture_sent {
            meta.insert("captureSent", sent);
        }

        let record = LogRecord::new(&self.service_name, Severity::Critical, UNCAUGHT_MESSAGE)
            .with_meta(Some(meta))
            .with_error(Some(logify(&ErrorInput::Error(error))));

        if let Err(e) = self.emit(record) {
            eprintln!("[LOGGER CRITICAL] Failed to write uncaught error record: {}", e);
        }
        if let Err(e) = self.forced_flush() {
            eprintln!("[LOGGER CRITICAL] Failed to flush before exit: {}", e);
        }

        process.exit(UNCAUGHT_EXIT_CODE);
    }
}

pub struct Logger {
    shared: Arc<Shared>,
    process: Arc<dyn ProcessController>,
    timer: Option<FlushTimer>,
}

impl Logger {
    /// Synchronous logger writing to stdout, without a capture client
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self::builder(service_name).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use service_logger::prelude::*;
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let sink = Arc::new(MemorySink::new());
    /// let logger = Logger::builder("checkout")
    ///     .sink(sink.clone())
    ///     .min_severity(Severity::Operational)
    ///     .flush_interval(Duration::from_secs(1))
    ///     .build();
    ///
    /// logger.log("order placed", None).unwrap();
    /// logger.flush().unwrap();
    /// assert!(sink.len() >= 1);
    /// ```
    #[must_use]
    pub fn builder(service_name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(service_name)
    }

    pub fn service_name(&self) -> &str {
        &self.shared.service_name
    }

    pub fn min_severity(&self) -> Option<Severity> {
        self.shared.min_severity
    }

    /// Whether records are queued for the periodic flush instead of written
    pub fn is_buffered(&self) -> bool {
        self.shared.buffered
    }

    /// Number of records waiting for the next flush
    pub fn pending(&self) -> usize {
        self.shared.buffer.lock().len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Replace the sink. Records already buffered go to the new sink.
    pub fn set_sink(&self, sink: Arc<dyn Sink>) {
        *self.shared.sink.write() = sink;
    }

    pub fn sink(&self) -> Arc<dyn Sink> {
        Arc::clone(&*self.shared.sink.read())
    }

    pub fn set_capture_client(&self, client: Arc<dyn CaptureClient>) {
        client.init(self.shared.release.as_deref());
        *self.shared.capture.write() = Some(client);
    }

    pub fn clear_capture_client(&self) {
        *self.shared.capture.write() = None;
    }

    pub fn has_capture_client(&self) -> bool {
        self.shared.capture.read().is_some()
    }

    /// Log at an explicit severity.
    ///
    /// Records below the minimum severity are dropped before anything else
    /// happens. Error-tier records are forwarded to the capture client after
    /// they are emitted, even when the sink write failed; the write error is
    /// still returned.
    pub fn log_at(
        &self,
        severity: Severity,
        message: impl Into<String>,
        meta: Option<Meta>,
        error: Option<ErrorInput>,
    ) -> Result<()> {
        if !self.shared.accepts(severity) {
            self.shared.metrics.record_filtered();
            return Ok(());
        }

        let message = message.into();
        let record = LogRecord::new(&self.shared.service_name, severity, message.as_str())
            .with_meta(meta.clone())
            .with_error(error.as_ref().map(logify));

        let emitted = self.shared.emit(record);

        if severity.is_error_tier() {
            self.shared.forward(&message, meta.as_ref(), error.as_ref());
        }

        emitted
    }

    /// Log an `operational` record
    #[inline]
    pub fn log(&self, message: impl Into<String>, meta: Option<Meta>) -> Result<()> {
        self.log_at(Severity::Operational, message, meta, None)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>, meta: Option<Meta>) -> Result<()> {
        self.log_at(Severity::Debug, message, meta, None)
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>, meta: Option<Meta>) -> Result<()> {
        self.log_at(Severity::Warn, message, meta, None)
    }

    #[inline]
    pub fn error(
        &self,
        message: impl Into<String>,
        meta: Option<Meta>,
        error: Option<ErrorInput>,
    ) -> Result<()> {
        self.log_at(Severity::Error, message, meta, error)
    }

    #[inline]
    pub fn critical(
        &self,
        message: impl Into<String>,
        meta: Option<Meta>,
        error: Option<ErrorInput>,
    ) -> Result<()> {
        self.log_at(Severity::Critical, message, meta, error)
    }

    /// Write all buffered records in order and empty the buffer.
    ///
    /// A no-op when nothing is buffered.
    pub fn flush(&self) -> Result<()> {
        self.shared.flush()
    }

    /// Install the process-wide last-resort handler.
    ///
    /// With a capture client, installation goes through the client's own
    /// global handler hook; otherwise the process controller is subscribed
    /// directly. Either way the handler logs a `critical` record, flushes the
    /// buffer and exits with status 1.
    ///
    /// The handler only holds a weak reference to the logger; once the logger
    /// is gone it just exits.
    pub fn install_uncaught_handler(&self) {
        let shared = Arc::downgrade(&self.shared);
        let process = Arc::clone(&self.process);

        let capture = self.shared.capture.read().clone();
        match capture {
            Some(client) => client.install_global_handler(Box::new(move |sent, error| {
                Self::on_uncaught(&shared, Some(sent), error, process.as_ref());
            })),
            None => self.process.on_uncaught_exception(Box::new(move |error| {
                Self::on_uncaught(&shared, None, error, process.as_ref());
            })),
        }
    }

    fn on_uncaught(
        shared: &Weak<Shared>,
        capture_sent: Option<bool>,
        error: CapturedError,
        process: &dyn ProcessController,
    ) {
        match shared.upgrade() {
            Some(shared) => shared.handle_uncaught(capture_sent, error, process),
            None => {
                eprintln!("[LOGGER CRITICAL] Uncaught error after logger shutdown: {}", error);
                process.exit(UNCAUGHT_EXIT_CODE);
            }
        }
    }

    /// Stop the periodic flush timer. Buffered records stay queued.
    pub fn stop(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.stop();
        }
    }

    fn notice(&self, message: &str) {
        if let Err(e) = self.log(message, None) {
            eprintln!("[LOGGER ERROR] Failed to write startup notice: {}", e);
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.stop();

        let pending = self.pending();
        if pending > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger for '{}' dropped with {} unflushed records",
                self.shared.service_name, pending
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use service_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder("billing")
///     .release("billing-1.4.2")
///     .env_tags(Meta::new().with_field("env", "staging"))
///     .sink(Arc::new(MemorySink::new()))
///     .min_severity(Severity::Debug)
///     .build();
/// assert!(!logger.is_buffered());
/// ```
pub struct LoggerBuilder {
    service_name: String,
    release: Option<String>,
    env_tags: Option<Meta>,
    sink: Option<Arc<dyn Sink>>,
    capture: Option<Arc<dyn CaptureClient>>,
    min_severity: Option<Severity>,
    flush_interval: Option<Duration>,
    process: Option<Arc<dyn ProcessController>>,
}

impl LoggerBuilder {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            release: None,
            env_tags: None,
            sink: None,
            capture: None,
            min_severity: None,
            flush_interval: None,
            process: None,
        }
    }

    /// Start from a declarative configuration
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            release: config.release.clone(),
            env_tags: config.env_tags.clone(),
            sink: None,
            capture: None,
            min_severity: config.min_severity,
            flush_interval: config.flush_interval(),
            process: None,
        }
    }

    /// Release tag handed to the capture client on adoption
    #[must_use = "builder methods return a new value"]
    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    /// Static tags merged into every capture report
    #[must_use = "builder methods return a new value"]
    pub fn env_tags(mut self, tags: Meta) -> Self {
        self.env_tags = Some(tags);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn capture_client(mut self, client: Arc<dyn CaptureClient>) -> Self {
        self.capture = Some(client);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    /// Enable buffered mode, flushing every `interval`
    ///
    /// If not called, the logger writes synchronously.
    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = Some(interval);
        self
    }

    /// Process controller used by the uncaught-error handler.
    /// Defaults to [`StdProcess`].
    #[must_use = "builder methods return a new value"]
    pub fn process(mut self, process: Arc<dyn ProcessController>) -> Self {
        self.process = Some(process);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let has_sink = self.sink.is_some();
        let has_capture = self.capture.is_some();

        if let Some(ref client) = self.capture {
            client.init(self.release.as_deref());
        }

        let shared = Arc::new(Shared {
            service_name: self.service_name,
            release: self.release,
            env_tags: self.env_tags,
            min_severity: self.min_severity,
            buffered: self.flush_interval.is_some(),
            sink: RwLock::new(self
                .sink
                .unwrap_or_else(|| Arc::new(ConsoleSink::new()) as Arc<dyn Sink>)),
            capture: RwLock::new(self.capture),
            buffer: Mutex::new(Vec::new()),
            flush_lock: ReentrantMutex::new(()),
            metrics: LoggerMetrics::new(),
        });

        let timer = self.flush_interval.map(|interval| {
            let shared = Arc::clone(&shared);
            FlushTimer::start(interval, move || {
                if let Err(e) = shared.flush() {
                    eprintln!("[LOGGER ERROR] Periodic flush failed: {}", e);
                }
            })
        });

        let logger = Logger {
            shared,
            process: self
                .process
                .unwrap_or_else(|| Arc::new(StdProcess) as Arc<dyn ProcessController>),
            timer,
        };

        if !has_capture {
            logger.notice(NO_CAPTURE_NOTICE);
        }
        if !has_sink {
            logger.notice(NO_SINK_NOTICE);
        }

        logger
    }
}
