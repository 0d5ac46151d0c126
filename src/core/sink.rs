//! Sink trait for record output destinations

use super::error::Result;

/// Destination for serialized records.
///
/// `write` receives one complete JSON line per record, without a trailing
/// newline; implementations may append one. Sinks are owned by the caller and
/// may be swapped on a live logger, so `write` takes `&self`.
pub trait Sink: Send + Sync {
    fn write(&self, line: &str) -> Result<()>;

    fn name(&self) -> &str;
}
