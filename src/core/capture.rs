//! Error-tracking capture client capability

use super::error_input::CapturedError;
use super::meta::Meta;
use serde::Serialize;

/// Callback handed to a capture client's global handler hook.
///
/// Invoked with whether the client managed to send the report, and the error.
pub type GlobalHandler = Box<dyn Fn(bool, CapturedError) + Send + Sync>;

/// Extra context sent along with a captured exception or message
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaptureContext {
    pub extra: Meta,
}

impl CaptureContext {
    pub fn new(extra: Meta) -> Self {
        Self { extra }
    }
}

/// External error-tracking integration.
///
/// All calls are fire-and-forget; the logger never waits on delivery.
pub trait CaptureClient: Send + Sync {
    /// Called once when a logger adopts this client
    fn init(&self, _release: Option<&str>) {}

    fn capture_exception(&self, error: &CapturedError, context: &CaptureContext);

    fn capture_message(&self, message: &str, context: &CaptureContext);

    /// Install the client's own process-wide last-resort handler
    fn install_global_handler(&self, handler: GlobalHandler);
}
