//! Process control capability
//!
//! The uncaught-error path needs to subscribe to process-wide failures and to
//! terminate the process. Both go through [`ProcessController`] so tests can
//! substitute them without touching real process state.

use super::error_input::CapturedError;
use parking_lot::Mutex;
use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::{Arc, Once};

/// Callback invoked with the error that escaped to the top of the process
pub type UncaughtHandler = Box<dyn Fn(CapturedError) + Send + Sync>;

pub trait ProcessController: Send + Sync {
    /// Terminate the process with the given status
    fn exit(&self, code: i32);

    /// Subscribe to uncaught failures (panics, for a Rust process)
    fn on_uncaught_exception(&self, handler: UncaughtHandler);
}

/// The real process.
///
/// A panic counts as uncaught only when it escapes a closure run through
/// [`StdProcess::run`]; panics recovered with `catch_unwind` never reach the
/// handler. Panics in other threads reach it only if that thread's body is
/// wrapped in `run` as well.
///
/// ```no_run
/// use service_logger::prelude::*;
///
/// let logger = Logger::new("worker");
/// logger.install_uncaught_handler();
///
/// StdProcess::run(|| {
///     // application main
/// });
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StdProcess;

static UNCAUGHT_HANDLER: Mutex<Option<Arc<UncaughtHandler>>> = parking_lot::const_mutex(None);
static HOOK_INSTALLED: Once = Once::new();

thread_local! {
    static LAST_PANIC: RefCell<Option<CapturedError>> = const { RefCell::new(None) };
}

impl StdProcess {
    /// Run `main`, handing a panic that escapes it to the installed handler.
    ///
    /// If no handler is installed, or the handler returns instead of exiting,
    /// the panic continues to unwind.
    pub fn run<F, R>(main: F) -> R
    where
        F: FnOnce() -> R,
    {
        match panic::catch_unwind(AssertUnwindSafe(main)) {
            Ok(value) => value,
            Err(payload) => {
                let error = LAST_PANIC
                    .with(|slot| slot.borrow_mut().take())
                    .unwrap_or_else(|| captured_from_panic(&*payload, None));

                let handler = UNCAUGHT_HANDLER.lock().clone();
                if let Some(handler) = handler {
                    (*handler)(error);
                }
                panic::resume_unwind(payload)
            }
        }
    }

    /// Whether an uncaught handler has been registered
    pub fn has_handler() -> bool {
        UNCAUGHT_HANDLER.lock().is_some()
    }

    /// Panic hook that remembers each panic for `run`, then defers to the
    /// hook that was installed before it.
    fn install_hook() {
        HOOK_INSTALLED.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                let captured = captured_from_panic(info.payload(), info.location());
                LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(captured));
                previous(info);
            }));
        });
    }
}

impl ProcessController for StdProcess {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }

    fn on_uncaught_exception(&self, handler: UncaughtHandler) {
        Self::install_hook();
        *UNCAUGHT_HANDLER.lock() = Some(Arc::new(handler));
    }
}

/// Turn a panic payload into a [`CapturedError`], keeping the panic location
/// at the top of the stack.
pub fn captured_from_panic(
    payload: &(dyn Any + Send),
    location: Option<&Location<'_>>,
) -> CapturedError {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    };

    let captured = CapturedError::new(message.as_str());
    match location {
        Some(location) => {
            let stack = format!("Error: {}\n    at {}\n{}", message, location, captured.stack());
            captured.with_stack(stack)
        }
        None => captured,
    }
}
