//! Periodic flush worker for buffered loggers

use crossbeam_channel::{bounded, select, tick, Sender};
use std::thread;
use std::time::Duration;

/// Background thread calling `on_tick` once per interval until stopped.
///
/// Ticks run sequentially on the one worker thread, so two flushes started by
/// the timer never overlap.
pub struct FlushTimer {
    stop: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
    interval: Duration,
}

impl FlushTimer {
    pub fn start<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let ticker = tick(interval);

        let handle = thread::spawn(move || loop {
            select! {
                recv(ticker) -> _ => on_tick(),
                // Disconnection is the stop signal
                recv(stop_rx) -> _ => break,
            }
        });

        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the worker and wait for an in-progress tick to finish
    pub fn stop(&mut self) {
        drop(self.stop.take());

        if let Some(handle) = self.handle.take() {
            // The worker itself may end up here through a tick callback
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Flush timer thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for FlushTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
