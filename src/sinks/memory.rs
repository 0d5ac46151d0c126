//! In-memory sink, for tests and for embedding the log stream elsewhere

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Parse every line back into JSON
    pub fn records(&self) -> Result<Vec<Value>> {
        self.lines
            .lock()
            .iter()
            .map(|line| Ok(serde_json::from_str(line)?))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
