//! Console sink implementation

use crate::core::{Result, Sink};
use std::io::Write;

/// Writes each record to stdout, one line per record
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write(&self, line: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_write() {
        let sink = ConsoleSink::new();
        assert_eq!(sink.name(), "console");
        sink.write(r#"{"message":"console sink test"}"#).unwrap();
    }
}
