//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file as JSON lines (JSONL)
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::sink_write("file", format!("cannot open '{}': {}", path.display(), e))
            })?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, line: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_appends_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("service.jsonl");

        let sink = FileSink::new(&log_path)?;
        sink.write(r#"{"message":"first"}"#)?;
        sink.write(r#"{"message":"second"}"#)?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, [r#"{"message":"first"}"#, r#"{"message":"second"}"#]);
        assert_eq!(sink.path(), log_path.as_path());

        Ok(())
    }

    #[test]
    fn test_file_sink_reopens_in_append_mode() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("append.jsonl");

        FileSink::new(&log_path)?.write("one")?;
        FileSink::new(&log_path)?.write("two")?;

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn test_file_sink_open_failure() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_dir").join("x.jsonl");

        let err = FileSink::new(&missing).err().unwrap();
        assert!(matches!(err, LoggerError::SinkWrite { .. }));
    }
}
