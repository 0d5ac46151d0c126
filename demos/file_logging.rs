//! File logging example
//!
//! Writes JSON lines to a file and prints the result.
//!
//! Run with: cargo run --example file_logging

use service_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Service Logger - File Logging Example ===\n");

    let path = std::env::temp_dir().join("service_logger_demo.jsonl");
    let sink = Arc::new(FileSink::new(&path)?);

    let logger = Logger::builder("file-demo").sink(sink).build();
    logger.log("written to a file", Some(Meta::new().with_field("path", path.display().to_string())))?;
    logger.warn("disk usage high", Some(Meta::new().with_field("pct", 91)))?;

    println!("Contents of {}:", path.display());
    print!("{}", std::fs::read_to_string(&path)?);

    Ok(())
}
