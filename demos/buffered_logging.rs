//! Buffered logging example
//!
//! Records queue in memory and a background timer writes them out.
//! Also installs the uncaught-error handler so a panic flushes first.
//!
//! Run with: cargo run --example buffered_logging

use service_logger::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Service Logger - Buffered Logging Example ===\n");

    let mut logger = Logger::builder("buffered-demo")
        .env_tags(Meta::new().with_field("env", "demo"))
        .flush_interval(Duration::from_millis(200))
        .build();
    logger.install_uncaught_handler();

    // a panic escaping this closure is logged, flushed, and exits with status 1
    StdProcess::run(|| run_jobs(&logger))?;

    logger.log("shutting down", None)?;
    logger.stop();
    // buffered records are the caller's responsibility on shutdown
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

fn run_jobs(logger: &Logger) -> Result<()> {
    for i in 0..10 {
        logger.log(format!("job {} finished", i), Some(Meta::new().with_field("job", i)))?;
    }
    println!("queued {} records", logger.pending());

    thread::sleep(Duration::from_millis(500));
    println!("after one interval: {} pending", logger.pending());

    Ok(())
}
