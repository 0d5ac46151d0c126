//! Basic logger usage example
//!
//! Demonstrates synchronous logging to stdout at every severity.
//!
//! Run with: cargo run --example basic_usage

use service_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Service Logger - Basic Usage Example ===\n");

    // No sink and no capture client: writes to stdout and says so
    let logger = Logger::builder("basic-usage")
        .min_severity(Severity::Debug)
        .build();

    println!("1. Logging at different severities:");
    logger.debug("cache warmed", None)?;
    logger.log("service started", Some(Meta::new().with_field("port", 8080)))?;
    logger.warn("slow upstream", Some(Meta::new().with_field("ms", 1830)))?;
    logger.error("request failed", None, Some("connection reset".into()))?;
    logger.critical(
        "payment provider unreachable",
        Some(Meta::new().with_field("provider", "acme")),
        Some(CapturedError::new("dns lookup failed").into()),
    )?;

    println!("\n2. Error inputs can be arbitrary objects:");
    logger.error(
        "validation failed",
        None,
        Some(serde_json::json!({"field": "email", "code": "E_FORMAT"}).into()),
    )?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
