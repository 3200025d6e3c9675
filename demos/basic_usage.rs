//! Basic logger usage example
//!
//! Demonstrates console logging at every severity, with and without a
//! correlation id, using the call-site macros.
//!
//! Run with: cargo run --example basic_usage

use rust_multisink_logger::prelude::*;
use rust_multisink_logger::{critical, debug, error, exception, fatal, info, trace, warn};

fn main() -> Result<()> {
    println!("=== Rust Multi-Sink Logger - Basic Usage Example ===\n");

    // One console sink with severity colors
    let logger = Logger::builder()
        .configuration(ConsoleConfiguration::new())
        .build()?;

    println!("1. Logging at every level:");
    trace!(logger, "This is a trace message")?;
    debug!(logger, "This is a debug message")?;
    info!(logger, "This is an info message")?;
    warn!(logger, "This is a warning message")?;
    error!(logger, "This is an error message")?;
    exception!(logger, &std::io::Error::other("This is an exception"))?;
    critical!(logger, "This is a critical message")?;
    fatal!(logger, "This is a fatal message")?;

    println!("\n2. Logging with a correlation id:");
    logger.set_trace_id(Some("req-1001".to_string()));
    info!(logger, "Processing {} items", 3)?;
    logger.set_trace_id(None);
    info!(logger, "Correlation id cleared")?;

    println!("\n3. Logging with an explicit caller:");
    logger.warn(
        "Reported on behalf of another component",
        &CallerInfo::new("src/scheduler/jobs.rs", "nightly_cleanup"),
    )?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
