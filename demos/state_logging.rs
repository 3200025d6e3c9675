//! State-based logging example
//!
//! Demonstrates resolving the caller from untyped state and forwarding
//! façade records through the adapter with a scoped correlation id.
//!
//! Run with: cargo run --example state_logging

use rust_multisink_logger::prelude::*;
use serde_json::{json, Value};
use std::error::Error;
use std::sync::Arc;

fn render(state: Option<&Value>, error: Option<&(dyn Error + 'static)>) -> String {
    let path = state
        .and_then(|s| s.get("RequestPath"))
        .and_then(Value::as_str)
        .unwrap_or("-");
    match error {
        Some(e) => format!("{} failed: {}", path, e),
        None => format!("{} handled", path),
    }
}

fn main() -> Result<()> {
    println!("=== Rust Multi-Sink Logger - State Logging Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .configuration(ConsoleConfiguration::new())
            .build()?,
    );

    println!("1. Caller resolved from state:");
    let state = json!({
        "CallerFilePath": "src/api/orders.rs",
        "CallerMemberName": "submit",
        "OrderId": 42,
    });
    logger.info_with_state("Order accepted", Some(&state))?;

    let pairs = json!([["FilePath", "src/jobs/cleanup.rs"], ["Method", "run"]]);
    logger.debug_with_state("Cleanup finished", Some(&pairs))?;

    logger.warn_with_state("No provenance available", None)?;

    println!("\n2. Façade records with a scoped correlation id:");
    let adapter = FacadeAdapter::new(Arc::clone(&logger));
    {
        let _scope = TraceContext::enter("http-7f3a");
        let state = json!({ "RequestPath": "/api/orders" });
        adapter.log_record(LogLevel::Information, Some(&state), None, &render)?;

        let error = std::io::Error::other("upstream timeout");
        adapter.log_record(LogLevel::Error, Some(&state), Some(&error), &render)?;
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
