//! File logging example
//!
//! Demonstrates the folder schemes and split levels of the file sink, and a
//! logger fanning out to console and file at once.
//!
//! Run with: cargo run --example file_logging

use rust_multisink_logger::prelude::*;
use rust_multisink_logger::{info, warn};
use std::path::Path;

fn main() -> Result<()> {
    println!("=== Rust Multi-Sink Logger - File Logging Example ===\n");

    let base = std::env::temp_dir().join("multisink_file_logging");

    println!("1. Console and file from a JSON configuration:");
    let json = format!(
        r#"[
            {{ "Type": "Console", "UseColors": true }},
            {{ "Type": "File", "ApplicationName": "FileDemo",
               "FolderScheme": "ByMonth", "FileSplitLevel": "Day",
               "FilePath": {:?} }}
        ]"#,
        base.display().to_string()
    );
    let logger = Logger::from_json_str(&json)?;
    println!("   Sinks: {:?}", logger.sink_names());
    info!(logger, "Application started")?;
    warn!(logger, "Disk usage at {}%", 91)?;

    println!("\n2. Where each folder scheme puts today's file:");
    for scheme in FolderScheme::ALL {
        let sink = FileSink::new(
            &FileConfiguration::new("FileDemo")
                .with_folder_scheme(scheme)
                .with_split_level(SplitLevel::Hour)
                .with_file_path(&base),
        )?;
        println!("   {:<10} {}", scheme, relative(&sink.current_path(), &base));
    }

    println!("\n3. One folder per unit of work:");
    let request_sink = FileSink::new(
        &FileConfiguration::new("Request")
            .with_folder_scheme(FolderScheme::ByRequest)
            .with_split_level(SplitLevel::Request)
            .with_file_path(&base),
    )?;
    let request_logger = Logger::builder().sink(request_sink).build()?;
    info!(request_logger, "Handled request")?;
    println!("   Written under {}", base.display());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).display().to_string()
}
