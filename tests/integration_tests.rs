//! Integration tests for the multi-sink logger
//!
//! These tests verify:
//! - Canonical line rendering
//! - File placement on disk
//! - Ordered fan-out and failure isolation
//! - Configuration errors surfaced by the factory
//! - Façade adapter behaviour

use chrono::{TimeZone, Utc};
use rust_multisink_logger::core::log_entry::LINE_ENDING;
use rust_multisink_logger::prelude::*;
use rust_multisink_logger::{caller, info};
use parking_lot::Mutex;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

type Calls = Arc<Mutex<Vec<(String, LogLevel, String)>>>;

struct RecordingSink {
    name: &'static str,
    calls: Calls,
}

impl Sink for RecordingSink {
    fn write(&self, level: LogLevel, message: &str, _caller: &CallerInfo) -> Result<()> {
        self.calls
            .lock()
            .push((self.name.to_string(), level, message.to_string()));
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read dir") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            found.extend(files_under(&path));
        } else {
            found.push(path);
        }
    }
    found
}

#[test]
fn test_scenario_a_entry_format() {
    let line = LogEntry::format(LogLevel::Debug, "C:/src/MyClass.cs", "DoWork", "Hello");

    assert!(line.starts_with("DEBUG: MyClass | DoWork | "));
    assert!(line.ends_with(&format!("Hello{}", LINE_ENDING)));

    let timestamp = line.split(" | ").nth(2).expect("timestamp field");
    assert!(timestamp.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[test]
fn test_scenario_b_single_file_at_base() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = FileConfiguration::new("TestApp")
        .with_folder_scheme(FolderScheme::AllInOne)
        .with_split_level(SplitLevel::Request)
        .with_file_path(temp_dir.path());

    let logger = Logger::new(&[SinkConfiguration::from(config)]).expect("Failed to create logger");
    logger
        .info("started", &CallerInfo::new("src/main.rs", "main"))
        .expect("Failed to log");

    let files = files_under(temp_dir.path());
    assert_eq!(files, vec![temp_dir.path().join("TestApp.log")]);

    let content = fs::read_to_string(&files[0]).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("INFO: main | main | "));
}

#[test]
fn test_scenario_c_month_folder_day_file() {
    let placement = FilePlacement::new("logs", "App", FolderScheme::ByMonth, SplitLevel::Day);
    let at = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();

    let path = placement.path(&at);
    assert!(path.ends_with(Path::new("2024").join("03").join("App_2024_03_15.log")));
}

#[test]
fn test_scenario_d_two_sinks_in_registration_order() {
    let calls = Calls::default();
    let logger = Logger::builder()
        .sink(RecordingSink { name: "first", calls: Arc::clone(&calls) })
        .sink(RecordingSink { name: "second", calls: Arc::clone(&calls) })
        .build()
        .expect("Failed to build logger");

    logger.info("one call", &CallerInfo::unknown()).expect("Failed to log");

    let calls = calls.lock();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "first");
    assert_eq!(calls[1].0, "second");
    assert!(calls.iter().all(|(_, level, _)| *level == LogLevel::Information));
}

#[test]
fn test_file_sink_with_trace_id_and_macro_caller() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = FileConfiguration::new("Api")
        .with_folder_scheme(FolderScheme::AllInOne)
        .with_split_level(SplitLevel::Request)
        .with_file_path(temp_dir.path());

    let logger = Logger::builder()
        .configuration(config)
        .trace_id("req-1")
        .build()
        .expect("Failed to build logger");

    info!(logger, "order {} accepted", 17).expect("Failed to log");

    let content = fs::read_to_string(temp_dir.path().join("Api.log")).expect("Failed to read");
    assert!(content.starts_with(
        "INFO: integration_tests | test_file_sink_with_trace_id_and_macro_caller | "
    ));
    assert!(content.trim_end().ends_with("| [TraceId] req-1 | order 17 accepted"));
}

#[test]
fn test_by_request_folder_is_per_sink_instance() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = FileConfiguration::new("Job")
        .with_folder_scheme(FolderScheme::ByRequest)
        .with_split_level(SplitLevel::Request)
        .with_file_path(temp_dir.path());

    let first = FileSink::new(&config).expect("Failed to create sink");
    let second = FileSink::new(&config).expect("Failed to create sink");

    first.info("a", &CallerInfo::unknown()).expect("Failed to write");
    first.info("b", &CallerInfo::unknown()).expect("Failed to write");
    second.info("c", &CallerInfo::unknown()).expect("Failed to write");

    let first_file = temp_dir.path().join(first.request_id()).join("Job.log");
    let second_file = temp_dir.path().join(second.request_id()).join("Job.log");
    assert_eq!(fs::read_to_string(first_file).unwrap().lines().count(), 2);
    assert_eq!(fs::read_to_string(second_file).unwrap().lines().count(), 1);
    assert_eq!(files_under(temp_dir.path()).len(), 2);
}

#[test]
fn test_failing_file_sink_does_not_stop_other_sinks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("occupied");
    fs::write(&blocker, b"not a directory").expect("Failed to write blocker");

    let calls = Calls::default();
    let logger = Logger::builder()
        .configuration(
            FileConfiguration::new("Broken")
                .with_folder_scheme(FolderScheme::ByDay)
                .with_file_path(&blocker),
        )
        .sink(RecordingSink { name: "memory", calls: Arc::clone(&calls) })
        .build()
        .expect("Failed to build logger");

    let err = logger
        .error("must reach memory", &caller!())
        .expect_err("file sink should fail");

    assert_eq!(err.sink_failures().len(), 1);
    assert_eq!(err.sink_failures()[0].sink, "file");
    assert_eq!(calls.lock().len(), 1);
}

#[test]
fn test_logger_from_json_configuration() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let json = json!([
        {
            "Type": "File",
            "ApplicationName": "FromJson",
            "FolderScheme": "ByYear",
            "FileSplitLevel": "Year",
            "FilePath": temp_dir.path()
        }
    ])
    .to_string();

    let logger = Logger::from_json_str(&json).expect("Failed to create logger");
    logger.warn("configured", &CallerInfo::unknown()).expect("Failed to log");

    let year = Utc::now().format("%Y").to_string();
    let expected = temp_dir
        .path()
        .join(&year)
        .join(format!("FromJson_{}.log", year));
    // Tolerate a year boundary between the write and this check
    assert!(expected.exists() || files_under(temp_dir.path()).len() == 1);
}

#[test]
fn test_factory_configuration_errors() {
    assert!(matches!(
        SinkFactory::create_from_value(&serde_json::Value::Null),
        Err(LoggerError::InvalidArgument { .. })
    ));

    match SinkFactory::create_from_value(&json!({ "Type": "EventLog" })) {
        Err(LoggerError::UnsupportedConfiguration { type_name }) => assert_eq!(type_name, "EventLog"),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("unknown type must fail"),
    }

    assert!(matches!(
        Logger::from_json_str(r#"[{"Type": "File", "ApplicationName": ""}]"#),
        Err(LoggerError::InvalidConfiguration { .. })
    ));

    assert!(matches!(
        Logger::from_json_str(r#"[{"Type": "File", "ApplicationName": "A", "FolderScheme": 9}]"#),
        Err(LoggerError::OutOfRange { .. })
    ));
    assert!(Logger::from_json_str(
        r#"[{"Type": "File", "ApplicationName": "A", "FolderScheme": 2, "FileSplitLevel": "by-day"}]"#
    )
    .is_ok());
}

#[test]
fn test_state_flavor_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Logger::builder()
        .configuration(
            FileConfiguration::new("State")
                .with_folder_scheme(FolderScheme::AllInOne)
                .with_split_level(SplitLevel::Request)
                .with_file_path(temp_dir.path()),
        )
        .build()
        .expect("Failed to build logger");

    let state = json!([
        ["CallerFilePath", "/srv/app/Billing.cs"],
        ["CallerMemberName", "Charge"]
    ]);
    logger
        .critical_with_state("card declined", Some(&state))
        .expect("Failed to log");
    logger
        .trace_with_state("no provenance", Some(&json!("opaque")))
        .expect("Failed to log");

    let content = fs::read_to_string(temp_dir.path().join("State.log")).expect("Failed to read");
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines[0].starts_with("CRITICAL: Billing | Charge | "));
    assert!(lines[1].starts_with("TRACE: unknown | unknown | "));
}

#[test]
fn test_facade_adapter_with_scoped_trace_id() {
    let calls = Calls::default();
    let logger = Arc::new(
        Logger::builder()
            .sink(RecordingSink { name: "memory", calls: Arc::clone(&calls) })
            .build()
            .expect("Failed to build logger"),
    );
    let adapter = FacadeAdapter::new(Arc::clone(&logger));

    let _scope = TraceContext::enter("http-123");
    let error = std::io::Error::other("upstream timeout");
    adapter
        .log_record(LogLevel::Critical, None, Some(&error), &|_, e| {
            format!("request failed: {}", e.map(ToString::to_string).unwrap_or_default())
        })
        .expect("Failed to forward");

    let calls = calls.lock();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, LogLevel::Exception);
    assert_eq!(calls[0].2, "[TraceId] http-123 | upstream timeout");
    assert_eq!(calls[1].1, LogLevel::Critical);
    assert_eq!(calls[1].2, "[TraceId] http-123 | request failed: upstream timeout");
}
