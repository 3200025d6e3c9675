//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Concurrent writers to one file sink never interleave or lose lines
//! - Concurrent writers to one console sink emit whole lines
//! - Fan-out keeps delivering under load while a sink keeps failing

use rust_multisink_logger::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 16;
const MESSAGES_PER_THREAD: usize = 250;

fn all_in_one(dir: &TempDir, name: &str) -> FileConfiguration {
    FileConfiguration::new(name)
        .with_folder_scheme(FolderScheme::AllInOne)
        .with_split_level(SplitLevel::Request)
        .with_file_path(dir.path())
}

/// Every line must carry the five canonical fields and end with a known message
fn assert_well_formed(line: &str) {
    let fields: Vec<&str> = line.splitn(4, " | ").collect();
    assert_eq!(fields.len(), 4, "malformed line: {:?}", line);
    assert!(fields[0].starts_with("INFO: "), "malformed line: {:?}", line);
    assert!(fields[2].ends_with('Z'), "malformed timestamp: {:?}", line);
    assert!(fields[3].starts_with("worker "), "malformed message: {:?}", line);
}

#[test]
fn test_concurrent_file_writes_produce_whole_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(
        Logger::new(&[SinkConfiguration::from(all_in_one(&temp_dir, "Stress"))])
            .expect("Failed to create logger"),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let caller = CallerInfo::new("tests/stress_tests.rs", "worker");
                for i in 0..MESSAGES_PER_THREAD {
                    logger
                        .info(format!("worker {} message {}", t, i), &caller)
                        .expect("Failed to log");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let content =
        fs::read_to_string(temp_dir.path().join("Stress.log")).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);
    lines.iter().for_each(|line| assert_well_formed(line));

    for t in 0..THREADS {
        let last = format!("| worker {} message {}", t, MESSAGES_PER_THREAD - 1);
        assert_eq!(lines.iter().filter(|l| l.ends_with(&last)).count(), 1);
    }

    assert_eq!(
        logger.metrics().delivered(),
        (THREADS * MESSAGES_PER_THREAD) as u64
    );
}

#[cfg(feature = "console")]
#[test]
fn test_concurrent_console_writes_produce_whole_lines() {
    use parking_lot::Mutex;
    use std::io::Write;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            // Split every write to widen the window for interleaving
            let half = buf.len().div_ceil(2);
            self.0.lock().extend_from_slice(&buf[..half]);
            thread::yield_now();
            Ok(half)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = SharedBuffer::default();
    let sink = ConsoleSink::with_writer(
        ConsoleConfiguration::new().with_colors(false),
        buffer.clone(),
    );
    let logger = Arc::new(Logger::builder().sink(sink).build().expect("Failed to build logger"));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    logger
                        .info(format!("worker {} message {}", t, i), &CallerInfo::unknown())
                        .expect("Failed to log");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let output = String::from_utf8(buffer.0.lock().clone()).expect("Output is not UTF-8");
    assert_eq!(output.lines().count(), THREADS * 50);
    output.lines().for_each(assert_well_formed);
}

#[test]
fn test_failing_sink_under_load_does_not_starve_others() {
    struct AlwaysFails;

    impl Sink for AlwaysFails {
        fn write(&self, _level: LogLevel, _message: &str, _caller: &CallerInfo) -> Result<()> {
            Err(LoggerError::invalid_argument("sink", "always fails"))
        }

        fn name(&self) -> &str {
            "always-fails"
        }
    }

    struct Counting(Arc<AtomicUsize>);

    impl Sink for Counting {
        fn write(&self, _level: LogLevel, _message: &str, _caller: &CallerInfo) -> Result<()> {
            self.0.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    let delivered = Arc::new(AtomicUsize::new(0));
    let logger = Arc::new(
        Logger::builder()
            .sink(AlwaysFails)
            .sink(Counting(Arc::clone(&delivered)))
            .build()
            .expect("Failed to build logger"),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..MESSAGES_PER_THREAD {
                    let err = logger
                        .warn("load", &CallerInfo::unknown())
                        .expect_err("first sink always fails");
                    assert_eq!(err.sink_failures().len(), 1);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let total = THREADS * MESSAGES_PER_THREAD;
    assert_eq!(delivered.load(Ordering::Relaxed), total);
    assert_eq!(logger.metrics().failed(), total as u64);
}
