//! Log entry structure and line rendering

use super::caller_info::CallerInfo;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

const FIELD_SEPARATOR: &str = " | ";

/// One log record, alive only for the duration of a single write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub caller: CallerInfo,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Capture a record stamped with the current UTC time
    pub fn new(level: LogLevel, message: impl Into<String>, caller: CallerInfo) -> Self {
        Self {
            level,
            message: message.into(),
            caller,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Render the canonical line, terminator included
    pub fn render(&self) -> String {
        Self::format_at(
            self.level,
            &self.caller.source_location,
            &self.caller.operation_name,
            &self.message,
            &self.timestamp,
        )
    }

    /// Render a line stamped with the current UTC time.
    ///
    /// ```
    /// use rust_multisink_logger::{LogEntry, LogLevel};
    ///
    /// let line = LogEntry::format(LogLevel::Debug, "C:/src/MyClass.cs", "DoWork", "Hello");
    /// assert!(line.starts_with("DEBUG: MyClass | DoWork | "));
    /// assert!(line.trim_end().ends_with("Hello"));
    /// ```
    pub fn format(
        level: LogLevel,
        source_location: &str,
        operation_name: &str,
        message: &str,
    ) -> String {
        Self::format_at(level, source_location, operation_name, message, &Utc::now())
    }

    /// Render a line with an explicit timestamp
    pub fn format_at(
        level: LogLevel,
        source_location: &str,
        operation_name: &str,
        message: &str,
        timestamp: &DateTime<Utc>,
    ) -> String {
        let mut line = String::with_capacity(
            level.to_str().len() + source_location.len() + operation_name.len() + message.len() + 48,
        );
        line.push_str(level.to_str());
        line.push_str(": ");
        line.push_str(unit_name(source_location));
        line.push_str(FIELD_SEPARATOR);
        line.push_str(operation_name);
        line.push_str(FIELD_SEPARATOR);
        line.push_str(&round_trip_timestamp(timestamp));
        line.push_str(FIELD_SEPARATOR);
        line.push_str(message);
        line.push_str(LINE_ENDING);
        line
    }
}

/// Final path component of `source_location` without its extension.
///
/// Both `/` and `\` count as separators so caller paths recorded on another
/// platform reduce the same way.
pub fn unit_name(source_location: &str) -> &str {
    let file_name = source_location
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_location);

    match file_name.rfind('.') {
        Some(dot) => &file_name[..dot],
        None => file_name,
    }
}

/// ISO-8601 UTC with seven fractional digits, e.g. `2024-03-15T10:20:30.1234567Z`
pub fn round_trip_timestamp(timestamp: &DateTime<Utc>) -> String {
    // Leap-second nanos (>= 1e9) are clamped so the field stays 7 digits wide
    let ticks = timestamp.timestamp_subsec_nanos().min(999_999_999) / 100;
    format!("{}.{:07}Z", timestamp.format("%Y-%m-%dT%H:%M:%S"), ticks)
}
