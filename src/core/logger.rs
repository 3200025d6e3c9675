//! Fan-out logger
//!
//! [`Logger`] owns an ordered list of sinks and an optional correlation id.
//! Every call is delivered synchronously, in registration order, to each
//! sink's operation for the call's severity. Each sink runs inside its own
//! failure boundary: an error or panic in one sink does not stop delivery to
//! the others, and all failures are returned together as
//! [`LoggerError::SinkFailures`].

use super::{
    caller_info::CallerInfo,
    config::SinkConfiguration,
    error::{LoggerError, Result, SinkFailure},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::{self, Sink},
};
use crate::sinks::SinkFactory;
use parking_lot::RwLock;
use serde_json::Value;
use std::error::Error;

const TRACE_ID_MARKER: &str = "[TraceId]";

/// Prefix `message` with the correlation marker when `trace_id` is non-empty
///
/// ```
/// use rust_multisink_logger::format_message_with_trace_id;
///
/// assert_eq!(format_message_with_trace_id("hi", None), "hi");
/// assert_eq!(format_message_with_trace_id("hi", Some("")), "hi");
/// assert_eq!(format_message_with_trace_id("hi", Some("abc")), "[TraceId] abc | hi");
/// ```
pub fn format_message_with_trace_id(message: &str, trace_id: Option<&str>) -> String {
    match trace_id {
        Some(id) if !id.is_empty() => format!("{} {} | {}", TRACE_ID_MARKER, id, message),
        _ => message.to_string(),
    }
}

/// Full descriptive text of an error: its message followed by each source
pub fn describe_error(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

pub struct Logger {
    sinks: Vec<Box<dyn Sink>>,
    trace_id: RwLock<Option<String>>,
    /// Metrics for observability (calls, delivered and failed sink writes)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger with one sink per configuration, in order
    pub fn new<'a>(configurations: impl IntoIterator<Item = &'a SinkConfiguration>) -> Result<Self> {
        Ok(Self::from_sinks(SinkFactory::create_all(configurations)?))
    }

    /// Create a logger from a JSON array of sink documents
    ///
    /// # Example
    ///
    /// ```
    /// use rust_multisink_logger::Logger;
    ///
    /// let dir = std::env::temp_dir().join("multisink-doc");
    /// let json = format!(
    ///     r#"[{{"Type": "File", "ApplicationName": "Doc", "FilePath": {:?}}}]"#,
    ///     dir.display().to_string()
    /// );
    /// let logger = Logger::from_json_str(&json).unwrap();
    /// assert_eq!(logger.sink_names(), vec!["file"]);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let configurations = SinkConfiguration::list_from_json_str(json)?;
        Self::new(&configurations)
    }

    /// Create a logger over already constructed sinks
    pub fn from_sinks(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self {
            sinks,
            trace_id: RwLock::new(None),
            metrics: LoggerMetrics::new(),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn trace_id(&self) -> Option<String> {
        self.trace_id.read().clone()
    }

    pub fn set_trace_id(&self, trace_id: Option<String>) {
        *self.trace_id.write() = trace_id;
    }

    /// Apply the current correlation id to `message`
    pub fn format_message(&self, message: &str) -> String {
        format_message_with_trace_id(message, self.trace_id.read().as_deref())
    }

    /// Deliver a message at `level` to every sink
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>, caller: &CallerInfo) -> Result<()> {
        let message = self.format_message(message.as_ref());
        self.fan_out(level, &message, caller)
    }

    /// Deliver a message at `level`, resolving the caller from `state`
    pub fn log_with_state(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        state: Option<&Value>,
    ) -> Result<()> {
        self.log(level, message, &CallerInfo::resolve(state))
    }

    /// State flavour with a correlation id for this call only; `None` falls
    /// back to the logger's own id
    pub(crate) fn log_with_state_and_trace_id(
        &self,
        level: LogLevel,
        message: &str,
        state: Option<&Value>,
        trace_id: Option<&str>,
    ) -> Result<()> {
        let message = match trace_id {
            Some(id) => format_message_with_trace_id(message, Some(id)),
            None => self.format_message(message),
        };
        self.fan_out(level, &message, &CallerInfo::resolve(state))
    }

    fn fan_out(&self, level: LogLevel, message: &str, caller: &CallerInfo) -> Result<()> {
        self.metrics.record_call();
        let mut failures = Vec::new();

        for (index, sink) in self.sinks.iter().enumerate() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink::dispatch(sink.as_ref(), level, message, caller)
            }));

            let error = match outcome {
                Ok(Ok(())) => {
                    self.metrics.record_delivered();
                    continue;
                }
                Ok(Err(e)) => e,
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} ({}) panicked: {}. \
                         Other sinks continue to function.",
                        index,
                        sink.name(),
                        panic_msg
                    );
                    LoggerError::SinkPanicked(panic_msg)
                }
            };

            self.metrics.record_failed();
            failures.push(SinkFailure {
                index,
                sink: sink.name().to_string(),
                error,
            });
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::SinkFailures(failures))
        }
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>, caller: &CallerInfo) -> Result<()> {
        self.log(LogLevel::Trace, message, caller)
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>, caller: &CallerInfo) -> Result<()> {
        self.log(LogLevel::Debug, message, caller)
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>, caller: &CallerInfo) -> Result<()> {
        self.log(LogLevel::Information, message, caller)
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>, caller: &CallerInfo) -> Result<()> {
        self.log(LogLevel::Warning, message, caller)
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>, caller: &CallerInfo) -> Result<()> {
        self.log(LogLevel::Error, message, caller)
    }

    #[inline]
    pub fn critical(&self, message: impl AsRef<str>, caller: &CallerInfo) -> Result<()> {
        self.log(LogLevel::Critical, message, caller)
    }

    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>, caller: &CallerInfo) -> Result<()> {
        self.log(LogLevel::Fatal, message, caller)
    }

    /// Log an error value through every sink's exception operation
    pub fn exception(&self, error: &(dyn Error + 'static), caller: &CallerInfo) -> Result<()> {
        self.log(LogLevel::Exception, describe_error(error), caller)
    }

    #[inline]
    pub fn trace_with_state(&self, message: impl AsRef<str>, state: Option<&Value>) -> Result<()> {
        self.log_with_state(LogLevel::Trace, message, state)
    }

    #[inline]
    pub fn debug_with_state(&self, message: impl AsRef<str>, state: Option<&Value>) -> Result<()> {
        self.log_with_state(LogLevel::Debug, message, state)
    }

    #[inline]
    pub fn info_with_state(&self, message: impl AsRef<str>, state: Option<&Value>) -> Result<()> {
        self.log_with_state(LogLevel::Information, message, state)
    }

    #[inline]
    pub fn warn_with_state(&self, message: impl AsRef<str>, state: Option<&Value>) -> Result<()> {
        self.log_with_state(LogLevel::Warning, message, state)
    }

    #[inline]
    pub fn error_with_state(&self, message: impl AsRef<str>, state: Option<&Value>) -> Result<()> {
        self.log_with_state(LogLevel::Error, message, state)
    }

    #[inline]
    pub fn critical_with_state(&self, message: impl AsRef<str>, state: Option<&Value>) -> Result<()> {
        self.log_with_state(LogLevel::Critical, message, state)
    }

    #[inline]
    pub fn fatal_with_state(&self, message: impl AsRef<str>, state: Option<&Value>) -> Result<()> {
        self.log_with_state(LogLevel::Fatal, message, state)
    }

    /// Log an error value, resolving the caller from `state`
    pub fn exception_with_state(
        &self,
        error: &(dyn Error + 'static),
        state: Option<&Value>,
    ) -> Result<()> {
        self.log_with_state(LogLevel::Exception, describe_error(error), state)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("sinks", &self.sink_names())
            .field("trace_id", &self.trace_id())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_multisink_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .configuration(ConsoleConfiguration::new().with_colors(false))
///     .trace_id("req-7")
///     .build()
///     .unwrap();
/// assert_eq!(logger.sink_names(), vec!["console"]);
/// ```
pub struct LoggerBuilder {
    entries: Vec<BuilderEntry>,
    trace_id: Option<String>,
}

enum BuilderEntry {
    Configuration(SinkConfiguration),
    Sink(Box<dyn Sink>),
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            trace_id: None,
        }
    }

    /// Register a sink built from `config` at this position
    #[must_use = "builder methods return a new value"]
    pub fn configuration(mut self, config: impl Into<SinkConfiguration>) -> Self {
        self.entries.push(BuilderEntry::Configuration(config.into()));
        self
    }

    /// Register a ready sink at this position
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.entries.push(BuilderEntry::Sink(Box::new(sink)));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Build the Logger; fails if any configuration is rejected by the factory
    pub fn build(self) -> Result<Logger> {
        let sinks = self
            .entries
            .into_iter()
            .map(|entry| match entry {
                BuilderEntry::Configuration(config) => SinkFactory::create(&config),
                BuilderEntry::Sink(sink) => Ok(sink),
            })
            .collect::<Result<Vec<_>>>()?;

        let logger = Logger::from_sinks(sinks);
        logger.set_trace_id(self.trace_id);
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
