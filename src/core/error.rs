//! Error types for the logger system

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required argument was absent
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// Configuration variant with no sink implementation
    #[error("Unsupported logger configuration type: {type_name}")]
    UnsupportedConfiguration { type_name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Value outside a closed enumeration
    #[error("Value '{value}' is out of range for {name}")]
    OutOfRange { name: String, value: String },

    /// A sink panicked while writing
    #[error("Sink panicked: {0}")]
    SinkPanicked(String),

    /// One or more sinks failed during fan-out
    #[error("{} sink(s) failed: {}", .0.len(), join_failures(.0))]
    SinkFailures(Vec<SinkFailure>),
}

/// Outcome of a single failed sink during fan-out
#[derive(Debug)]
pub struct SinkFailure {
    /// Registration index of the sink
    pub index: usize,
    /// Sink name as reported by [`crate::core::Sink::name`]
    pub sink: String,
    pub error: LoggerError,
}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({}): {}", self.index, self.sink, self.error)
    }
}

fn join_failures(failures: &[SinkFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported configuration error
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        LoggerError::UnsupportedConfiguration {
            type_name: type_name.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range(name: impl Into<String>, value: impl ToString) -> Self {
        LoggerError::OutOfRange {
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// Failures recorded during fan-out, empty for any other error
    pub fn sink_failures(&self) -> &[SinkFailure] {
        match self {
            LoggerError::SinkFailures(failures) => failures,
            _ => &[],
        }
    }
}
