//! Core logger types and traits

pub mod adapter;
pub mod caller_info;
pub mod config;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;

pub use adapter::{FacadeAdapter, RecordSink, RenderFn, ScopedTraceId, TraceIdCarrier};
pub use caller_info::CallerInfo;
pub use config::{
    ConsoleConfiguration, FileConfiguration, FolderScheme, SinkConfiguration, SplitLevel,
};
pub use error::{LoggerError, Result, SinkFailure};
pub use log_context::{ContextGuard, TraceContext};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{describe_error, format_message_with_trace_id, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
