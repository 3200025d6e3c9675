//! # Rust Multi-Sink Logger
//!
//! A synchronous logging core that fans each log call out to an ordered set
//! of sinks.
//!
//! ## Features
//!
//! - **Canonical lines**: `LEVEL: unit | operation | timestamp | message`
//! - **Caller resolution**: from call-site macros or from untyped state
//! - **Correlation ids**: optional `[TraceId] <id> | ` prefix per logger
//! - **Date-partitioned files**: folder scheme and split level chosen independently
//! - **Thread Safe**: every sink serializes its own writes

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::sinks::{FilePlacement, FileSink, SinkFactory};
    pub use crate::core::{
        CallerInfo, ConsoleConfiguration, ContextGuard, FacadeAdapter, FileConfiguration,
        FolderScheme, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
        RecordSink, Result, ScopedTraceId, Sink, SinkConfiguration, SinkFailure, SplitLevel,
        TraceContext, TraceIdCarrier,
    };
}

#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;
pub use crate::sinks::{FilePlacement, FileSink, SinkFactory};
pub use crate::core::{
    describe_error, format_message_with_trace_id, CallerInfo, ConsoleConfiguration, ContextGuard,
    FacadeAdapter, FileConfiguration, FolderScheme, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerError, LoggerMetrics, RecordSink, RenderFn, Result, ScopedTraceId, Sink,
    SinkConfiguration, SinkFailure, SplitLevel, TraceContext, TraceIdCarrier,
};
