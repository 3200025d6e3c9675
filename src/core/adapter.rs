//! Integration seams for an external logging façade
//!
//! A façade hands over leveled records with arbitrary state ([`RecordSink`])
//! and needs somewhere to keep the correlation id of the current unit of
//! work ([`TraceIdCarrier`]). [`FacadeAdapter`] implements both on top of a
//! shared [`Logger`] and the scoped [`TraceContext`].

use super::{
    caller_info::{self, UNKNOWN},
    error::{LoggerError, Result, SinkFailure},
    log_context::TraceContext,
    log_level::LogLevel,
    logger::{describe_error, Logger},
};
use serde_json::{json, Value};
use std::error::Error;
use std::panic::Location;
use std::sync::Arc;

/// Renders the final message from the record's state and error
pub type RenderFn<'a> = &'a dyn Fn(Option<&Value>, Option<&(dyn Error + 'static)>) -> String;

/// Accepts leveled records carrying arbitrary state
pub trait RecordSink {
    fn log_record(
        &self,
        level: LogLevel,
        state: Option<&Value>,
        error: Option<&(dyn Error + 'static)>,
        render: RenderFn<'_>,
    ) -> Result<()>;
}

/// Gettable/settable correlation id
pub trait TraceIdCarrier {
    fn trace_id(&self) -> Option<String>;
    fn set_trace_id(&self, trace_id: Option<String>);
}

impl TraceIdCarrier for Logger {
    fn trace_id(&self) -> Option<String> {
        Logger::trace_id(self)
    }

    fn set_trace_id(&self, trace_id: Option<String>) {
        Logger::set_trace_id(self, trace_id)
    }
}

/// Correlation id of the innermost [`TraceContext`] scope on this thread;
/// `None` and write-ignoring when no scope is open
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedTraceId;

impl TraceIdCarrier for ScopedTraceId {
    fn trace_id(&self) -> Option<String> {
        TraceContext::current()
    }

    fn set_trace_id(&self, trace_id: Option<String>) {
        TraceContext::set_current(trace_id);
    }
}

/// Bridges façade records into a shared [`Logger`]
///
/// # Example
///
/// ```
/// use rust_multisink_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::from_sinks(Vec::new()));
/// let adapter = FacadeAdapter::new(Arc::clone(&logger));
///
/// let _scope = TraceContext::enter("req-1");
/// adapter
///     .log_record(LogLevel::Information, None, None, &|_, _| "handled".to_string())
///     .unwrap();
/// // The scoped id applies per record; the shared logger is left untouched
/// assert_eq!(logger.trace_id(), None);
/// ```
#[derive(Debug, Clone)]
pub struct FacadeAdapter {
    logger: Arc<Logger>,
}

impl FacadeAdapter {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Forward one record; `trace_id` is the scoped id, if any, and never
    /// outlives this call
    fn forward(
        &self,
        level: LogLevel,
        message: &str,
        state: &Value,
        error: Option<&(dyn Error + 'static)>,
        trace_id: Option<&str>,
    ) -> Result<()> {
        let mut failures = Vec::new();

        if let Some(error) = error {
            let text = describe_error(error);
            if let Err(e) = self.logger.log_with_state_and_trace_id(
                LogLevel::Exception,
                &text,
                Some(state),
                trace_id,
            ) {
                failures.extend(into_failures(e));
            }
        }

        if error.is_none() || level != LogLevel::Exception {
            if let Err(e) =
                self.logger
                    .log_with_state_and_trace_id(level, message, Some(state), trace_id)
            {
                failures.extend(into_failures(e));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::SinkFailures(failures))
        }
    }
}

impl RecordSink for FacadeAdapter {
    /// Resolve provenance and forward the record to the logger.
    ///
    /// When `state` lacks caller info it is enriched with the location of the
    /// code calling this method. With an error present, the error is logged
    /// through the exception operation first and the rendered message is then
    /// logged at `level` unless `level` is [`LogLevel::Exception`]. The id of
    /// the innermost [`TraceContext`] scope prefixes both, for this record only.
    #[track_caller]
    fn log_record(
        &self,
        level: LogLevel,
        state: Option<&Value>,
        error: Option<&(dyn Error + 'static)>,
        render: RenderFn<'_>,
    ) -> Result<()> {
        let message = render(state, error);
        let location = Location::caller();
        let trace_id = ScopedTraceId.trace_id();

        let state = if caller_info::contains_caller_info(state) {
            state.cloned().unwrap_or(Value::Null)
        } else {
            enrich_state(state, location.file(), &message)
        };

        self.forward(level, &message, &state, error, trace_id.as_deref())
    }
}

/// Append caller keys to the pairs of `state` (non-pair states are replaced)
fn enrich_state(state: Option<&Value>, file: &str, message: &str) -> Value {
    let mut pairs: Vec<Value> = state
        .and_then(caller_info::state_pairs)
        .map(|pairs| pairs.map(|(k, v)| json!([k, v])).collect())
        .unwrap_or_default();

    pairs.push(json!(["CallerFilePath", file]));
    pairs.push(json!(["CallerMemberName", UNKNOWN]));
    pairs.push(json!(["OriginalMessage", message]));
    Value::Array(pairs)
}

fn into_failures(error: LoggerError) -> Vec<SinkFailure> {
    match error {
        LoggerError::SinkFailures(failures) => failures,
        other => vec![SinkFailure {
            index: 0,
            sink: "logger".to_string(),
            error: other,
        }],
    }
}
