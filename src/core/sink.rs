//! Sink trait for log output destinations

use super::{caller_info::CallerInfo, error::Result, log_level::LogLevel};

/// A destination that durably emits rendered log lines.
///
/// Implementations serialize their own physical writes, so a sink is shared
/// by reference across threads. Only [`Sink::write`] and [`Sink::name`] are
/// required; the per-severity operations route through `write`.
pub trait Sink: Send + Sync {
    fn write(&self, level: LogLevel, message: &str, caller: &CallerInfo) -> Result<()>;
    fn name(&self) -> &str;

    fn trace(&self, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write(LogLevel::Trace, message, caller)
    }

    fn debug(&self, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write(LogLevel::Debug, message, caller)
    }

    fn info(&self, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write(LogLevel::Information, message, caller)
    }

    fn warn(&self, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write(LogLevel::Warning, message, caller)
    }

    fn error(&self, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write(LogLevel::Error, message, caller)
    }

    fn exception(&self, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write(LogLevel::Exception, message, caller)
    }

    fn critical(&self, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write(LogLevel::Critical, message, caller)
    }

    fn fatal(&self, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write(LogLevel::Fatal, message, caller)
    }
}

/// Invoke the operation of `sink` that corresponds to `level`
pub fn dispatch(sink: &dyn Sink, level: LogLevel, message: &str, caller: &CallerInfo) -> Result<()> {
    match level {
        LogLevel::Trace => sink.trace(message, caller),
        LogLevel::Debug => sink.debug(message, caller),
        LogLevel::Information => sink.info(message, caller),
        LogLevel::Warning => sink.warn(message, caller),
        LogLevel::Error => sink.error(message, caller),
        LogLevel::Exception => sink.exception(message, caller),
        LogLevel::Critical => sink.critical(message, caller),
        LogLevel::Fatal => sink.fatal(message, caller),
    }
}
