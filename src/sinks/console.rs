//! Console sink implementation

use crate::core::{
    CallerInfo, ConsoleConfiguration, LogEntry, LogLevel, LoggerError, Result, Sink,
};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Once;

const COLOR_RESET: &str = "\x1b[0m";

static ENABLE_VIRTUAL_TERMINAL: Once = Once::new();

/// Writes formatted lines to standard output, optionally colored by severity
pub struct ConsoleSink {
    use_colors: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn new(config: ConsoleConfiguration) -> Self {
        Self::with_writer(config, std::io::stdout())
    }

    /// Write to `writer` instead of standard output
    ///
    /// # Example
    ///
    /// ```
    /// use rust_multisink_logger::{CallerInfo, ConsoleConfiguration, Sink};
    /// use rust_multisink_logger::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::with_writer(ConsoleConfiguration::new(), std::io::sink());
    /// sink.info("ready", &CallerInfo::unknown()).unwrap();
    /// ```
    pub fn with_writer(config: ConsoleConfiguration, writer: impl Write + Send + 'static) -> Self {
        Self {
            use_colors: config.use_colors,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// Wrap a rendered line in the severity's ANSI foreground color
    pub fn colorize(level: LogLevel, line: &str) -> String {
        format!(
            "\x1b[{}m{}{}",
            level.color_code().to_fg_str(),
            line,
            COLOR_RESET
        )
    }
}

impl Sink for ConsoleSink {
    fn write(&self, level: LogLevel, message: &str, caller: &CallerInfo) -> Result<()> {
        let line = LogEntry::format(
            level,
            &caller.source_location,
            &caller.operation_name,
            message,
        );

        let output = if self.use_colors {
            ENABLE_VIRTUAL_TERMINAL.call_once(enable_virtual_terminal);
            Self::colorize(level, &line)
        } else {
            line
        };

        let mut writer = self.writer.lock();
        writer
            .write_all(output.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::io_operation("writing to console", "stdout", e))
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(windows)]
fn enable_virtual_terminal() {
    // Best effort: older consoles simply show the raw escape sequences
    let _ = colored::control::set_virtual_terminal(true);
}

#[cfg(not(windows))]
fn enable_virtual_terminal() {}
