//! Logging macros that capture the call site.
//!
//! Each leveled macro fills in the caller info from `file!()` and the name of
//! the enclosing function, formats its arguments like `format!`, and returns
//! the logger's `Result`.
//!
//! # Examples
//!
//! ```
//! use rust_multisink_logger::prelude::*;
//! use rust_multisink_logger::info;
//!
//! let logger = Logger::from_sinks(Vec::new());
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//! ```

/// Name of the enclosing function, skipping closures.
///
/// ```
/// fn checkout() -> &'static str {
///     rust_multisink_logger::function_name!()
/// }
/// assert_eq!(checkout(), "checkout");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::caller_info::operation_from_type_name(__type_name_of(__here))
    }};
}

/// [`CallerInfo`](crate::CallerInfo) for the current source file and function.
///
/// ```
/// use rust_multisink_logger::caller;
///
/// fn handler() -> rust_multisink_logger::CallerInfo {
///     caller!()
/// }
/// let info = handler();
/// assert_eq!(info.operation_name, "handler");
/// assert!(info.source_location.ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! caller {
    () => {
        $crate::CallerInfo::new(file!(), $crate::function_name!())
    };
}

/// Log a message at an explicit level.
///
/// ```
/// # use rust_multisink_logger::prelude::*;
/// # let logger = Logger::from_sinks(Vec::new());
/// use rust_multisink_logger::log;
/// log!(logger, LogLevel::Information, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), &$crate::caller!())
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an information-level message.
///
/// ```
/// # use rust_multisink_logger::prelude::*;
/// # let logger = Logger::from_sinks(Vec::new());
/// use rust_multisink_logger::info;
/// info!(logger, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Information, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log an error value through the exception operation.
///
/// ```
/// # use rust_multisink_logger::prelude::*;
/// # let logger = Logger::from_sinks(Vec::new());
/// use rust_multisink_logger::exception;
/// let err = std::io::Error::other("connection reset");
/// exception!(logger, &err).unwrap();
/// ```
#[macro_export]
macro_rules! exception {
    ($logger:expr, $error:expr) => {
        $logger.exception($error, &$crate::caller!())
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
