//! Logger trait definition.

use std::fmt::Arguments;

/// Severity of a trace message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Very fine-grained detail
    Trace,
    /// Diagnostic detail
    Debug,
    /// Normal simulation trace events
    Info,
    /// Something unexpected but survivable
    Warn,
    /// Something went wrong
    Error,
}

/// Concurrent-safe sink for simulation trace output.
///
/// Implementations must be `Send + Sync`: every train thread and the
/// generator share one logger. Each call to [`log`] must emit the full
/// message as one atomic, non-interleaved unit; no ordering across
/// threads is guaranteed beyond that.
///
/// [`log`]: Logger::log
pub trait Logger: Send + Sync {
    /// Logs a message at the given level.
    ///
    /// The single required method; the level-named convenience methods
    /// delegate here.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    /// Logs at [`LogLevel::Trace`].
    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    /// Logs at [`LogLevel::Debug`].
    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Logs at [`LogLevel::Info`].
    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Logs at [`LogLevel::Warn`].
    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    /// Logs at [`LogLevel::Error`].
    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

/// Logs a trace-level message through a [`Logger`].
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.trace(format_args!($($arg)*))
    };
}

/// Logs a debug-level message through a [`Logger`].
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

/// Logs an info-level message through a [`Logger`].
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

/// Logs a warn-level message through a [`Logger`].
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

/// Logs an error-level message through a [`Logger`].
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}
