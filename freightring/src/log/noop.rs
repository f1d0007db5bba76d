//! No-operation logger implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// A logger that discards every message.
///
/// Used in tests that only care about simulation state, not the trace
/// stream, and anywhere silent operation is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoOpLogger>();
    }

    #[test]
    fn test_noop_accepts_every_level() {
        let logger: Box<dyn Logger> = Box::new(NoOpLogger);
        logger.trace(format_args!("discarded"));
        logger.debug(format_args!("discarded"));
        logger.info(format_args!("discarded"));
        logger.warn(format_args!("discarded"));
        logger.error(format_args!("discarded"));
    }
}
