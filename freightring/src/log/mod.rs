//! Logging abstraction layer.
//!
//! Trains and the generator emit their trace events through the
//! [`Logger`] trait instead of a concrete backend. The contract is the
//! atomic-line guarantee the simulation relies on: each `log` call's full
//! message appears as one non-interleaved unit in the output stream, with
//! no cross-thread ordering beyond that.
//!
//! - [`TracingLogger`]: production adapter that delegates to `tracing`
//! - [`NoOpLogger`]: discards everything, for quiet tests
//! - [`MemoryLogger`]: captures messages so tests can assert on the trace
//!
//! Components hold an `Arc<dyn Logger>` and log through the `log_*!`
//! macros:
//!
//! ```
//! use freightring::log::{Logger, NoOpLogger};
//! use freightring::log_info;
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_info!(logger, "train {} arrived at station {}", 1, 4);
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::MemoryLogger;
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
