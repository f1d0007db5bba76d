//! Error types for simulation construction.

use std::io;
use thiserror::Error;

/// Errors raised while validating configuration or starting threads.
///
/// The running core deliberately has no recoverable-error taxonomy: once
/// the threads are up, every failure mode is a liveness risk (a blocked
/// gate, a saturated ring starving the generator) that shows up as
/// silence in the trace log, never as an error value.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A configuration parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The OS refused to spawn a simulation thread.
    #[error("failed to spawn {name} thread: {source}")]
    ThreadSpawn {
        /// Name the thread would have carried.
        name: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}
