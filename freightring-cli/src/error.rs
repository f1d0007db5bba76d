//! CLI error handling with user-friendly messages.

use freightring::error::SimulationError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Failed to install the Ctrl+C handler
    Signal(String),
    /// Failed to start the simulation
    Start(SimulationError),
}

impl CliError {
    /// Exits the process with an error message and a nonzero code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::LoggingInit(_) = self {
            eprintln!();
            eprintln!("Check that the log directory is writable, or point");
            eprintln!("--log-dir somewhere else.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "failed to initialize logging: {}", e),
            CliError::Signal(msg) => write!(f, "failed to install signal handler: {}", msg),
            CliError::Start(e) => write!(f, "failed to start simulation: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Start(e) => Some(e),
            CliError::Signal(_) => None,
        }
    }
}

impl From<SimulationError> for CliError {
    fn from(e: SimulationError) -> Self {
        CliError::Start(e)
    }
}
