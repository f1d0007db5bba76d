//! Freightring - closed-ring railway freight simulation.
//!
//! A fixed ring of stations is connected by single-track segments, each
//! admitting one train at a time via a per-station [`gate::TrackGate`].
//! Trains run as independent threads that unload and load cargo at
//! stations, while a generator thread feeds the station queues under a
//! capacity constraint. There is no central scheduler; liveness emerges
//! from the ring of gates.
//!
//! # High-Level API
//!
//! ```ignore
//! use freightring::config::SimulationConfig;
//! use freightring::log::TracingLogger;
//! use freightring::random::SystemRandom;
//! use freightring::service::Simulation;
//! use std::sync::Arc;
//!
//! let config = SimulationConfig::default();
//! let mut rng = SystemRandom::new();
//! let mut simulation = Simulation::start(
//!     &config,
//!     &mut rng,
//!     Box::new(SystemRandom::new()),
//!     Arc::new(TracingLogger),
//! )?;
//!
//! // ... run until the shutdown token is cancelled (e.g. Ctrl+C) ...
//! simulation.shutdown();
//! simulation.join();
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod generator;
pub mod log;
pub mod logging;
pub mod random;
pub mod registry;
pub mod service;
pub mod shipment;
pub mod shutdown;
pub mod station;
pub mod train;

/// Version of the freightring library and CLI.
///
/// Synchronized across the workspace; injected from `Cargo.toml` at
/// compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
