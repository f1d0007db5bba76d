//! Simulation facade.
//!
//! Builds the station ring, spawns one named thread per train plus the
//! generator thread, and owns their join handles. Shutdown is two-step:
//! [`Simulation::shutdown`] signals the token, [`Simulation::join`] waits
//! for the threads to observe it. Dropping a running simulation does
//! both.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::generator::{GeneratorSettings, ShipmentGenerator};
use crate::log::Logger;
use crate::random::RandomSource;
use crate::registry::StationRegistry;
use crate::shutdown::ShutdownToken;
use crate::train::{Train, TrainTimings};
use crate::{log_info, log_warn};

/// A running simulation: the station ring plus all worker threads.
pub struct Simulation {
    registry: Arc<StationRegistry>,
    shutdown: ShutdownToken,
    threads: Vec<JoinHandle<()>>,
    logger: Arc<dyn Logger>,
}

impl Simulation {
    /// Validates `config`, materializes stations and trains with draws
    /// from `bootstrap_rng`, and starts every thread.
    ///
    /// `generator_rng` is moved into the generator thread, which owns it
    /// for the lifetime of the run.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidConfig`] for out-of-range
    /// parameters and [`SimulationError::ThreadSpawn`] if the OS refuses
    /// a thread. On a spawn failure the already-running threads are
    /// signalled to stop before the error is returned.
    pub fn start(
        config: &SimulationConfig,
        bootstrap_rng: &mut dyn RandomSource,
        generator_rng: Box<dyn RandomSource>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let capacities = (0..config.station_count)
            .map(|_| config.draw_station_capacity(bootstrap_rng))
            .collect();
        let registry = Arc::new(StationRegistry::new(capacities));
        for station in registry.stations() {
            log_info!(logger, "{}", station.summary());
        }

        let shutdown = ShutdownToken::new();
        let mut threads = Vec::with_capacity(config.train_count + 1);

        for index in 0..config.train_count {
            let id = index as u32;
            let timings = TrainTimings {
                travel: config.travel_time_for(id),
                loading: config.draw_handling_time(bootstrap_rng),
                unloading: config.draw_handling_time(bootstrap_rng),
            };
            let train = Train::new(
                id,
                config.draw_train_capacity(bootstrap_rng),
                config.draw_start_station(bootstrap_rng),
                timings,
                Arc::clone(&registry),
                Arc::clone(&logger),
            );
            let name = format!("train-{id}");
            let token = shutdown.clone();
            let handle = Self::spawn(&shutdown, name, move || train.run(token))?;
            threads.push(handle);
        }

        let generator = ShipmentGenerator::new(
            Arc::clone(&registry),
            generator_rng,
            GeneratorSettings {
                sleep_unit: config.generator_sleep_unit,
                max_sleep_units: config.max_generator_sleep_units,
                max_shipment_size: config.max_shipment_size,
            },
            Arc::clone(&logger),
        );
        let token = shutdown.clone();
        let handle = Self::spawn(&shutdown, "shipment-generator".to_string(), move || {
            generator.run(token)
        })?;
        threads.push(handle);

        Ok(Self {
            registry,
            shutdown,
            threads,
            logger,
        })
    }

    fn spawn<F>(
        shutdown: &ShutdownToken,
        name: String,
        body: F,
    ) -> Result<JoinHandle<()>, SimulationError>
    where
        F: FnOnce() + Send + 'static,
    {
        thread::Builder::new()
            .name(name.clone())
            .spawn(body)
            .map_err(|source| {
                // Stop the threads spawned so far; they exit at their
                // next shutdown poll.
                shutdown.cancel();
                SimulationError::ThreadSpawn { name, source }
            })
    }

    /// The shared station table.
    pub fn registry(&self) -> &Arc<StationRegistry> {
        &self.registry
    }

    /// A clone of the shutdown token, e.g. for a signal handler.
    pub fn shutdown_token(&self) -> ShutdownToken {
        self.shutdown.clone()
    }

    /// Signals every thread to stop. Non-blocking; threads exit at the
    /// top of their next iteration.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Waits for every thread to finish.
    ///
    /// Blocks up to the longest pending delay or gate wait; on a
    /// permanently stalled ring (every gate held, no train able to
    /// proceed) this can hang, which is an accepted liveness risk of the
    /// protocol rather than an error.
    pub fn join(&mut self) {
        for handle in self.threads.drain(..) {
            let name = handle
                .thread()
                .name()
                .unwrap_or("simulation thread")
                .to_string();
            if handle.join().is_err() {
                log_warn!(self.logger, "{} panicked", name);
            }
        }
    }

    /// True while any simulation thread is still running.
    pub fn is_running(&self) -> bool {
        self.threads.iter().any(|handle| !handle.is_finished())
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.shutdown();
        self.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NoOpLogger;
    use crate::random::SeededRandom;
    use std::time::Duration;

    fn fast_config() -> SimulationConfig {
        SimulationConfig {
            station_count: 3,
            // A single train cannot contend on gates, so shutdown and
            // join are guaranteed to complete.
            train_count: 1,
            max_station_capacity: 20,
            max_train_capacity: 5,
            max_handling_units: 2,
            handling_time_unit: Duration::from_millis(1),
            travel_time_unit: Duration::from_millis(5),
            max_generator_sleep_units: 2,
            generator_sleep_unit: Duration::from_millis(5),
            max_shipment_size: 5,
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_before_spawning() {
        let config = SimulationConfig {
            station_count: 1,
            ..fast_config()
        };
        let mut rng = SeededRandom::from_seed(1);
        let result = Simulation::start(
            &config,
            &mut rng,
            Box::new(SeededRandom::from_seed(2)),
            Arc::new(NoOpLogger),
        );
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_simulation_starts_and_stops() {
        let mut rng = SeededRandom::from_seed(10);
        let mut simulation = Simulation::start(
            &fast_config(),
            &mut rng,
            Box::new(SeededRandom::from_seed(11)),
            Arc::new(NoOpLogger),
        )
        .unwrap();

        assert!(simulation.is_running());
        assert_eq!(simulation.registry().len(), 3);

        thread::sleep(Duration::from_millis(50));
        simulation.shutdown();
        simulation.join();
        assert!(!simulation.is_running());
    }

    #[test]
    fn test_external_token_clone_cancels_the_simulation() {
        let mut rng = SeededRandom::from_seed(20);
        let mut simulation = Simulation::start(
            &fast_config(),
            &mut rng,
            Box::new(SeededRandom::from_seed(21)),
            Arc::new(NoOpLogger),
        )
        .unwrap();

        // The same path a signal handler takes: cancel through a clone.
        let token = simulation.shutdown_token();
        token.cancel();
        simulation.join();
        assert!(!simulation.is_running());
    }
}
