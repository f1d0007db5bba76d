//! Freightring CLI - run the ring simulation from the command line.
//!
//! Parses parameters, installs the Ctrl+C handler, starts the simulation
//! and blocks until every thread has observed shutdown.

mod error;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use freightring::config::{
    SimulationConfig, DEFAULT_MAX_GENERATOR_SLEEP_UNITS, DEFAULT_MAX_HANDLING_UNITS,
    DEFAULT_MAX_SHIPMENT_SIZE, DEFAULT_MAX_STATION_CAPACITY, DEFAULT_MAX_TRAIN_CAPACITY,
    DEFAULT_STATION_COUNT, DEFAULT_TRAIN_COUNT,
};
use freightring::log::{Logger, TracingLogger};
use freightring::logging::{default_log_file, init_logging};
use freightring::random::{RandomSource, SeededRandom, SystemRandom};
use freightring::service::Simulation;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "freightring")]
#[command(about = "Simulate freight trains on a closed ring of stations", long_about = None)]
#[command(version = freightring::VERSION)]
struct Args {
    /// Number of stations on the ring (minimum 2)
    #[arg(long, default_value_t = DEFAULT_STATION_COUNT)]
    stations: usize,

    /// Number of trains
    #[arg(long, default_value_t = DEFAULT_TRAIN_COUNT)]
    trains: usize,

    /// Upper bound for a station's intake capacity draw
    #[arg(long, default_value_t = DEFAULT_MAX_STATION_CAPACITY)]
    max_station_capacity: u32,

    /// Upper bound for a train's carrying capacity draw
    #[arg(long, default_value_t = DEFAULT_MAX_TRAIN_CAPACITY)]
    max_train_capacity: u32,

    /// Upper bound for a train's per-size-unit handling time, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MAX_HANDLING_UNITS)]
    max_handling_ms: u32,

    /// Travel-time unit in milliseconds; the train at index i spends
    /// (i + 2) units per travel phase
    #[arg(long, default_value_t = 1000)]
    travel_unit_ms: u64,

    /// Upper bound for the generator's sleep between shipments, in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_GENERATOR_SLEEP_UNITS)]
    max_generator_sleep_secs: u32,

    /// Upper bound for a generated shipment's size
    #[arg(long, default_value_t = DEFAULT_MAX_SHIPMENT_SIZE)]
    max_shipment_size: u32,

    /// Seed for reproducible runs (entropy-seeded when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the session log file
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

impl Args {
    fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            station_count: self.stations,
            train_count: self.trains,
            max_station_capacity: self.max_station_capacity,
            max_train_capacity: self.max_train_capacity,
            max_handling_units: self.max_handling_ms,
            handling_time_unit: Duration::from_millis(1),
            travel_time_unit: Duration::from_millis(self.travel_unit_ms),
            max_generator_sleep_units: self.max_generator_sleep_secs,
            generator_sleep_unit: Duration::from_secs(1),
            max_shipment_size: self.max_shipment_size,
        }
    }

    /// One source for the bootstrap draws, an independent one for the
    /// generator thread. A fixed offset keeps the pair reproducible from
    /// a single seed.
    fn random_sources(&self) -> (Box<dyn RandomSource>, Box<dyn RandomSource>) {
        match self.seed {
            Some(seed) => (
                Box::new(SeededRandom::from_seed(seed)),
                Box::new(SeededRandom::from_seed(seed.wrapping_add(1))),
            ),
            None => (Box::new(SystemRandom::new()), Box::new(SystemRandom::new())),
        }
    }
}

fn main() {
    if let Err(error) = run() {
        error.exit();
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();

    let _logging_guard =
        init_logging(&args.log_dir, default_log_file()).map_err(CliError::LoggingInit)?;

    let config = args.to_config();
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
    let (mut bootstrap_rng, generator_rng) = args.random_sources();

    let mut simulation =
        Simulation::start(&config, bootstrap_rng.as_mut(), generator_rng, logger)?;

    let token = simulation.shutdown_token();
    ctrlc::set_handler(move || token.cancel()).map_err(|e| CliError::Signal(e.to_string()))?;

    println!(
        "freightring v{}: {} stations, {} trains. Press Ctrl+C to stop.",
        freightring::VERSION,
        config.station_count,
        config.train_count
    );

    simulation.join();

    println!("All trains parked. Goodbye!");
    Ok(())
}
