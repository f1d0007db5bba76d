//! Simulation parameters.
//!
//! Pure data settings plus the bounded random draws used to materialize
//! per-station and per-train values at startup. Parameters are read once
//! at startup and immutable afterward; all randomized draws go through an
//! injected [`RandomSource`] so runs can be reproduced from a seed.

use std::time::Duration;

use crate::error::SimulationError;
use crate::random::RandomSource;
use crate::shipment::StationId;

/// Default number of stations on the ring.
pub const DEFAULT_STATION_COUNT: usize = 8;

/// Default number of trains.
pub const DEFAULT_TRAIN_COUNT: usize = 4;

/// Default upper bound for a station's intake capacity draw.
pub const DEFAULT_MAX_STATION_CAPACITY: u32 = 20;

/// Default upper bound for a train's carrying capacity draw.
pub const DEFAULT_MAX_TRAIN_CAPACITY: u32 = 15;

/// Default upper bound for the per-size-unit handling time draw, in
/// handling-time units.
pub const DEFAULT_MAX_HANDLING_UNITS: u32 = 1000;

/// Default upper bound for the generator's sleep draw, in sleep units.
pub const DEFAULT_MAX_GENERATOR_SLEEP_UNITS: u32 = 2;

/// Default upper bound for a generated shipment's size.
pub const DEFAULT_MAX_SHIPMENT_SIZE: u32 = 10;

/// Complete simulation configuration.
///
/// Time-valued parameters are split into a unit `Duration` and an integer
/// bound so tests can shrink the units to milliseconds without changing
/// the drawn magnitudes.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of stations on the ring. At least 2: every shipment's
    /// destination must differ from its origin.
    pub station_count: usize,
    /// Number of trains. At least 1.
    pub train_count: usize,
    /// A station's intake capacity is drawn uniformly from `[1, this]`.
    pub max_station_capacity: u32,
    /// A train's carrying capacity is drawn uniformly from `[1, this]`,
    /// plus one.
    pub max_train_capacity: u32,
    /// A train's per-size-unit handling delay is drawn uniformly from
    /// `[1, this]` handling-time units.
    pub max_handling_units: u32,
    /// Length of one handling-time unit.
    pub handling_time_unit: Duration,
    /// Length of one travel-time unit. The train at index `i` spends
    /// `(i + 2)` units per travel phase, keeping speeds distinct.
    pub travel_time_unit: Duration,
    /// The generator's inter-shipment sleep is drawn uniformly from
    /// `[1, this]` sleep units.
    pub max_generator_sleep_units: u32,
    /// Length of one generator sleep unit.
    pub generator_sleep_unit: Duration,
    /// Upper bound for a generated shipment's size. The effective bound
    /// per draw is the smaller of this and the origin's remaining
    /// capacity.
    pub max_shipment_size: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            station_count: DEFAULT_STATION_COUNT,
            train_count: DEFAULT_TRAIN_COUNT,
            max_station_capacity: DEFAULT_MAX_STATION_CAPACITY,
            max_train_capacity: DEFAULT_MAX_TRAIN_CAPACITY,
            max_handling_units: DEFAULT_MAX_HANDLING_UNITS,
            handling_time_unit: Duration::from_millis(1),
            travel_time_unit: Duration::from_secs(1),
            max_generator_sleep_units: DEFAULT_MAX_GENERATOR_SLEEP_UNITS,
            generator_sleep_unit: Duration::from_secs(1),
            max_shipment_size: DEFAULT_MAX_SHIPMENT_SIZE,
        }
    }
}

impl SimulationConfig {
    /// Checks every parameter against its valid range.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.station_count < 2 {
            return Err(SimulationError::InvalidConfig(format!(
                "station_count must be at least 2, got {}",
                self.station_count
            )));
        }
        if self.train_count < 1 {
            return Err(SimulationError::InvalidConfig(
                "train_count must be at least 1".into(),
            ));
        }
        if self.max_station_capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "max_station_capacity must be nonzero".into(),
            ));
        }
        if self.max_train_capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "max_train_capacity must be nonzero".into(),
            ));
        }
        if self.max_handling_units == 0 {
            return Err(SimulationError::InvalidConfig(
                "max_handling_units must be nonzero".into(),
            ));
        }
        if self.max_generator_sleep_units == 0 {
            return Err(SimulationError::InvalidConfig(
                "max_generator_sleep_units must be nonzero".into(),
            ));
        }
        if self.max_shipment_size == 0 {
            return Err(SimulationError::InvalidConfig(
                "max_shipment_size must be nonzero".into(),
            ));
        }
        Ok(())
    }

    /// Intake capacity for a newly built station: uniform `[1, max]`.
    pub fn draw_station_capacity(&self, rng: &mut dyn RandomSource) -> u32 {
        rng.generate(1, self.max_station_capacity)
    }

    /// Carrying capacity for a train: uniform `[1, max]` plus one, so
    /// even the smallest train can move at least a unit of cargo.
    pub fn draw_train_capacity(&self, rng: &mut dyn RandomSource) -> u32 {
        rng.generate(1, self.max_train_capacity) + 1
    }

    /// Starting station for a train: uniform over the ring.
    pub fn draw_start_station(&self, rng: &mut dyn RandomSource) -> StationId {
        rng.generate(0, self.station_count as u32 - 1) as StationId
    }

    /// Per-size-unit handling delay for a train: uniform `[1, max]`
    /// handling-time units. Drawn separately for loading and unloading.
    pub fn draw_handling_time(&self, rng: &mut dyn RandomSource) -> Duration {
        self.handling_time_unit * rng.generate(1, self.max_handling_units)
    }

    /// Travel delay per phase for the train at `index`.
    ///
    /// A deterministic function of the index so no two trains share a
    /// speed.
    pub fn travel_time_for(&self, index: u32) -> Duration {
        self.travel_time_unit * (index + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_single_station_ring_is_rejected() {
        let config = SimulationConfig {
            station_count: 1,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_trains_rejected() {
        let config = SimulationConfig {
            train_count: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_bounds_rejected() {
        let config = SimulationConfig {
            max_shipment_size: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_station_capacity_draw_within_bounds() {
        let config = SimulationConfig::default();
        let mut rng = SeededRandom::from_seed(3);
        for _ in 0..100 {
            let capacity = config.draw_station_capacity(&mut rng);
            assert!((1..=DEFAULT_MAX_STATION_CAPACITY).contains(&capacity));
        }
    }

    #[test]
    fn test_train_capacity_draw_is_offset_by_one() {
        let config = SimulationConfig::default();
        let mut rng = SeededRandom::from_seed(4);
        for _ in 0..100 {
            let capacity = config.draw_train_capacity(&mut rng);
            assert!((2..=DEFAULT_MAX_TRAIN_CAPACITY + 1).contains(&capacity));
        }
    }

    #[test]
    fn test_start_station_draw_covers_only_the_ring() {
        let config = SimulationConfig {
            station_count: 3,
            ..SimulationConfig::default()
        };
        let mut rng = SeededRandom::from_seed(5);
        for _ in 0..100 {
            assert!(config.draw_start_station(&mut rng) < 3);
        }
    }

    #[test]
    fn test_travel_times_are_distinct_per_train() {
        let config = SimulationConfig::default();
        assert_eq!(config.travel_time_for(0), Duration::from_secs(2));
        assert_eq!(config.travel_time_for(1), Duration::from_secs(3));
        assert_ne!(config.travel_time_for(2), config.travel_time_for(3));
    }
}
