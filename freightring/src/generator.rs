//! Shipment generation.
//!
//! One generator thread manufactures shipments at random intervals and
//! enqueues each at a randomly chosen origin station with capacity to
//! spare. The generator is the sole producer for every station queue;
//! trains are the sole consumers.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::log::Logger;
use crate::random::RandomSource;
use crate::registry::StationRegistry;
use crate::shipment::{Shipment, StationId};
use crate::shutdown::ShutdownToken;
use crate::{log_debug, log_info};

/// Generator tuning parameters.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSettings {
    /// Length of one sleep unit.
    pub sleep_unit: Duration,
    /// The inter-shipment sleep is drawn uniformly from `[1, this]`
    /// sleep units.
    pub max_sleep_units: u32,
    /// Upper bound for a shipment's size; the effective bound per draw
    /// is the smaller of this and the origin's remaining capacity.
    pub max_shipment_size: u32,
}

/// Producer of new shipments at random stations and intervals.
pub struct ShipmentGenerator {
    registry: Arc<StationRegistry>,
    rng: Box<dyn RandomSource>,
    settings: GeneratorSettings,
    logger: Arc<dyn Logger>,
    next_id: u64,
}

impl ShipmentGenerator {
    /// Creates a generator; ids start at 0 and increase monotonically.
    pub fn new(
        registry: Arc<StationRegistry>,
        rng: Box<dyn RandomSource>,
        settings: GeneratorSettings,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            registry,
            rng,
            settings,
            logger,
            next_id: 0,
        }
    }

    fn draw_station(&mut self) -> StationId {
        self.rng.generate(0, self.registry.len() as u32 - 1) as StationId
    }

    /// Manufactures one shipment and enqueues it at its origin.
    ///
    /// Origin selection redraws unboundedly while the drawn station has
    /// zero remaining capacity: if every station is saturated this spins
    /// forever. That is a known design weakness of the ring (station
    /// capacity is never replenished), deliberately left in place rather
    /// than patched with a backoff.
    ///
    /// The size draw reads the origin's capacity after the filter; the
    /// generator is the sole producer, so the two reads cannot observe a
    /// shrinking capacity.
    pub fn produce(&mut self) {
        let mut origin = self.draw_station();
        while self.registry.station(origin).remaining_capacity() == 0 {
            origin = self.draw_station();
        }

        let mut destination = self.draw_station();
        if destination == origin {
            destination = self.registry.next_of(origin);
        }

        let available = self.registry.station(origin).remaining_capacity();
        let size = self
            .rng
            .generate(0, available.min(self.settings.max_shipment_size));

        let id = self.next_id;
        self.next_id += 1;
        self.registry
            .station(origin)
            .add_shipment(Shipment::new(id, size, destination));

        log_info!(
            self.logger,
            "generated shipment {} of size {} at station {} for station {}",
            id,
            size,
            origin,
            destination
        );
        log_info!(self.logger, "{}", self.registry.station(origin).summary());
    }

    /// Runs until `shutdown` is observed at the top of an iteration.
    ///
    /// Each iteration sleeps a random duration, then produces one
    /// shipment. A generator sleeping through its delay, or spinning in
    /// the saturated-ring case above, does not observe cancellation until
    /// the iteration finishes.
    pub fn run(mut self, shutdown: ShutdownToken) {
        while !shutdown.is_cancelled() {
            let units = self.rng.generate(1, self.settings.max_sleep_units);
            thread::sleep(self.settings.sleep_unit * units);
            self.produce();
        }
        log_debug!(self.logger, "shipment generator observed shutdown, stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{MemoryLogger, NoOpLogger};
    use crate::random::SeededRandom;

    fn settings() -> GeneratorSettings {
        GeneratorSettings {
            sleep_unit: Duration::from_millis(1),
            max_sleep_units: 2,
            max_shipment_size: 10,
        }
    }

    fn generator_with_seed(
        registry: &Arc<StationRegistry>,
        seed: u64,
        logger: Arc<dyn Logger>,
    ) -> ShipmentGenerator {
        ShipmentGenerator::new(
            Arc::clone(registry),
            Box::new(SeededRandom::from_seed(seed)),
            settings(),
            logger,
        )
    }

    #[test]
    fn test_produce_enqueues_exactly_one_shipment() {
        let registry = Arc::new(StationRegistry::new(vec![10, 10, 10]));
        let mut generator = generator_with_seed(&registry, 1, Arc::new(NoOpLogger));

        generator.produce();

        let total: usize = registry.stations().map(|s| s.pending_count()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_produce_respects_capacity_accounting() {
        let registry = Arc::new(StationRegistry::new(vec![10, 10]));
        let mut generator = generator_with_seed(&registry, 2, Arc::new(NoOpLogger));

        generator.produce();

        for station in registry.stations() {
            if station.pending_count() == 1 {
                let taken = station.take_shipment_at_most(u32::MAX).unwrap();
                assert_eq!(station.remaining_capacity(), 10 - taken.size);
                assert!(taken.size <= 10);
            }
        }
    }

    #[test]
    fn test_produce_skips_saturated_origins() {
        // Station 0 has no capacity left; every shipment must originate
        // at station 1 and be destined for station 0. Station 1 gets
        // enough capacity that five draws cannot saturate it.
        let registry = Arc::new(StationRegistry::new(vec![0, 1000]));
        let mut generator = generator_with_seed(&registry, 3, Arc::new(NoOpLogger));

        for _ in 0..5 {
            generator.produce();
        }

        assert_eq!(registry.station(0).pending_count(), 0);
        assert_eq!(registry.station(1).pending_count(), 5);
        while let Some(shipment) = registry.station(1).take_shipment_at_most(u32::MAX) {
            assert_eq!(shipment.destination, 0);
        }
    }

    #[test]
    fn test_shipment_ids_are_monotonic() {
        let registry = Arc::new(StationRegistry::new(vec![100, 100]));
        let logger = Arc::new(MemoryLogger::new());
        let mut generator =
            generator_with_seed(&registry, 4, Arc::clone(&logger) as Arc<dyn Logger>);

        for _ in 0..3 {
            generator.produce();
        }

        assert_eq!(logger.count_containing("generated shipment 0 "), 1);
        assert_eq!(logger.count_containing("generated shipment 1 "), 1);
        assert_eq!(logger.count_containing("generated shipment 2 "), 1);
    }

    #[test]
    fn test_size_draw_is_capped_by_remaining_capacity() {
        let registry = Arc::new(StationRegistry::new(vec![3, 3]));
        let mut generator = generator_with_seed(&registry, 5, Arc::new(NoOpLogger));

        generator.produce();

        for station in registry.stations() {
            while let Some(shipment) = station.take_shipment_at_most(u32::MAX) {
                assert!(shipment.size <= 3);
            }
        }
    }

    #[test]
    fn test_run_exits_when_already_cancelled() {
        let registry = Arc::new(StationRegistry::new(vec![10, 10]));
        let generator = generator_with_seed(&registry, 6, Arc::new(NoOpLogger));
        let shutdown = ShutdownToken::new();
        shutdown.cancel();

        generator.run(shutdown);

        let total: usize = registry.stations().map(|s| s.pending_count()).sum();
        assert_eq!(total, 0);
    }
}
