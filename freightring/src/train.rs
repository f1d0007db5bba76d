//! Train lifecycle state machine.
//!
//! Each train runs as an independent thread cycling through unload, load,
//! departure, transit and arrival. Trains coordinate with each other only
//! through the per-station track gates, and with the generator only
//! through the per-station shipment queues; there is no central
//! scheduler.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::log::Logger;
use crate::registry::StationRegistry;
use crate::shipment::{Shipment, StationId};
use crate::shutdown::ShutdownToken;
use crate::{log_debug, log_info};

/// Where a train currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainState {
    /// Stopped at its current station, handling cargo.
    AtStation,
    /// Occupying the segment toward the next station.
    InTransit,
}

/// Fixed per-train delays.
#[derive(Debug, Clone, Copy)]
pub struct TrainTimings {
    /// Applied once on departure and once on arrival, every hop, so a
    /// full hop takes two travel delays end to end.
    pub travel: Duration,
    /// Per size unit while loading.
    pub loading: Duration,
    /// Per size unit while unloading.
    pub unloading: Duration,
}

/// A freight train on the ring.
///
/// The train owns all of its state; no other component mutates it. The
/// invariant `capacity_left + Σ size(carried)` stays constant between
/// load and unload events, and a shipment is loaded only when its size
/// fits `capacity_left` at that instant.
///
/// The phase methods ([`unload`], [`load`], [`depart`], [`arrive`]) are
/// public so tests can drive single transitions deterministically;
/// [`run`] strings them together for the simulation threads.
///
/// [`unload`]: Train::unload
/// [`load`]: Train::load
/// [`depart`]: Train::depart
/// [`arrive`]: Train::arrive
/// [`run`]: Train::run
pub struct Train {
    id: u32,
    timings: TrainTimings,
    capacity_left: u32,
    carried: HashMap<StationId, Vec<Shipment>>,
    current_station: StationId,
    state: TrainState,
    registry: Arc<StationRegistry>,
    logger: Arc<dyn Logger>,
}

impl Train {
    /// Creates a train parked at `start_station` with an empty hold.
    pub fn new(
        id: u32,
        capacity: u32,
        start_station: StationId,
        timings: TrainTimings,
        registry: Arc<StationRegistry>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            id,
            timings,
            capacity_left: capacity,
            carried: HashMap::new(),
            current_station: start_station,
            state: TrainState::AtStation,
            registry,
            logger,
        }
    }

    /// This train's id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrainState {
        self.state
    }

    /// Ring index of the station the train is at or has last departed.
    pub fn current_station(&self) -> StationId {
        self.current_station
    }

    /// Remaining carrying capacity.
    pub fn capacity_left(&self) -> u32 {
        self.capacity_left
    }

    /// Total number of shipments on board.
    pub fn carried_count(&self) -> usize {
        self.carried.values().map(Vec::len).sum()
    }

    /// True if the shipment with the given id is on board.
    pub fn is_carrying(&self, shipment_id: u64) -> bool {
        self.carried
            .values()
            .flatten()
            .any(|shipment| shipment.id == shipment_id)
    }

    fn describe(&self) -> String {
        format!("train {} (capacity left {})", self.id, self.capacity_left)
    }

    /// Unload phase: deliver every carried shipment destined for the
    /// current station.
    ///
    /// Each delivery restores the shipment's size to `capacity_left` and
    /// holds the train for `size × unloading` of simulated work. The
    /// order among same-destination shipments is unspecified. Delivered
    /// shipments are consumed; they never re-enter a station queue.
    pub fn unload(&mut self) {
        let Some(deliveries) = self.carried.remove(&self.current_station) else {
            return;
        };
        for shipment in deliveries {
            log_info!(
                self.logger,
                "{} unloading shipment {} of size {} at station {}",
                self.describe(),
                shipment.id,
                shipment.size,
                self.current_station
            );
            self.capacity_left += shipment.size;
            thread::sleep(self.timings.unloading * shipment.size);
            log_info!(
                self.logger,
                "{} unloaded shipment {} of size {} at station {}",
                self.describe(),
                shipment.id,
                shipment.size,
                self.current_station
            );
        }
    }

    /// Load phase: take every feasible shipment from the current
    /// station, smallest first.
    ///
    /// Stops when the station reports nothing fits the remaining
    /// capacity. Each pickup holds the train for `size × loading` of
    /// simulated work.
    pub fn load(&mut self) {
        let station = self.registry.station(self.current_station);
        while let Some(shipment) = station.take_shipment_at_most(self.capacity_left) {
            log_info!(
                self.logger,
                "{} loading shipment {} of size {}",
                self.describe(),
                shipment.id,
                shipment.size
            );
            self.capacity_left -= shipment.size;
            let wait = self.timings.loading * shipment.size;
            let destination = shipment.destination;
            let shipment_id = shipment.id;
            self.carried.entry(destination).or_default().push(shipment);
            thread::sleep(wait);
            log_info!(
                self.logger,
                "{} loaded shipment {} for station {}",
                self.describe(),
                shipment_id,
                destination
            );
        }
        log_info!(
            self.logger,
            "{} found no more shipments at station {}",
            self.describe(),
            self.current_station
        );
    }

    /// Departure: block until the outgoing segment is free, then occupy
    /// it and enter transit.
    pub fn depart(&mut self) {
        let station = self.registry.station(self.current_station);
        log_info!(
            self.logger,
            "{} waiting to depart station {}",
            self.describe(),
            self.current_station
        );
        station.wait_for_segment();
        log_info!(
            self.logger,
            "{} departing station {} for station {}",
            self.describe(),
            self.current_station,
            self.registry.next_of(self.current_station)
        );
        self.state = TrainState::InTransit;
    }

    /// Arrival: advance to the next station and free the segment just
    /// vacated, waking a train waiting to enter it.
    pub fn arrive(&mut self) {
        self.current_station = self.registry.next_of(self.current_station);
        let previous = self.registry.previous_of(self.current_station);
        self.registry.station(previous).free_segment();
        log_info!(
            self.logger,
            "{} arrived at station {}",
            self.describe(),
            self.current_station
        );
        self.state = TrainState::AtStation;
    }

    /// Runs the lifecycle until `shutdown` is observed.
    ///
    /// The token is polled only at the top of each iteration: a train
    /// blocked in a gate wait or sleeping through a travel delay finishes
    /// that call first, and a train cancelled between departure and
    /// arrival exits still holding its segment permit. Both are accepted
    /// liveness properties of the protocol.
    pub fn run(mut self, shutdown: ShutdownToken) {
        while !shutdown.is_cancelled() {
            match self.state {
                TrainState::AtStation => {
                    self.unload();
                    self.load();
                    self.depart();
                    thread::sleep(self.timings.travel);
                }
                TrainState::InTransit => {
                    self.arrive();
                    thread::sleep(self.timings.travel);
                }
            }
        }
        log_debug!(self.logger, "train {} observed shutdown, stopping", self.id);
    }
}
