//! Stations and their shipment queues.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::gate::TrackGate;
use crate::shipment::{Shipment, StationId};

/// Pending shipments and remaining intake capacity for one station.
///
/// Kept as a separate type so the locking discipline is explicit: every
/// read or write goes through the owning station's single mutex.
#[derive(Debug)]
struct ShipmentQueue {
    /// Pending shipments keyed by `(size, id)`. Iteration order is size
    /// ascending, id ascending among equal sizes, so the first entry is
    /// always a minimal-size shipment.
    pending: BTreeMap<(u32, u64), Shipment>,
    /// Intake capacity remaining. Decremented by every add, never
    /// replenished by removal.
    capacity_left: u32,
}

impl ShipmentQueue {
    fn new(capacity: u32) -> Self {
        Self {
            pending: BTreeMap::new(),
            capacity_left: capacity,
        }
    }

    fn take_at_most(&mut self, max_size: u32) -> Option<Shipment> {
        let (&key, _) = self.pending.first_key_value()?;
        if key.0 > max_size {
            return None;
        }
        self.pending.remove(&key)
    }

    fn add(&mut self, shipment: Shipment) {
        self.capacity_left -= shipment.size;
        self.pending.insert((shipment.size, shipment.id), shipment);
    }
}

/// A node on the ring: one shipment queue plus the gate for the outgoing
/// track segment.
///
/// The queue is guarded by a single mutex; queue operations are
/// linearizable per station but give no cross-station ordering. The gate
/// is accessed only by trains, pairwise between adjacent stations.
#[derive(Debug)]
pub struct Station {
    id: StationId,
    queue: Mutex<ShipmentQueue>,
    gate: TrackGate,
}

impl Station {
    /// Creates a station with the given intake capacity.
    pub fn new(id: StationId, capacity: u32) -> Self {
        Self {
            id,
            queue: Mutex::new(ShipmentQueue::new(capacity)),
            gate: TrackGate::new(),
        }
    }

    /// This station's ring index.
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Removes and returns the smallest pending shipment if its size is
    /// at most `max_size`.
    ///
    /// The queue is ordered by size ascending, so inspecting only the
    /// minimum decides feasibility for the entire queue: if the smallest
    /// shipment does not fit, nothing does. Among equal-size shipments
    /// the lowest id is taken; callers must rely only on "any shipment of
    /// minimal size may be chosen".
    ///
    /// This is the sole removal path, and it never credits the removed
    /// size back to the station's capacity.
    pub fn take_shipment_at_most(&self, max_size: u32) -> Option<Shipment> {
        self.queue.lock().unwrap().take_at_most(max_size)
    }

    /// Enqueues a shipment and subtracts its size from the remaining
    /// capacity.
    ///
    /// The caller must have checked [`remaining_capacity`] first; the
    /// queue performs no clamping. The generator is the only producer, so
    /// the check-then-add sequence cannot race with another add.
    ///
    /// [`remaining_capacity`]: Station::remaining_capacity
    pub fn add_shipment(&self, shipment: Shipment) {
        self.queue.lock().unwrap().add(shipment);
    }

    /// Snapshot of the remaining intake capacity.
    ///
    /// A heuristic hint for the generator, not a reservation.
    pub fn remaining_capacity(&self) -> u32 {
        self.queue.lock().unwrap().capacity_left
    }

    /// Number of shipments currently pending.
    pub fn pending_count(&self) -> usize {
        self.queue.lock().unwrap().pending.len()
    }

    /// Blocks until the outgoing segment is free, then occupies it.
    pub fn wait_for_segment(&self) {
        self.gate.acquire();
    }

    /// Marks the outgoing segment free, waking one waiting train.
    pub fn free_segment(&self) {
        self.gate.release();
    }

    /// Snapshot of the outgoing gate's permit count.
    pub fn segment_permits(&self) -> u32 {
        self.gate.available()
    }

    /// One-line state description for the trace log.
    pub fn summary(&self) -> String {
        format!(
            "station {} has {} capacity left",
            self.id,
            self.remaining_capacity()
        )
    }
}
