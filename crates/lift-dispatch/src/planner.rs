//! Stop selection and look-ahead.
//!
//! [`find_best_stop`] is a pure function of a car's dispatch-relevant state.
//! The same rule drives the live car (only the head of the sequence matters
//! there) and the look-ahead simulation in
//! [`DispatchSnapshot::target_sequence`].

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use lift_core::{Direction, FloorId};

/// A copy of the state the stop-selection rule reads.
///
/// `waiting` maps each pickup floor to the target floors of the passengers
/// registered there.  `requests` lists pickup floors in first-request order,
/// each at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSnapshot {
    pub floor:      FloorId,
    pub direction:  Direction,
    pub deliveries: BTreeSet<FloorId>,
    pub waiting:    BTreeMap<FloorId, Vec<FloorId>>,
    pub requests:   VecDeque<FloorId>,
}

impl DispatchSnapshot {
    pub fn find_best_stop(&self) -> Option<FloorId> {
        find_best_stop(
            self.floor,
            self.direction,
            &self.deliveries,
            &self.waiting,
            &self.requests,
        )
    }

    /// Replay the stop rule until nothing is left to serve, producing at most
    /// `max_stops` floors.
    ///
    /// Each visited stop delivers the passengers bound there, picks up the
    /// passengers registered there (all of them when the simulated car is
    /// empty, otherwise only those heading the way the car is travelling) and
    /// retires the floor from the request queue.  Consecutive stops always
    /// differ and the first stop is never the snapshot's own floor.
    pub fn target_sequence(&self, max_stops: usize) -> Vec<FloorId> {
        let mut sim = self.clone();
        let mut sequence = Vec::new();

        while sequence.len() < max_stops && sim.has_work() {
            let Some(stop) = sim.find_best_stop() else { break };
            sim.visit(stop);
            sequence.push(stop);
        }
        sequence
    }

    fn has_work(&self) -> bool {
        !self.deliveries.is_empty() || !self.requests.is_empty()
    }

    fn visit(&mut self, stop: FloorId) {
        if let Some(direction) = Direction::between(self.floor, stop) {
            self.direction = direction;
        }
        self.floor = stop;
        self.deliveries.remove(&stop);

        if let Some(targets) = self.waiting.remove(&stop) {
            let car_empty = self.deliveries.is_empty();
            let direction = self.direction;
            self.deliveries.extend(
                targets
                    .into_iter()
                    .filter(|&t| car_empty || direction.is_ahead(stop, t)),
            );
        }
        self.requests.retain(|&f| f != stop);
    }
}

/// Pick the car's next stop.
///
/// With nothing on board the car serves pickups in request order, skipping
/// its own floor.  Otherwise it keeps going the way it is heading: the
/// candidates are the delivery floors ahead plus the pickup floors ahead, up
/// to the farthest delivery, that hold someone travelling the same way.  The
/// nearest candidate wins.  With no delivery ahead the same rule is applied
/// in the opposite direction.
pub fn find_best_stop(
    floor:      FloorId,
    direction:  Direction,
    deliveries: &BTreeSet<FloorId>,
    waiting:    &BTreeMap<FloorId, Vec<FloorId>>,
    requests:   &VecDeque<FloorId>,
) -> Option<FloorId> {
    if deliveries.is_empty() {
        return requests.iter().copied().find(|&f| f != floor);
    }
    scan(floor, direction, deliveries, waiting)
        .or_else(|| scan(floor, direction.reversed(), deliveries, waiting))
}

fn scan(
    floor:      FloorId,
    direction:  Direction,
    deliveries: &BTreeSet<FloorId>,
    waiting:    &BTreeMap<FloorId, Vec<FloorId>>,
) -> Option<FloorId> {
    let ahead = deliveries
        .iter()
        .copied()
        .filter(|&f| direction.is_ahead(floor, f));
    let limit = ahead.clone().max_by_key(|f| f.distance(floor))?;

    let pickups = waiting
        .iter()
        .filter(|&(&f, targets)| {
            direction.is_ahead(floor, f)
                && !direction.is_ahead(limit, f)
                && targets.iter().any(|&t| direction.is_ahead(f, t))
        })
        .map(|(&f, _)| f);

    ahead.chain(pickups).min_by_key(|f| f.distance(floor))
}
