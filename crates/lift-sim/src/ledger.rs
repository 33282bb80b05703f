//! `PenaltyLedger` — scores each delivered passenger exactly once.

use std::collections::BTreeSet;

use lift_core::{FloorId, PassengerId};
use lift_passenger::{Passenger, Priority};

/// One scored delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRecord {
    pub passenger:    PassengerId,
    pub priority:     Priority,
    pub spawn_floor:  FloorId,
    pub target_floor: FloorId,
    pub request:      f64,
    pub assignment:   f64,
    pub delivery:     f64,
    pub penalty:      f64,
}

#[derive(Debug, Default)]
pub struct PenaltyLedger {
    total:   f64,
    scored:  BTreeSet<PassengerId>,
    records: Vec<DeliveryRecord>,
}

impl PenaltyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `passenger` if it is delivered and not yet scored.
    ///
    /// Returns the penalty added, or `None` when nothing was added.
    pub fn record(&mut self, passenger: &Passenger) -> Option<f64> {
        let penalty = passenger.final_penalty()?;
        if !self.scored.insert(passenger.id()) {
            return None;
        }
        let times = passenger.times();
        self.total += penalty;
        self.records.push(DeliveryRecord {
            passenger:    passenger.id(),
            priority:     passenger.priority(),
            spawn_floor:  passenger.spawn_floor(),
            target_floor: passenger.target_floor(),
            request:      times.request,
            assignment:   times.assignment.unwrap_or(times.request),
            delivery:     times.delivery.unwrap_or(times.request),
            penalty,
        });
        Some(penalty)
    }

    #[inline] pub fn total(&self) -> f64 { self.total }
    #[inline] pub fn delivered(&self) -> usize { self.records.len() }
    #[inline] pub fn records(&self) -> &[DeliveryRecord] { &self.records }

    pub fn is_scored(&self, id: PassengerId) -> bool {
        self.scored.contains(&id)
    }

    /// Mean penalty per delivery, `0.0` before the first one.
    pub fn mean(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.total / self.records.len() as f64
        }
    }
}
