//! `PassengerFactory` — turns due spawn events into passengers.

use lift_core::{PassengerId, PassengerRng};
use lift_passenger::{Appearance, Passenger, PassengerResult, PassengerSpec};
use tracing::debug;

use crate::SpawnEvent;

/// Hands out sequential ids and draws cosmetic attributes.
///
/// Attributes come from a [`PassengerRng`] keyed by the run seed and the new
/// id, so a passenger looks the same no matter which other passengers spawn
/// in the same tick.
#[derive(Debug, Clone)]
pub struct PassengerFactory {
    seed:    u64,
    next_id: u32,
}

impl PassengerFactory {
    pub fn new(seed: u64) -> Self {
        Self { seed, next_id: 0 }
    }

    /// Passengers built so far.
    #[inline]
    pub fn spawned(&self) -> u32 {
        self.next_id
    }

    /// Build the passenger for `event`, standing at `spawn_x`, requesting
    /// service at `now`.
    pub fn build(&mut self, event: &SpawnEvent, spawn_x: f32, now: f64) -> PassengerResult<Passenger> {
        let id = PassengerId(self.next_id);
        let mut rng = PassengerRng::new(self.seed, id);
        let appearance = Appearance {
            color:          [rng.gen_range(50..=200), rng.gen_range(50..=200), rng.gen_range(50..=200)],
            popup_offset_y: rng.gen_range(-5..=9),
        };

        let passenger = Passenger::new(PassengerSpec {
            id,
            spawn_floor:  event.spawn_floor(),
            spawn_x,
            target_floor: event.target_floor,
            priority:     event.priority,
            request_time: now,
            appearance,
            wander_right: rng.gen_bool(0.5),
        })?;
        self.next_id += 1;

        debug!(
            passenger = %id,
            spawn = %event.spawn_point,
            target = %event.target_floor,
            priority = %event.priority,
            now,
            "passenger spawned"
        );
        Ok(passenger)
    }
}
