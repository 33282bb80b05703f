//! `RandomSpawner` — a spawn location that emits a passenger every interval.
//!
//! The spawner counts how many passengers it should have produced by `now`
//! and emits the difference, so a long tick never loses spawns:
//!
//! ```text
//! expected(now) = 0                                     if now < start
//!               = floor((now - start) / interval) + 1   otherwise
//! ```

use lift_core::{FloorId, SimRng, SpawnPointId};
use lift_passenger::Priority;

use crate::{ScheduleError, ScheduleResult, SpawnEvent};

#[derive(Debug, Clone)]
pub struct RandomSpawner {
    spawn_point:        SpawnPointId,
    x:                  f32,
    floor_count:        u32,
    interval_secs:      f64,
    start_secs:         f64,
    high_priority_prob: f64,
    spawned:            u64,
}

impl RandomSpawner {
    /// A spawner with a 60 s interval whose first spawn is at
    /// `floor × 60` seconds, half of its passengers high priority.
    pub fn new(spawn_point: SpawnPointId, x: f32, floor_count: u32) -> ScheduleResult<Self> {
        if floor_count < 2 {
            return Err(ScheduleError::InvalidSpawner(format!(
                "{spawn_point}: needs at least 2 floors to pick a target, got {floor_count}"
            )));
        }
        spawn_point.floor.ensure_within(floor_count)?;
        Ok(Self {
            spawn_point,
            x,
            floor_count,
            interval_secs:      60.0,
            start_secs:         f64::from(spawn_point.floor.0) * 60.0,
            high_priority_prob: 0.5,
            spawned:            0,
        })
    }

    pub fn with_interval(mut self, secs: f64) -> ScheduleResult<Self> {
        if !(secs.is_finite() && secs > 0.0) {
            return Err(ScheduleError::InvalidSpawner(format!(
                "{}: interval must be positive, got {secs}",
                self.spawn_point
            )));
        }
        self.interval_secs = secs;
        Ok(self)
    }

    pub fn with_start(mut self, secs: f64) -> Self {
        self.start_secs = secs.max(0.0);
        self
    }

    pub fn with_high_priority_prob(mut self, p: f64) -> Self {
        self.high_priority_prob = p.clamp(0.0, 1.0);
        self
    }

    #[inline] pub fn spawn_point(&self) -> SpawnPointId { self.spawn_point }
    #[inline] pub fn x(&self) -> f32 { self.x }
    #[inline] pub fn spawned(&self) -> u64 { self.spawned }

    /// Total spawns owed by time `now`.
    pub fn expected_by(&self, now: f64) -> u64 {
        if now < self.start_secs {
            return 0;
        }
        ((now - self.start_secs) / self.interval_secs).floor() as u64 + 1
    }

    /// Emit every spawn owed by `now`, stamped with `now`.
    pub fn due(&mut self, now: f64, rng: &mut SimRng) -> Vec<SpawnEvent> {
        let expected = self.expected_by(now);
        let mut events = Vec::new();
        while self.spawned < expected {
            let target_floor = self.random_target(rng);
            let priority = if rng.gen_bool(self.high_priority_prob) {
                Priority::High
            } else {
                Priority::Normal
            };
            events.push(SpawnEvent {
                timestamp: now,
                spawn_point: self.spawn_point,
                priority,
                target_floor,
            });
            self.spawned += 1;
        }
        events
    }

    /// Uniform over every floor except the spawner's own.
    fn random_target(&self, rng: &mut SimRng) -> FloorId {
        let own = self.spawn_point.floor.0;
        let pick = rng.gen_range(0..self.floor_count - 1);
        FloorId(if pick >= own { pick + 1 } else { pick })
    }
}
