//! Validated level data: spawn locations and spawn events.

use std::collections::BTreeMap;

use lift_core::{FloorId, LiftError, SpawnPointId};
use lift_passenger::Priority;

use crate::{ScheduleError, ScheduleResult};

/// Floor count assumed when a level does not say otherwise.
pub const DEFAULT_FLOOR_COUNT: u32 = 5;

/// One scheduled passenger appearance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEvent {
    /// Seconds from level start.
    pub timestamp:    f64,
    pub spawn_point:  SpawnPointId,
    pub priority:     Priority,
    pub target_floor: FloorId,
}

impl SpawnEvent {
    #[inline]
    pub fn spawn_floor(&self) -> FloorId {
        self.spawn_point.floor
    }
}

/// A named spawn location on a floor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnPoint {
    pub id: SpawnPointId,
    pub x:  f32,
}

impl SpawnPoint {
    /// Name raw `(floor, x)` locations: per floor, sorted by `x`, ordinals
    /// starting at 1.
    pub fn numbered(locations: impl IntoIterator<Item = (FloorId, f32)>) -> Vec<SpawnPoint> {
        let mut by_floor: BTreeMap<FloorId, Vec<f32>> = BTreeMap::new();
        for (floor, x) in locations {
            by_floor.entry(floor).or_default().push(x);
        }

        let mut points = Vec::new();
        for (floor, mut xs) in by_floor {
            xs.sort_by(f32::total_cmp);
            points.extend(xs.into_iter().enumerate().map(|(i, x)| SpawnPoint {
                id: SpawnPointId::new(floor, (i + 1) as u16),
                x,
            }));
        }
        points
    }
}

/// A complete, validated level.
///
/// Construction checks every event against the spawn locations and the
/// floor count, so consumers never see a dangling location or an
/// out-of-range target.
#[derive(Debug, Clone)]
pub struct LevelData {
    floor_count:  u32,
    spawn_points: Vec<SpawnPoint>,
    events:       Vec<SpawnEvent>,
}

impl LevelData {
    pub fn new(
        floor_count:  u32,
        spawn_points: Vec<SpawnPoint>,
        events:       Vec<SpawnEvent>,
    ) -> ScheduleResult<Self> {
        if floor_count < 2 {
            return Err(LiftError::Config(format!("a level needs at least 2 floors, got {floor_count}")).into());
        }
        let mut spawn_points = spawn_points;
        spawn_points.sort_by_key(|p| p.id);
        for point in &spawn_points {
            point.id.floor.ensure_within(floor_count)?;
        }
        if let Some(w) = spawn_points.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(ScheduleError::Parse(format!("duplicate spawn location {}", w[0].id)));
        }

        for event in &events {
            if spawn_points.binary_search_by_key(&event.spawn_point, |p| p.id).is_err() {
                return Err(ScheduleError::UnknownSpawnPoint(event.spawn_point));
            }
            if event.target_floor.0 >= floor_count {
                return Err(ScheduleError::TargetOutOfRange {
                    spawn_point: event.spawn_point,
                    target:      event.target_floor,
                    floor_count,
                });
            }
            if event.target_floor == event.spawn_floor() {
                return Err(ScheduleError::TargetIsSpawnFloor { spawn_point: event.spawn_point });
            }
        }

        Ok(Self { floor_count, spawn_points, events })
    }

    #[inline] pub fn floor_count(&self) -> u32 { self.floor_count }
    #[inline] pub fn spawn_points(&self) -> &[SpawnPoint] { &self.spawn_points }
    #[inline] pub fn events(&self) -> &[SpawnEvent] { &self.events }

    pub fn spawn_point(&self, id: SpawnPointId) -> Option<&SpawnPoint> {
        self.spawn_points
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.spawn_points[i])
    }

    /// Spawn locations on `floor`, in ordinal order.
    pub fn spawn_points_on(&self, floor: FloorId) -> impl Iterator<Item = &SpawnPoint> {
        self.spawn_points.iter().filter(move |p| p.id.floor == floor)
    }

    /// Split into the pieces the simulation consumes.
    pub fn into_parts(self) -> (u32, Vec<SpawnPoint>, Vec<SpawnEvent>) {
        (self.floor_count, self.spawn_points, self.events)
    }
}
