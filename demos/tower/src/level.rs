//! The embedded demo level and random-mode spawner setup.

use std::io::Cursor;

use lift_schedule::{
    load_spawn_events_reader, load_spawn_points_reader, LevelData, RandomSpawner, ScheduleResult,
};

// Five floors, fifteen passengers over the first half minute.
const DEMO_SPAWN_LOCATIONS: &str = include_str!("../levels/level_1/spawn_locations.csv");
const DEMO_CUSTOMER_SPAWNS: &str = include_str!("../levels/level_1/customer_spawns.csv");

pub const DEMO_LEVEL_NAME: &str = "level_1";

/// The level bundled with the binary.
pub fn demo_level(floor_count: u32) -> ScheduleResult<LevelData> {
    let points = load_spawn_points_reader(Cursor::new(DEMO_SPAWN_LOCATIONS))?;
    let events = load_spawn_events_reader(Cursor::new(DEMO_CUSTOMER_SPAWNS))?;
    LevelData::new(floor_count, points, events)
}

/// Drop a level's scripted events, keeping its floors and spawn locations.
pub fn without_events(level: LevelData) -> ScheduleResult<LevelData> {
    let (floor_count, points, _) = level.into_parts();
    LevelData::new(floor_count, points, Vec::new())
}

/// One interval spawner per spawn location of `level`.
pub fn random_spawners(
    level: &LevelData,
    interval_secs: f64,
    high_priority_prob: f64,
) -> ScheduleResult<Vec<RandomSpawner>> {
    level
        .spawn_points()
        .iter()
        .map(|p| {
            Ok(RandomSpawner::new(p.id, p.x, level.floor_count())?
                .with_interval(interval_secs)?
                .with_high_priority_prob(high_priority_prob))
        })
        .collect()
}
