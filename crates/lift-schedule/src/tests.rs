//! Unit tests for lift-schedule.

use std::io::Cursor;

use lift_core::{FloorId, SimRng, SpawnPointId};
use lift_passenger::{PassengerState, Priority};

use crate::{
    LevelData, LevelLoader, PassengerFactory, RandomSpawner, ScheduleError, SpawnEvent,
    SpawnPoint, SpawnQueue, load_spawn_events_reader, load_spawn_points_reader, parse_priority,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sp(floor: u32, ordinal: u16) -> SpawnPointId {
    SpawnPointId::new(FloorId(floor), ordinal)
}

fn event(timestamp: f64, floor: u32, ordinal: u16, target: u32) -> SpawnEvent {
    SpawnEvent {
        timestamp,
        spawn_point:  sp(floor, ordinal),
        priority:     Priority::Normal,
        target_floor: FloorId(target),
    }
}

const SPAWNS: &str = "\
Timestamp,SpawnLocation,Priority,TargetFloor
0.0,0-1,LOW,3
4.5,2-1,HIGH,0
2.0,0-2,normal,4
";

const LOCATIONS: &str = "\
Floor,X
0,600
0,120
2,400
";

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    #[test]
    fn parses_spawn_events() {
        let events = load_spawn_events_reader(Cursor::new(SPAWNS)).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], event(0.0, 0, 1, 3));
        assert_eq!(events[1].priority, Priority::High);
        assert_eq!(events[1].spawn_point, sp(2, 1));
        assert_eq!(events[2].priority, Priority::Normal);
        assert_eq!(events[2].target_floor, FloorId(4));
    }

    #[test]
    fn spawn_points_are_numbered_by_x() {
        let points = load_spawn_points_reader(Cursor::new(LOCATIONS)).unwrap();
        assert_eq!(points, vec![
            SpawnPoint { id: sp(0, 1), x: 120.0 },
            SpawnPoint { id: sp(0, 2), x: 600.0 },
            SpawnPoint { id: sp(2, 1), x: 400.0 },
        ]);
    }

    #[test]
    fn priority_is_case_insensitive() {
        assert_eq!(parse_priority("HIGH").unwrap(), Priority::High);
        assert_eq!(parse_priority(" high ").unwrap(), Priority::High);
        assert_eq!(parse_priority("Low").unwrap(), Priority::Normal);
        assert_eq!(parse_priority("NORMAL").unwrap(), Priority::Normal);
        assert!(matches!(parse_priority("urgent"), Err(ScheduleError::Parse(_))));
    }

    #[test]
    fn malformed_rows_are_errors() {
        let bad_location = "Timestamp,SpawnLocation,Priority,TargetFloor\n1.0,lobby,LOW,2\n";
        assert!(load_spawn_events_reader(Cursor::new(bad_location)).is_err());

        let bad_priority = "Timestamp,SpawnLocation,Priority,TargetFloor\n1.0,0-1,VIP,2\n";
        assert!(load_spawn_events_reader(Cursor::new(bad_priority)).is_err());

        let negative = "Timestamp,SpawnLocation,Priority,TargetFloor\n-1.0,0-1,LOW,2\n";
        assert!(load_spawn_events_reader(Cursor::new(negative)).is_err());

        let missing_column = "Floor\n0\n";
        assert!(load_spawn_points_reader(Cursor::new(missing_column)).is_err());
    }

    #[test]
    fn level_loader_reads_a_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("level_1");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("customer_spawns.csv"), SPAWNS).unwrap();
        std::fs::write(dir.join("spawn_locations.csv"), LOCATIONS).unwrap();

        let loader = LevelLoader::new(root.path());
        assert!(loader.level_exists("level_1"));
        assert!(!loader.level_exists("level_2"));

        let level = loader.load("level_1").unwrap();
        assert_eq!(level.floor_count(), 5);
        assert_eq!(level.events().len(), 3);
        assert_eq!(level.spawn_point(sp(0, 2)).map(|p| p.x), Some(600.0));
    }

    #[test]
    fn missing_file_names_the_path() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("half");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("customer_spawns.csv"), SPAWNS).unwrap();

        let loader = LevelLoader::new(root.path());
        assert!(!loader.level_exists("half"));
        match loader.load("half") {
            Err(ScheduleError::MissingFile { path }) => {
                assert!(path.ends_with("half/spawn_locations.csv"));
            }
            other => panic!("expected MissingFile, got {other:?}"),
        }
    }
}

// ── Level validation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod level {
    use super::*;

    fn points() -> Vec<SpawnPoint> {
        SpawnPoint::numbered([(FloorId(0), 100.0), (FloorId(3), 500.0)])
    }

    #[test]
    fn valid_level() {
        let level = LevelData::new(5, points(), vec![event(1.0, 0, 1, 4), event(2.0, 3, 1, 0)]).unwrap();
        assert_eq!(level.spawn_points_on(FloorId(3)).count(), 1);
        assert_eq!(level.spawn_points_on(FloorId(1)).count(), 0);
    }

    #[test]
    fn unknown_spawn_point() {
        let err = LevelData::new(5, points(), vec![event(1.0, 0, 2, 4)]).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownSpawnPoint(id) if id == sp(0, 2)));
    }

    #[test]
    fn target_out_of_range() {
        let err = LevelData::new(5, points(), vec![event(1.0, 0, 1, 5)]).unwrap_err();
        assert!(matches!(err, ScheduleError::TargetOutOfRange { floor_count: 5, .. }));
    }

    #[test]
    fn target_is_spawn_floor() {
        let err = LevelData::new(5, points(), vec![event(1.0, 3, 1, 3)]).unwrap_err();
        assert!(matches!(err, ScheduleError::TargetIsSpawnFloor { .. }));
    }

    #[test]
    fn spawn_point_above_top_floor() {
        let pts = SpawnPoint::numbered([(FloorId(7), 100.0)]);
        assert!(matches!(LevelData::new(5, pts, vec![]), Err(ScheduleError::Core(_))));
    }

    #[test]
    fn single_floor_is_rejected() {
        assert!(LevelData::new(1, vec![], vec![]).is_err());
    }
}

// ── Spawn queue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawn_queue {
    use super::*;

    #[test]
    fn pop_due_returns_everything_up_to_now() {
        let mut q = SpawnQueue::from_events([
            event(5.0, 0, 1, 2),
            event(1.0, 0, 1, 3),
            event(3.0, 0, 1, 4),
        ]);
        assert_eq!(q.remaining(), 3);
        assert_eq!(q.next_due(), Some(1.0));

        assert!(q.pop_due(sp(0, 1), 0.5).is_empty());
        let due = q.pop_due(sp(0, 1), 3.0);
        assert_eq!(due.iter().map(|e| e.timestamp).collect::<Vec<_>>(), vec![1.0, 3.0]);
        assert_eq!(q.remaining(), 1);
        assert_eq!(q.pop_due(sp(0, 1), 5.0).len(), 1);
        assert!(q.is_empty());
        assert_eq!(q.next_due(), None);
    }

    #[test]
    fn equal_timestamps_keep_file_order() {
        let mut q = SpawnQueue::from_events([event(2.0, 1, 1, 3), event(2.0, 1, 1, 0)]);
        q.push(event(2.0, 1, 1, 4));
        let targets: Vec<u32> = q.pop_due(sp(1, 1), 2.0).iter().map(|e| e.target_floor.0).collect();
        assert_eq!(targets, vec![3, 0, 4]);
    }

    #[test]
    fn drain_due_walks_locations_in_order() {
        let mut q = SpawnQueue::from_events([
            event(1.0, 2, 1, 0),
            event(1.0, 0, 1, 3),
            event(9.0, 1, 1, 2),
        ]);
        let due = q.drain_due(1.0);
        assert_eq!(due.iter().map(|e| e.spawn_point).collect::<Vec<_>>(), vec![sp(0, 1), sp(2, 1)]);
        assert_eq!(q.remaining(), 1);
    }

    #[test]
    fn unknown_location_yields_nothing() {
        let mut q = SpawnQueue::new();
        assert!(q.pop_due(sp(4, 1), 100.0).is_empty());
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod factory {
    use super::*;

    #[test]
    fn ids_are_sequential_and_request_time_is_now() {
        let mut f = PassengerFactory::new(7);
        let a = f.build(&event(1.0, 0, 1, 3), 120.0, 1.25).unwrap();
        let b = f.build(&event(1.0, 2, 1, 0), 400.0, 1.25).unwrap();
        assert_eq!(a.id().0 + 1, b.id().0);
        assert_eq!(f.spawned(), 2);
        assert_eq!(a.times().request, 1.25);
        assert_eq!(a.state(), PassengerState::AwaitingSelection);
        assert_eq!(a.x(), 120.0);
        assert_eq!(b.current_floor(), FloorId(2));
    }

    #[test]
    fn appearance_is_deterministic_and_in_range() {
        let mut f1 = PassengerFactory::new(99);
        let mut f2 = PassengerFactory::new(99);
        for _ in 0..50 {
            let a = f1.build(&event(0.0, 0, 1, 1), 100.0, 0.0).unwrap();
            let b = f2.build(&event(0.0, 0, 1, 1), 100.0, 0.0).unwrap();
            assert_eq!(a.appearance(), b.appearance());
            assert!(a.appearance().color.iter().all(|c| (50..=200).contains(c)));
            assert!((-5..=9).contains(&a.appearance().popup_offset_y));
        }
    }

    #[test]
    fn failed_build_does_not_consume_an_id() {
        let mut f = PassengerFactory::new(1);
        assert!(f.build(&event(0.0, 2, 1, 2), 0.0, 0.0).is_err());
        assert_eq!(f.spawned(), 0);
    }
}

// ── Random spawner ────────────────────────────────────────────────────────────

#[cfg(test)]
mod random {
    use super::*;

    #[test]
    fn default_start_is_floor_times_a_minute() {
        let s = RandomSpawner::new(sp(2, 1), 300.0, 5).unwrap();
        assert_eq!(s.expected_by(119.9), 0);
        assert_eq!(s.expected_by(120.0), 1);
        assert_eq!(s.expected_by(179.9), 1);
        assert_eq!(s.expected_by(180.0), 2);
    }

    #[test]
    fn catches_up_on_missed_spawns() {
        let mut rng = SimRng::new(3);
        let mut s = RandomSpawner::new(sp(0, 1), 100.0, 5)
            .unwrap()
            .with_interval(10.0)
            .unwrap();
        assert_eq!(s.due(0.0, &mut rng).len(), 1);
        assert!(s.due(9.0, &mut rng).is_empty());
        let burst = s.due(35.0, &mut rng);
        assert_eq!(burst.len(), 3);
        assert!(burst.iter().all(|e| e.timestamp == 35.0));
        assert_eq!(s.spawned(), 4);
    }

    #[test]
    fn targets_never_the_own_floor() {
        let mut rng = SimRng::new(11);
        let mut s = RandomSpawner::new(sp(3, 1), 100.0, 5)
            .unwrap()
            .with_start(0.0)
            .with_interval(1.0)
            .unwrap();
        let events = s.due(500.0, &mut rng);
        assert_eq!(events.len(), 501);
        assert!(events.iter().all(|e| e.target_floor != FloorId(3) && e.target_floor.0 < 5));
        // Every other floor shows up eventually.
        for f in [0, 1, 2, 4] {
            assert!(events.iter().any(|e| e.target_floor == FloorId(f)));
        }
    }

    #[test]
    fn priority_probability_extremes() {
        let mut rng = SimRng::new(5);
        let mut all_high = RandomSpawner::new(sp(0, 1), 0.0, 3)
            .unwrap()
            .with_interval(1.0)
            .unwrap()
            .with_high_priority_prob(1.0);
        assert!(all_high.due(20.0, &mut rng).iter().all(|e| e.priority == Priority::High));

        let mut none_high = RandomSpawner::new(sp(0, 1), 0.0, 3)
            .unwrap()
            .with_interval(1.0)
            .unwrap()
            .with_high_priority_prob(0.0);
        assert!(none_high.due(20.0, &mut rng).iter().all(|e| e.priority == Priority::Normal));
    }

    #[test]
    fn invalid_configurations() {
        assert!(RandomSpawner::new(sp(0, 1), 0.0, 1).is_err());
        assert!(RandomSpawner::new(sp(6, 1), 0.0, 5).is_err());
        let s = RandomSpawner::new(sp(0, 1), 0.0, 5).unwrap();
        assert!(s.with_interval(0.0).is_err());
    }

    #[test]
    fn same_seed_same_stream() {
        let run = |seed| {
            let mut rng = SimRng::new(seed);
            let mut s = RandomSpawner::new(sp(1, 1), 0.0, 6)
                .unwrap()
                .with_start(0.0)
                .with_interval(2.0)
                .unwrap();
            s.due(100.0, &mut rng)
        };
        assert_eq!(run(42), run(42));
    }
}
