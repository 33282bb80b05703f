//! CSV level loader.
//!
//! # Directory layout
//!
//! A level is a directory under the levels root holding two files:
//!
//! ```text
//! levels/
//!   level_1/
//!     customer_spawns.csv
//!     spawn_locations.csv
//! ```
//!
//! # `customer_spawns.csv`
//!
//! ```csv
//! Timestamp,SpawnLocation,Priority,TargetFloor
//! 0.0,0-1,LOW,3
//! 4.5,2-1,HIGH,0
//! ```
//!
//! **`Priority`** field (case-insensitive):
//!
//! | Value    | Meaning            |
//! |----------|--------------------|
//! | `HIGH`   | `Priority::High`   |
//! | `LOW`    | `Priority::Normal` |
//! | `NORMAL` | `Priority::Normal` |
//!
//! # `spawn_locations.csv`
//!
//! ```csv
//! Floor,X
//! 0,120
//! 0,600
//! 2,400
//! ```
//!
//! Locations are named `"<floor>-<n>"` in ascending `X` order per floor.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use lift_core::{FloorId, SpawnPointId};
use lift_passenger::Priority;

use crate::level::{DEFAULT_FLOOR_COUNT, LevelData, SpawnEvent, SpawnPoint};
use crate::{ScheduleError, ScheduleResult};

pub const SPAWN_EVENTS_FILE: &str = "customer_spawns.csv";
pub const SPAWN_POINTS_FILE: &str = "spawn_locations.csv";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SpawnEventRecord {
    #[serde(rename = "Timestamp")]
    timestamp:      f64,
    #[serde(rename = "SpawnLocation")]
    spawn_location: String,
    #[serde(rename = "Priority")]
    priority:       String,
    #[serde(rename = "TargetFloor")]
    target_floor:   u32,
}

#[derive(Deserialize)]
struct SpawnPointRecord {
    #[serde(rename = "Floor")]
    floor: u32,
    #[serde(rename = "X")]
    x:     f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load spawn events from a `customer_spawns.csv` file.
pub fn load_spawn_events_csv(path: &Path) -> ScheduleResult<Vec<SpawnEvent>> {
    let file = open(path)?;
    load_spawn_events_reader(file)
}

/// Like [`load_spawn_events_csv`] but accepts any `Read` source.
pub fn load_spawn_events_reader<R: Read>(reader: R) -> ScheduleResult<Vec<SpawnEvent>> {
    let mut csv_reader = csv_reader(reader);
    let mut events = Vec::new();

    for (line, result) in csv_reader.deserialize::<SpawnEventRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if !row.timestamp.is_finite() || row.timestamp < 0.0 {
            return Err(ScheduleError::Parse(format!(
                "row {}: timestamp {} must be a non-negative number of seconds",
                line + 1,
                row.timestamp
            )));
        }
        events.push(SpawnEvent {
            timestamp:    row.timestamp,
            spawn_point:  row.spawn_location.parse::<SpawnPointId>()?,
            priority:     parse_priority(&row.priority)?,
            target_floor: FloorId(row.target_floor),
        });
    }
    Ok(events)
}

/// Load and name spawn locations from a `spawn_locations.csv` file.
pub fn load_spawn_points_csv(path: &Path) -> ScheduleResult<Vec<SpawnPoint>> {
    let file = open(path)?;
    load_spawn_points_reader(file)
}

/// Like [`load_spawn_points_csv`] but accepts any `Read` source.
pub fn load_spawn_points_reader<R: Read>(reader: R) -> ScheduleResult<Vec<SpawnPoint>> {
    let mut csv_reader = csv_reader(reader);
    let mut locations = Vec::new();
    for result in csv_reader.deserialize::<SpawnPointRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        locations.push((FloorId(row.floor), row.x));
    }
    Ok(SpawnPoint::numbered(locations))
}

pub fn parse_priority(s: &str) -> ScheduleResult<Priority> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("high") {
        Ok(Priority::High)
    } else if s.eq_ignore_ascii_case("low") || s.eq_ignore_ascii_case("normal") {
        Ok(Priority::Normal)
    } else {
        Err(ScheduleError::Parse(format!(
            "invalid priority {s:?}: expected \"HIGH\", \"LOW\", or \"NORMAL\""
        )))
    }
}

// ── LevelLoader ───────────────────────────────────────────────────────────────

/// Finds levels by name under a root directory.
#[derive(Debug, Clone)]
pub struct LevelLoader {
    root:        PathBuf,
    floor_count: u32,
}

impl LevelLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), floor_count: DEFAULT_FLOOR_COUNT }
    }

    pub fn with_floor_count(mut self, floor_count: u32) -> Self {
        self.floor_count = floor_count;
        self
    }

    pub fn level_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// `true` if both level files exist.
    pub fn level_exists(&self, name: &str) -> bool {
        let dir = self.level_dir(name);
        dir.join(SPAWN_EVENTS_FILE).is_file() && dir.join(SPAWN_POINTS_FILE).is_file()
    }

    /// Load and validate the level called `name`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::MissingFile`] naming the first absent file, or any
    /// parse/validation error from the two CSVs.
    pub fn load(&self, name: &str) -> ScheduleResult<LevelData> {
        let dir = self.level_dir(name);
        let events_path = dir.join(SPAWN_EVENTS_FILE);
        let points_path = dir.join(SPAWN_POINTS_FILE);
        for path in [&events_path, &points_path] {
            if !path.is_file() {
                return Err(ScheduleError::MissingFile { path: path.clone() });
            }
        }

        let spawn_points = load_spawn_points_csv(&points_path)?;
        let events = load_spawn_events_csv(&events_path)?;
        debug!(level = name, points = spawn_points.len(), events = events.len(), "level files parsed");

        let level = LevelData::new(self.floor_count, spawn_points, events)?;
        info!(level = name, floors = level.floor_count(), events = level.events().len(), "level loaded");
        Ok(level)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open(path: &Path) -> ScheduleResult<std::fs::File> {
    std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScheduleError::MissingFile { path: path.to_path_buf() },
        _ => ScheduleError::Io(e),
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}
