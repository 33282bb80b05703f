//! `lift-schedule` — where and when passengers appear.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`level`]       | `SpawnEvent`, `SpawnPoint`, `LevelData` (validated level)  |
//! | [`loader`]      | CSV loaders, `LevelLoader`                                 |
//! | [`spawn_queue`] | `SpawnQueue` — per-location, timestamp-ordered FIFOs       |
//! | [`factory`]     | `PassengerFactory` — ids and cosmetic attributes           |
//! | [`random`]      | `RandomSpawner` — interval spawning with catch-up          |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Spawn model (summary)
//!
//! A level lists spawn events `(timestamp, location, priority, target)`.
//! Each tick the simulation pops every event whose timestamp has passed and
//! hands it to the [`PassengerFactory`], which stamps `request_time = now`:
//!
//! ```text
//! due(location, now) = { e ∈ queue[location] | e.timestamp ≤ now }
//! ```
//!
//! Levels are validated once at load time, so everything downstream can
//! assume spawn locations exist and target floors are in range.

pub mod error;
pub mod factory;
pub mod level;
pub mod loader;
pub mod random;
pub mod spawn_queue;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use factory::PassengerFactory;
pub use level::{DEFAULT_FLOOR_COUNT, LevelData, SpawnEvent, SpawnPoint};
pub use loader::{
    LevelLoader, load_spawn_events_csv, load_spawn_events_reader, load_spawn_points_csv,
    load_spawn_points_reader, parse_priority,
};
pub use random::RandomSpawner;
pub use spawn_queue::SpawnQueue;
