use std::path::PathBuf;

use lift_core::{FloorId, LiftError, SpawnPointId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("level parse error: {0}")]
    Parse(String),

    #[error("level file not found at {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("spawn event refers to unknown spawn location {0}")]
    UnknownSpawnPoint(SpawnPointId),

    #[error("spawn event at {spawn_point} targets {target}, outside a {floor_count}-floor building")]
    TargetOutOfRange {
        spawn_point: SpawnPointId,
        target:      FloorId,
        floor_count: u32,
    },

    #[error("spawn event at {spawn_point} targets its own floor")]
    TargetIsSpawnFloor { spawn_point: SpawnPointId },

    #[error("invalid spawner: {0}")]
    InvalidSpawner(String),

    #[error(transparent)]
    Core(#[from] LiftError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
