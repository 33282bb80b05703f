//! `GameHistory` — one row per finished run in `game_history.csv`.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use csv::{ReaderBuilder, Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::OutputResult;

pub const HISTORY_FILE: &str = "game_history.csv";

const HEADER: [&str; 3] = ["timestamp_epoch_seconds", "level", "penalty"];

/// The final score of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp_epoch_seconds: i64,
    pub level:                   String,
    pub penalty:                 f64,
}

impl HistoryEntry {
    /// An entry stamped with the current wall-clock time.
    pub fn now(level: impl Into<String>, penalty: f64) -> Self {
        let timestamp_epoch_seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64);
        Self { timestamp_epoch_seconds, level: level.into(), penalty }
    }
}

/// Append-only run history stored as CSV.
#[derive(Debug, Clone)]
pub struct GameHistory {
    path: PathBuf,
}

impl GameHistory {
    /// Open the history file in `dir`, creating it with a header row if it
    /// does not exist yet.
    pub fn open(dir: &Path) -> OutputResult<Self> {
        let path = dir.join(HISTORY_FILE);
        if !path.exists() {
            let mut writer = Writer::from_path(&path)?;
            writer.write_record(HEADER)?;
            writer.flush()?;
            debug!(path = %path.display(), "created game history");
        }
        Ok(Self { path })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every entry, in file order.
    pub fn read_all(&self) -> OutputResult<Vec<HistoryEntry>> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let mut entries = Vec::new();
        for row in reader.deserialize() {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Append one entry.
    pub fn append(&self, entry: &HistoryEntry) -> OutputResult<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;
        info!(level = %entry.level, penalty = entry.penalty, "run saved to history");
        Ok(())
    }

    /// Lowest-penalty entry per level, keyed by level name.
    pub fn best_by_level(&self) -> OutputResult<BTreeMap<String, HistoryEntry>> {
        let mut best: BTreeMap<String, HistoryEntry> = BTreeMap::new();
        for entry in self.read_all()? {
            match best.get(&entry.level) {
                Some(b) if b.penalty <= entry.penalty => {}
                _ => {
                    best.insert(entry.level.clone(), entry);
                }
            }
        }
        Ok(best)
    }

    /// The `n` most recent entries, newest first.  `level` restricts the
    /// result to one level.
    pub fn recent(&self, n: usize, level: Option<&str>) -> OutputResult<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> = self
            .read_all()?
            .into_iter()
            .filter(|e| level.is_none_or(|l| e.level == l))
            .collect();
        entries.sort_by(|a, b| b.timestamp_epoch_seconds.cmp(&a.timestamp_epoch_seconds));
        entries.truncate(n);
        Ok(entries)
    }
}
