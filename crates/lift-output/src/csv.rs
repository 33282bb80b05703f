//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `car_snapshots.csv`
//! - `tick_summaries.csv`
//! - `deliveries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{CarSnapshotRow, DeliveryRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub const CAR_SNAPSHOTS_FILE:  &str = "car_snapshots.csv";
pub const TICK_SUMMARIES_FILE: &str = "tick_summaries.csv";
pub const DELIVERIES_FILE:     &str = "deliveries.csv";

/// Writes run output to three CSV files.
pub struct CsvWriter {
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    deliveries: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create (or truncate) the three CSV files in `dir` and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(CAR_SNAPSHOTS_FILE))?;
        snapshots.write_record([
            "car_id", "tick", "position", "floor", "direction", "motion", "boarded", "waiting",
            "next_stop",
        ])?;

        let mut summaries = Writer::from_path(dir.join(TICK_SUMMARIES_FILE))?;
        summaries.write_record([
            "tick", "time_secs", "spawned", "delivered", "waiting", "riding", "pending_spawns",
            "total_penalty",
        ])?;

        let mut deliveries = Writer::from_path(dir.join(DELIVERIES_FILE))?;
        deliveries.write_record([
            "tick", "passenger_id", "priority", "spawn_floor", "target_floor", "request_secs",
            "assignment_secs", "delivery_secs", "penalty",
        ])?;

        Ok(Self { snapshots, summaries, deliveries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[CarSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.car_id.to_string(),
                row.tick.to_string(),
                format!("{:.4}", row.position),
                row.floor.to_string(),
                row.direction.as_str().to_owned(),
                row.motion.as_str().to_owned(),
                row.boarded.to_string(),
                row.waiting.to_string(),
                row.next_stop.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.4}", row.time_secs),
            row.spawned.to_string(),
            row.delivered.to_string(),
            row.waiting.to_string(),
            row.riding.to_string(),
            row.pending_spawns.to_string(),
            format!("{:.3}", row.total_penalty),
        ])?;
        Ok(())
    }

    fn write_delivery(&mut self, row: &DeliveryRow) -> OutputResult<()> {
        self.deliveries.write_record(&[
            row.tick.to_string(),
            row.passenger_id.to_string(),
            row.priority.as_str().to_owned(),
            row.spawn_floor.to_string(),
            row.target_floor.to_string(),
            format!("{:.4}", row.request_secs),
            format!("{:.4}", row.assignment_secs),
            format!("{:.4}", row.delivery_secs),
            format!("{:.3}", row.penalty),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.deliveries.flush()?;
        Ok(())
    }
}
