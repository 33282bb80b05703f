//! `lift-output` — run output for the liftsim dispatch simulator.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`row`]      | plain row types: car snapshots, tick summaries, deliveries |
//! | [`writer`]   | the [`OutputWriter`] backend trait                         |
//! | [`csv`]      | [`CsvWriter`]: `car_snapshots.csv`, `tick_summaries.csv`, `deliveries.csv` |
//! | [`observer`] | [`SimOutputObserver`], the `SimObserver` → writer bridge   |
//! | [`history`]  | [`GameHistory`]: one `game_history.csv` row per finished run |
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvWriter, GameHistory, HistoryEntry, SimOutputObserver};
//!
//! let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new("./output"))?);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! GameHistory::open(Path::new("./output"))?
//!     .append(&HistoryEntry::now("level_1", sim.ledger().total()))?;
//! ```

pub mod csv;
pub mod error;
pub mod history;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use history::{GameHistory, HistoryEntry, HISTORY_FILE};
pub use observer::SimOutputObserver;
pub use row::{CarSnapshotRow, DeliveryRow, TickSummaryRow};
pub use writer::OutputWriter;
