//! `lift-sim` — tick loop orchestrator for the liftsim dispatch simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks (or until the level is complete):
//!   ① Spawn     — pop due spawn events (level queue + random spawners),
//!                 build passengers, place them on their floors.
//!   ② Select    — ask the SelectionPolicy about every passenger still
//!                 awaiting selection; a choice registers with the car.
//!   ③ Walk      — floor passengers wander, walk to doors, walk off.
//!   ④ Cars      — every car moves, opens/closes doors, boards, alights.
//!   ⑤ Score     — passengers that reached Delivered are scored once by
//!                 the PenaltyLedger and removed from the building.
//!   ⑥ Observe   — tick summary, car snapshots at the output interval.
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | FxHash for the passenger id → floor index.             |
//! | `serde`   | Serde derives on `RunConfig` and `CarSpec`.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::SimConfig;
//! use lift_sim::{LeastLoaded, NoopObserver, SimBuilder};
//!
//! let level = LevelLoader::new("levels").load("level_1")?;
//! let mut sim = SimBuilder::new(SimConfig::default(), LeastLoaded)
//!     .level(level)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("total penalty {}", sim.ledger().total());
//! ```

pub mod builder;
pub mod building;
pub mod config;
pub mod error;
pub mod ledger;
pub mod observer;
pub mod policy;
pub mod sim;


pub use builder::SimBuilder;
pub use building::Building;
pub use config::{CarSpec, RunConfig};
pub use error::{SimError, SimResult};
pub use ledger::{DeliveryRecord, PenaltyLedger};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use policy::{FixedCar, LeastLoaded, ManualSelection, SelectionPolicy};
pub use sim::Sim;
