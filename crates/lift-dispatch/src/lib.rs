//! `lift-dispatch` — the per-car dispatch algorithm and car state machine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`planner`]  | `find_best_stop`, `DispatchSnapshot` (look-ahead simulation)     |
//! | [`motion`]   | `MotionState`, `CarParams`                                       |
//! | [`car`]      | `CarDispatcher` — motion, doors, boarding/alighting              |
//! | [`registry`] | `FloorRegistry` — the port through which cars reach floors       |
//! | [`event`]    | `CarEvent` — what a car did during one update                    |
//! | [`error`]    | `DispatchError`, `DispatchResult<T>`                             |
//!
//! # Dispatch model
//!
//! A car only ever needs its next stop.  That stop comes from the pure
//! [`find_best_stop`] rule; the full [`DispatchSnapshot::target_sequence`]
//! replays the rule over a copy of the car's state for display and testing.
//! The sequence is recomputed on every new request and on every arrival.
//!
//! Waiting passengers stay owned by the floor they stand on; a car only keeps
//! `(PassengerId, target)` registrations and takes ownership at boarding via
//! [`FloorRegistry::remove_passenger`].  Alighting hands ownership back with
//! [`FloorRegistry::add_arrived_passenger`].

pub mod car;
pub mod error;
pub mod event;
pub mod motion;
pub mod planner;
pub mod registry;


pub use car::{CarDispatcher, WaitingEntry};
pub use error::{DispatchError, DispatchResult};
pub use event::CarEvent;
pub use motion::{CarParams, MotionState};
pub use planner::{DispatchSnapshot, find_best_stop};
pub use registry::FloorRegistry;
