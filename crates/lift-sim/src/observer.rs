//! Simulation observer trait for progress reporting and data collection.

use lift_core::{CarId, Tick};
use lift_dispatch::{CarDispatcher, CarEvent};
use lift_passenger::Passenger;

/// Counters reported at the end of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickSummary {
    /// Simulation time at the end of the tick, in seconds.
    pub time_secs:       f64,
    /// Passengers spawned this tick.
    pub spawned:         usize,
    /// Passengers scored this tick.
    pub delivered:       usize,
    /// Passengers on floors who have not boarded.
    pub waiting:         usize,
    /// Passengers inside cars.
    pub riding:          usize,
    /// Spawn events still queued.
    pub pending_spawns:  usize,
    /// Running penalty total.
    pub total_penalty:   f64,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — delivery printer
///
/// ```rust,ignore
/// struct DeliveryPrinter;
///
/// impl SimObserver for DeliveryPrinter {
///     fn on_delivered(&mut self, tick: Tick, passenger: &Passenger, penalty: f64) {
///         println!("{tick}: {} delivered, penalty {penalty:.1}", passenger.id());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called for every event a car reports during its update.
    fn on_car_event(&mut self, _tick: Tick, _car: CarId, _event: &CarEvent) {}

    /// Called once per passenger, the tick it is scored.
    fn on_delivered(&mut self, _tick: Tick, _passenger: &Passenger, _penalty: f64) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    fn on_snapshot(&mut self, _tick: Tick, _cars: &[CarDispatcher]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
