//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use lift_core::{FloorId, Tick};
use lift_dispatch::CarDispatcher;
use lift_passenger::Passenger;
use lift_sim::{SimObserver, TickSummary};
use tracing::warn;

use crate::row::{CarSnapshotRow, DeliveryRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes car snapshots, tick summaries and scored
/// deliveries to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; further output may be incomplete");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:           tick.0,
            time_secs:      summary.time_secs,
            spawned:        summary.spawned as u32,
            delivered:      summary.delivered as u32,
            waiting:        summary.waiting as u32,
            riding:         summary.riding as u32,
            pending_spawns: summary.pending_spawns as u32,
            total_penalty:  summary.total_penalty,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_delivered(&mut self, tick: Tick, passenger: &Passenger, penalty: f64) {
        let times = passenger.times();
        let (Some(assignment), Some(delivery)) = (times.assignment, times.delivery) else {
            return;
        };
        let row = DeliveryRow {
            tick:            tick.0,
            passenger_id:    passenger.id().0,
            priority:        passenger.priority(),
            spawn_floor:     passenger.spawn_floor().0,
            target_floor:    passenger.target_floor().0,
            request_secs:    times.request,
            assignment_secs: assignment,
            delivery_secs:   delivery,
            penalty,
        };
        let result = self.writer.write_delivery(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, cars: &[CarDispatcher]) {
        let rows: Vec<CarSnapshotRow> = cars
            .iter()
            .map(|car| CarSnapshotRow {
                car_id:    car.id().0,
                tick:      tick.0,
                position:  car.position(),
                floor:     car.current_floor().0,
                direction: car.direction(),
                motion:    car.motion(),
                boarded:   car.boarded().len() as u32,
                waiting:   car.waiting_count() as u32,
                next_stop: car.next_stop().unwrap_or(FloorId::INVALID).0,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
