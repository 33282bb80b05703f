//! The `Sim` struct and its tick loop.

use lift_core::{CarId, LiftError, PassengerId, SimClock, SimConfig, SimRng, Tick};
use lift_dispatch::CarDispatcher;
use lift_passenger::WalkParams;
use lift_schedule::{PassengerFactory, RandomSpawner, SpawnEvent, SpawnQueue};
use tracing::{debug, info, trace};

use crate::{Building, PenaltyLedger, SelectionPolicy, SimObserver, SimResult, TickSummary};

/// The main simulation runner.
///
/// `Sim<P>` owns the building, the cars and the spawn sources and drives the
/// six-phase tick loop described in the crate docs.  `P` decides which car a
/// waiting passenger takes.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: SelectionPolicy> {
    pub(crate) config:   SimConfig,
    pub(crate) clock:    SimClock,
    pub(crate) walk:     WalkParams,
    pub(crate) cars:     Vec<CarDispatcher>,
    pub(crate) building: Building,
    pub(crate) queue:    SpawnQueue,
    pub(crate) spawners: Vec<RandomSpawner>,
    pub(crate) rng:      SimRng,
    pub(crate) factory:  PassengerFactory,
    pub(crate) policy:   P,
    pub(crate) ledger:   PenaltyLedger,
}

impl<P: SelectionPolicy> Sim<P> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn config(&self) -> &SimConfig { &self.config }
    #[inline] pub fn clock(&self) -> &SimClock { &self.clock }
    #[inline] pub fn cars(&self) -> &[CarDispatcher] { &self.cars }
    #[inline] pub fn building(&self) -> &Building { &self.building }
    #[inline] pub fn ledger(&self) -> &PenaltyLedger { &self.ledger }
    #[inline] pub fn policy_mut(&mut self) -> &mut P { &mut self.policy }

    pub fn car(&self, id: CarId) -> Option<&CarDispatcher> {
        self.cars.get(id.index())
    }

    /// Spawn events not yet turned into passengers.
    pub fn remaining_spawns(&self) -> usize {
        self.queue.remaining()
    }

    /// `true` once nothing is left to spawn, nobody stands on a floor and
    /// every car is empty with no registrations.  Never true while random
    /// spawners are attached.
    pub fn is_complete(&self) -> bool {
        self.spawners.is_empty()
            && self.queue.is_empty()
            && self.building.occupant_count() == 0
            && self.cars.iter().all(|c| !c.has_pending_work())
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Assign `passenger` to `car` at time `now` and register the request
    /// with the car.
    ///
    /// Returns `Ok(false)` when the passenger has already chosen a car.
    ///
    /// # Errors
    ///
    /// `CarNotFound` / `PassengerNotFound` for unknown ids (a passenger is
    /// only found while standing on a floor).
    pub fn select_car(&mut self, passenger: PassengerId, car: CarId, now: f64) -> SimResult<bool> {
        let dispatcher = self
            .cars
            .get_mut(car.index())
            .ok_or(LiftError::CarNotFound(car))?;
        let p = self
            .building
            .find_mut(passenger)
            .ok_or(LiftError::PassengerNotFound(passenger))?;

        if !p.select_car(car, now) {
            return Ok(false);
        }
        dispatcher.add_request(p)?;
        debug!(%passenger, car = dispatcher.name(), now, "car selected");
        Ok(true)
    }

    /// UI hover: pause or resume a passenger's wandering.
    pub fn set_focused(&mut self, passenger: PassengerId, focused: bool) -> SimResult<()> {
        self.building
            .find_mut(passenger)
            .ok_or(LiftError::PassengerNotFound(passenger))?
            .set_focused(focused);
        Ok(())
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run until the level is complete or `config.end_tick()` is reached.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            cars = self.cars.len(),
            floors = self.building.floor_count(),
            spawns = self.queue.remaining(),
            "simulation started"
        );
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() || self.is_complete() {
                break;
            }
            self.step(now, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            tick = %self.clock.current_tick,
            delivered = self.ledger.delivered(),
            total_penalty = self.ledger.total(),
            complete = self.is_complete(),
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`
    /// and completion).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.step(now, observer)?;
        }
        Ok(())
    }

    fn step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer)?;
        observer.on_tick_end(now, &summary);
        if now.is_every(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.cars);
        }
        self.clock.advance();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickSummary> {
        let dt = self.clock.dt();
        let start = self.clock.now_secs();
        let end = start + dt;

        // ── Phase 1: spawn ────────────────────────────────────────────────
        let spawned = self.spawn_due(start)?;

        // ── Phase 2: car selection ────────────────────────────────────────
        for id in self.building.awaiting_selection() {
            let Some(p) = self.building.find(id) else { continue };
            if let Some(car) = self.policy.choose(p, &self.cars) {
                self.select_car(id, car, start)?;
            }
        }

        // ── Phase 3: floor passengers walk ────────────────────────────────
        let cars = &self.cars;
        self.building.update_passengers(dt, &self.walk, |car| {
            cars.get(car.index()).map(CarDispatcher::door_x)
        });

        // ── Phase 4: cars ─────────────────────────────────────────────────
        for car in &mut self.cars {
            for event in car.update(dt, end, &mut self.building)? {
                observer.on_car_event(now, car.id(), &event);
            }
        }

        // ── Phase 5: score deliveries once ────────────────────────────────
        let delivered = self.building.take_delivered();
        let mut scored = 0;
        for p in &delivered {
            if let Some(penalty) = self.ledger.record(p) {
                debug!(passenger = %p.id(), penalty, total = self.ledger.total(), "delivery scored");
                observer.on_delivered(now, p, penalty);
                scored += 1;
            }
        }

        let summary = TickSummary {
            time_secs:      end,
            spawned,
            delivered:      scored,
            waiting:        self.building.waiting_count(),
            riding:         self.cars.iter().map(|c| c.boarded().len()).sum(),
            pending_spawns: self.queue.remaining(),
            total_penalty:  self.ledger.total(),
        };
        trace!(tick = %now, ?summary, "tick processed");
        Ok(summary)
    }

    /// Turn every spawn due at `now` into a passenger on its floor.
    fn spawn_due(&mut self, now: f64) -> SimResult<usize> {
        let mut due: Vec<(SpawnEvent, f32)> = Vec::new();
        for event in self.queue.drain_due(now) {
            let x = self.spawn_x_for(&event);
            due.push((event, x));
        }
        for spawner in &mut self.spawners {
            let x = spawner.x();
            due.extend(spawner.due(now, &mut self.rng).into_iter().map(|e| (e, x)));
        }

        let count = due.len();
        for (event, x) in due {
            let passenger = self.factory.build(&event, x, now)?;
            self.building.add_spawned(passenger);
        }
        Ok(count)
    }

    fn spawn_x_for(&self, event: &SpawnEvent) -> f32 {
        self.building
            .spawn_point(event.spawn_point)
            .map_or(self.building.floor_width() / 2.0, |p| p.x)
    }
}
