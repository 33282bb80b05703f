//! Fluent builder for constructing a [`Sim`].

use lift_core::{CarId, FloorId, SimConfig, SimRng};
use lift_dispatch::{CarDispatcher, CarParams};
use lift_passenger::WalkParams;
use lift_schedule::{LevelData, PassengerFactory, RandomSpawner, SpawnQueue};

use crate::{Building, CarSpec, PenaltyLedger, RunConfig, SelectionPolicy, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick duration, total ticks, seed, …
/// - `P: SelectionPolicy` — who chooses cars for waiting passengers
///
/// plus a floor count, either from `.level(..)` or `.floor_count(..)`.
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                              |
/// |------------------------|--------------------------------------|
/// | `.level(l)`            | no scripted spawns                   |
/// | `.random_spawners(v)`  | none                                 |
/// | `.cars(v)`             | `CarSpec::default_pair()` (A, B)     |
/// | `.car_params(p)`       | `CarParams::default()`               |
/// | `.walk_params(p)`      | `WalkParams::default()`              |
/// | `.start_floors(v)`     | every car on the ground floor        |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, LeastLoaded)
///     .level(level)
///     .cars(vec![CarSpec::new("A", 350.0)])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: SelectionPolicy> {
    config:       SimConfig,
    policy:       P,
    level:        Option<LevelData>,
    floor_count:  Option<u32>,
    spawners:     Vec<RandomSpawner>,
    cars:         Vec<CarSpec>,
    car_params:   CarParams,
    walk:         WalkParams,
    start_floors: Option<Vec<FloorId>>,
}

impl<P: SelectionPolicy> SimBuilder<P> {
    pub fn new(config: SimConfig, policy: P) -> Self {
        Self {
            config,
            policy,
            level:        None,
            floor_count:  None,
            spawners:     Vec::new(),
            cars:         CarSpec::default_pair(),
            car_params:   CarParams::default(),
            walk:         WalkParams::default(),
            start_floors: None,
        }
    }

    /// Builder seeded from a [`RunConfig`].
    pub fn from_run_config(run: RunConfig, policy: P) -> Self {
        Self::new(run.sim, policy)
            .cars(run.cars)
            .car_params(run.car)
            .walk_params(run.walk)
    }

    /// Scripted spawns and spawn locations.  Also fixes the floor count.
    pub fn level(mut self, level: LevelData) -> Self {
        self.level = Some(level);
        self
    }

    /// Floor count for runs without a level.  Must agree with the level's
    /// when both are given.
    pub fn floor_count(mut self, floor_count: u32) -> Self {
        self.floor_count = Some(floor_count);
        self
    }

    pub fn random_spawners(mut self, spawners: Vec<RandomSpawner>) -> Self {
        self.spawners = spawners;
        self
    }

    pub fn cars(mut self, cars: Vec<CarSpec>) -> Self {
        self.cars = cars;
        self
    }

    pub fn car_params(mut self, params: CarParams) -> Self {
        self.car_params = params;
        self
    }

    pub fn walk_params(mut self, params: WalkParams) -> Self {
        self.walk = params;
        self
    }

    /// Initial floor of each car (must be one per car).
    pub fn start_floors(mut self, floors: Vec<FloorId>) -> Self {
        self.start_floors = Some(floors);
        self
    }

    /// Validate inputs, lay out the building and cars, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        // ── Resolve the floor count ───────────────────────────────────────
        let floor_count = match (&self.level, self.floor_count) {
            (Some(level), Some(n)) if level.floor_count() != n => {
                return Err(SimError::Config(format!(
                    "floor count {n} disagrees with the level's {}",
                    level.floor_count()
                )));
            }
            (Some(level), _) => level.floor_count(),
            (None, Some(n)) => n,
            (None, None) => {
                return Err(SimError::Config("no level and no floor count given".into()));
            }
        };
        if floor_count < 2 {
            return Err(SimError::Config(format!("need at least 2 floors, got {floor_count}")));
        }

        // ── Validate cars and parameters ──────────────────────────────────
        if self.cars.is_empty() {
            return Err(SimError::Config("at least one car is required".into()));
        }
        if self.cars.len() > usize::from(u16::MAX) {
            return Err(SimError::Config(format!("too many cars: {}", self.cars.len())));
        }
        let p = &self.car_params;
        if !(p.speed_floors_per_sec.is_finite() && p.speed_floors_per_sec > 0.0) {
            return Err(SimError::Config(format!(
                "car speed must be positive, got {}",
                p.speed_floors_per_sec
            )));
        }
        if !(p.door_dwell_secs.is_finite() && p.door_dwell_secs >= 0.0) {
            return Err(SimError::Config(format!(
                "door dwell must be non-negative, got {}",
                p.door_dwell_secs
            )));
        }
        let width = self.walk.floor_width;
        if let Some(spec) = self.cars.iter().find(|c| !(0.0..=width).contains(&c.door_x)) {
            return Err(SimError::Config(format!(
                "car {} door x {} lies outside the {width}-unit floor",
                spec.name, spec.door_x
            )));
        }
        for spawner in &self.spawners {
            spawner.spawn_point().floor.ensure_within(floor_count)?;
        }

        let start_floors = match self.start_floors {
            Some(f) if f.len() != self.cars.len() => {
                return Err(SimError::Config(format!(
                    "{} start floors given for {} cars",
                    f.len(),
                    self.cars.len()
                )));
            }
            Some(f) => f,
            None => vec![FloorId(0); self.cars.len()],
        };
        for floor in &start_floors {
            floor.ensure_within(floor_count)?;
        }

        // ── Build ─────────────────────────────────────────────────────────
        let cars: Vec<CarDispatcher> = self
            .cars
            .iter()
            .zip(&start_floors)
            .enumerate()
            .map(|(i, (spec, &floor))| {
                CarDispatcher::new(CarId(i as u16), spec.name.clone(), spec.door_x, floor_count, self.car_params.clone())
                    .with_start_floor(floor)
            })
            .collect();

        let (building, queue) = match self.level {
            Some(level) => {
                let (_, points, events) = level.into_parts();
                (Building::new(floor_count, width, &points), SpawnQueue::from_events(events))
            }
            None => (Building::new(floor_count, width, &[]), SpawnQueue::new()),
        };

        Ok(Sim {
            clock:    self.config.make_clock(),
            rng:      SimRng::new(self.config.seed),
            factory:  PassengerFactory::new(self.config.seed),
            config:   self.config,
            walk:     self.walk,
            cars,
            building,
            queue,
            spawners: self.spawners,
            policy:   self.policy,
            ledger:   PenaltyLedger::new(),
        })
    }
}
