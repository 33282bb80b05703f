//! `Building` — the floors and every passenger not inside a car.

use lift_core::{CarId, FloorId, PassengerId, SpawnPointId};
use lift_dispatch::FloorRegistry;
use lift_passenger::{Passenger, PassengerState, WalkParams};
use lift_schedule::SpawnPoint;

#[cfg(feature = "fx-hash")]
type IdMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type IdMap<K, V> = std::collections::HashMap<K, V>;

/// One floor's spawn locations and occupants.
#[derive(Debug, Default)]
struct Floor {
    spawn_points: Vec<SpawnPoint>,
    /// Spawned and not yet boarded, in spawn order.
    waiting:      Vec<Passenger>,
    /// Alighted here, walking to the drop-off point.
    arrived:      Vec<Passenger>,
}

/// Owns every passenger that is standing on a floor.
///
/// Passengers move between the building and the cars through the
/// [`FloorRegistry`] methods only.  An id → floor index makes lookups by
/// [`PassengerId`] cheap; iteration always walks the floor vectors, so the
/// index's hash order never leaks into results.
#[derive(Debug)]
pub struct Building {
    floors:      Vec<Floor>,
    floor_width: f32,
    index:       IdMap<PassengerId, FloorId>,
}

impl Building {
    pub fn new(floor_count: u32, floor_width: f32, spawn_points: &[SpawnPoint]) -> Self {
        let mut floors: Vec<Floor> = (0..floor_count).map(|_| Floor::default()).collect();
        for point in spawn_points {
            if let Some(floor) = floors.get_mut(point.id.floor.index()) {
                floor.spawn_points.push(*point);
            }
        }
        for floor in &mut floors {
            floor.spawn_points.sort_by_key(|p| p.id);
        }
        Self { floors, floor_width, index: IdMap::default() }
    }

    #[inline]
    pub fn floor_count(&self) -> u32 {
        self.floors.len() as u32
    }

    #[inline]
    pub fn floor_width(&self) -> f32 {
        self.floor_width
    }

    pub fn spawn_point(&self, id: SpawnPointId) -> Option<&SpawnPoint> {
        self.floors.get(id.floor.index())?.spawn_points.iter().find(|p| p.id == id)
    }

    /// Place a freshly spawned passenger on its floor.
    pub fn add_spawned(&mut self, passenger: Passenger) {
        let floor = passenger.current_floor();
        self.index.insert(passenger.id(), floor);
        if let Some(f) = self.floors.get_mut(floor.index()) {
            f.waiting.push(passenger);
        }
    }

    pub fn find(&self, id: PassengerId) -> Option<&Passenger> {
        let floor = self.floors.get(self.index.get(&id)?.index())?;
        floor.waiting.iter().chain(&floor.arrived).find(|p| p.id() == id)
    }

    pub fn find_mut(&mut self, id: PassengerId) -> Option<&mut Passenger> {
        let floor = self.floors.get_mut(self.index.get(&id)?.index())?;
        floor.waiting.iter_mut().chain(&mut floor.arrived).find(|p| p.id() == id)
    }

    /// Passengers on `floor` who have not boarded yet.
    pub fn waiting_on(&self, floor: FloorId) -> &[Passenger] {
        self.floors.get(floor.index()).map_or(&[], |f| f.waiting.as_slice())
    }

    /// Passengers walking away from the car on `floor`.
    pub fn arrived_on(&self, floor: FloorId) -> &[Passenger] {
        self.floors.get(floor.index()).map_or(&[], |f| f.arrived.as_slice())
    }

    /// Every passenger in the building, floor by floor.
    pub fn passengers(&self) -> impl Iterator<Item = &Passenger> {
        self.floors.iter().flat_map(|f| f.waiting.iter().chain(&f.arrived))
    }

    /// Ids of passengers still waiting for a car to be chosen, in floor then
    /// spawn order.
    pub fn awaiting_selection(&self) -> Vec<PassengerId> {
        self.floors
            .iter()
            .flat_map(|f| &f.waiting)
            .filter(|p| p.state() == PassengerState::AwaitingSelection)
            .map(Passenger::id)
            .collect()
    }

    /// Number of passengers standing on floors (waiting or walking off).
    pub fn occupant_count(&self) -> usize {
        self.index.len()
    }

    pub fn waiting_count(&self) -> usize {
        self.floors.iter().map(|f| f.waiting.len()).sum()
    }

    /// Advance lateral movement for every passenger on every floor.
    ///
    /// `door_x` resolves a car id to its door position.
    pub fn update_passengers<F>(&mut self, dt: f64, params: &WalkParams, door_x: F)
    where
        F: Fn(CarId) -> Option<f32>,
    {
        for floor in &mut self.floors {
            for p in floor.waiting.iter_mut().chain(&mut floor.arrived) {
                p.update(dt, params, &door_x);
            }
        }
    }

    /// Remove and return every passenger that reached `Delivered`.
    pub fn take_delivered(&mut self) -> Vec<Passenger> {
        let mut delivered = Vec::new();
        for floor in &mut self.floors {
            let (done, walking): (Vec<_>, Vec<_>) = std::mem::take(&mut floor.arrived)
                .into_iter()
                .partition(|p| p.state() == PassengerState::Delivered);
            floor.arrived = walking;
            delivered.extend(done);
        }
        for p in &delivered {
            self.index.remove(&p.id());
        }
        delivered
    }
}

impl FloorRegistry for Building {
    /// First spawn location's x, or the middle of the floor without one.
    fn spawn_point_x(&self, floor: FloorId) -> Option<f32> {
        let f = self.floors.get(floor.index())?;
        Some(f.spawn_points.first().map_or(self.floor_width / 2.0, |p| p.x))
    }

    fn passenger(&self, floor: FloorId, id: PassengerId) -> Option<&Passenger> {
        self.floors.get(floor.index())?.waiting.iter().find(|p| p.id() == id)
    }

    fn remove_passenger(&mut self, floor: FloorId, id: PassengerId) -> Option<Passenger> {
        let waiting = &mut self.floors.get_mut(floor.index())?.waiting;
        let at = waiting.iter().position(|p| p.id() == id)?;
        self.index.remove(&id);
        Some(waiting.remove(at))
    }

    fn add_arrived_passenger(&mut self, floor: FloorId, passenger: Passenger) {
        self.index.insert(passenger.id(), floor);
        if let Some(f) = self.floors.get_mut(floor.index()) {
            f.arrived.push(passenger);
        }
    }

    fn return_passenger(&mut self, floor: FloorId, passenger: Passenger) {
        self.index.insert(passenger.id(), floor);
        if let Some(f) = self.floors.get_mut(floor.index()) {
            f.waiting.push(passenger);
        }
    }
}
