//! Unit tests for lift-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CarId, FloorId, PassengerId, SpawnPointId};

    #[test]
    fn index_roundtrip() {
        let id = PassengerId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(PassengerId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn car_id_rejects_oversized_index() {
        assert!(CarId::try_from(70_000usize).is_err());
    }

    #[test]
    fn floor_distance_is_symmetric() {
        assert_eq!(FloorId(2).distance(FloorId(7)), 5);
        assert_eq!(FloorId(7).distance(FloorId(2)), 5);
        assert_eq!(FloorId(3).distance(FloorId(3)), 0);
    }

    #[test]
    fn floor_range_check() {
        assert!(FloorId(4).ensure_within(5).is_ok());
        assert!(FloorId(5).ensure_within(5).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(PassengerId(7).to_string(), "PassengerId(7)");
    }

    #[test]
    fn spawn_point_parses_floor_and_ordinal() {
        let id: SpawnPointId = "3-2".parse().unwrap();
        assert_eq!(id, SpawnPointId::new(FloorId(3), 2));
        assert_eq!(id.to_string(), "3-2");
    }

    #[test]
    fn spawn_point_rejects_garbage() {
        assert!("3".parse::<SpawnPointId>().is_err());
        assert!("a-1".parse::<SpawnPointId>().is_err());
        assert!("1-0".parse::<SpawnPointId>().is_err());
        assert!("".parse::<SpawnPointId>().is_err());
    }
}

#[cfg(test)]
mod direction {
    use crate::{Direction, FloorId};

    #[test]
    fn between_floors() {
        assert_eq!(Direction::between(FloorId(1), FloorId(4)), Some(Direction::Up));
        assert_eq!(Direction::between(FloorId(4), FloorId(1)), Some(Direction::Down));
        assert_eq!(Direction::between(FloorId(2), FloorId(2)), None);
    }

    #[test]
    fn ahead_is_strict() {
        assert!(Direction::Up.is_ahead(FloorId(2), FloorId(3)));
        assert!(!Direction::Up.is_ahead(FloorId(2), FloorId(2)));
        assert!(!Direction::Up.is_ahead(FloorId(2), FloorId(1)));
        assert!(Direction::Down.is_ahead(FloorId(2), FloorId(0)));
        assert!(!Direction::Down.is_ahead(FloorId(2), FloorId(2)));
    }

    #[test]
    fn reversed_round_trips() {
        assert_eq!(Direction::Up.reversed(), Direction::Down);
        assert_eq!(Direction::Up.reversed().reversed(), Direction::Up);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(3).next(), Tick(4));
    }

    #[test]
    fn every_interval() {
        assert!(Tick(0).is_every(60));
        assert!(Tick(120).is_every(60));
        assert!(!Tick(61).is_every(60));
        assert!(!Tick(0).is_every(0));
    }

    #[test]
    fn clock_derives_seconds_from_ticks() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.now_secs(), 0.0);
        for _ in 0..7 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(7));
        assert!((clock.now_secs() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = SimClock::new(0.25);
        assert_eq!(clock.ticks_for_secs(1.0), 4);
        assert_eq!(clock.ticks_for_secs(1.1), 5);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_tick_duration_rejected() {
        let config = SimConfig { tick_duration_secs: 0.0, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{PassengerId, PassengerRng, SimRng};

    #[test]
    fn passenger_rng_is_deterministic() {
        let mut a = PassengerRng::new(99, PassengerId(5));
        let mut b = PassengerRng::new(99, PassengerId(5));
        let xs: Vec<u32> = (0..10).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..10).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn neighbouring_passengers_differ() {
        let mut a = PassengerRng::new(99, PassengerId(5));
        let mut b = PassengerRng::new(99, PassengerId(6));
        let xs: Vec<u32> = (0..10).map(|_| a.gen_range(0..1_000_000)).collect();
        let ys: Vec<u32> = (0..10).map(|_| b.gen_range(0..1_000_000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn sim_rng_is_reproducible_and_clamps_probability() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<u32> = (0..10).map(|_| a.gen_range(0..100)).collect();
        let ys: Vec<u32> = (0..10).map(|_| b.gen_range(0..100)).collect();
        assert_eq!(xs, ys);
        assert!(a.gen_bool(1.5));
        assert!(!a.gen_bool(-0.5));
    }
}
