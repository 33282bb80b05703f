//! Unit tests for lift-passenger.

use lift_core::{CarId, FloorId, PassengerId};

use crate::{Appearance, Passenger, PassengerSpec, PassengerState, Priority, WalkParams};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn spec(spawn: u32, target: u32, priority: Priority, request_time: f64) -> PassengerSpec {
    PassengerSpec {
        id:           PassengerId(1),
        spawn_floor:  FloorId(spawn),
        spawn_x:      200.0,
        target_floor: FloorId(target),
        priority,
        request_time,
        appearance:   Appearance::default(),
        wander_right: true,
    }
}

fn passenger(spawn: u32, target: u32) -> Passenger {
    Passenger::new(spec(spawn, target, Priority::Normal, 0.0)).unwrap()
}

/// Door of car 0 at x = 350; no other cars.
fn door(car: CarId) -> Option<f32> {
    (car == CarId(0)).then_some(350.0)
}

/// Walk a passenger to its door and board it.
fn boarded(spawn: u32, target: u32) -> Passenger {
    let mut p = passenger(spawn, target);
    assert!(p.select_car(CarId(0), 1.0));
    let params = WalkParams::default();
    for _ in 0..600 {
        p.update(1.0 / 60.0, &params, door);
    }
    assert_eq!(p.state(), PassengerState::WaitingAtCar);
    p.board().unwrap();
    p
}

// ── Penalty model ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod penalty_model {
    use super::*;
    use crate::{PenaltyCoefficients, ServiceTimes, penalty};

    #[test]
    fn coefficient_variants() {
        assert_eq!(Priority::Normal.coefficients(), PenaltyCoefficients { apc: 1.0, dpc: 2.0, cipc: 1.0 });
        assert_eq!(Priority::High.coefficients(), PenaltyCoefficients { apc: 3.0, dpc: 4.0, cipc: 2.0 });
    }

    #[test]
    fn normal_priority_final_penalty() {
        let times = ServiceTimes { request: 0.0, assignment: Some(5.0), delivery: Some(15.0) };
        assert_eq!(penalty(PenaltyCoefficients::NORMAL, &times, 100.0), 25.0);
    }

    #[test]
    fn high_priority_final_penalty() {
        let times = ServiceTimes { request: 0.0, assignment: Some(2.0), delivery: Some(10.0) };
        assert_eq!(penalty(PenaltyCoefficients::HIGH, &times, 10.0), 76.0);
    }

    #[test]
    fn before_assignment_only_waiting_counts() {
        let times = ServiceTimes::requested_at(4.0);
        // (10 - 4) * 3 * 2
        assert_eq!(penalty(PenaltyCoefficients::HIGH, &times, 10.0), 36.0);
    }

    #[test]
    fn before_delivery_uses_now_for_riding() {
        let times = ServiceTimes { request: 0.0, assignment: Some(5.0), delivery: None };
        // 5 * 1 + (9 - 5) * 2
        assert_eq!(penalty(PenaltyCoefficients::NORMAL, &times, 9.0), 13.0);
    }

    #[test]
    fn final_penalty_ignores_later_now() {
        let times = ServiceTimes { request: 1.0, assignment: Some(3.0), delivery: Some(8.0) };
        let at_delivery = penalty(PenaltyCoefficients::NORMAL, &times, 8.0);
        assert_eq!(penalty(PenaltyCoefficients::NORMAL, &times, 1_000.0), at_delivery);
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;
    use crate::PassengerError;

    #[test]
    fn same_floor_target_rejected() {
        let err = Passenger::new(spec(2, 2, Priority::Normal, 0.0)).unwrap_err();
        assert!(matches!(err, PassengerError::SameFloor { .. }));
    }

    #[test]
    fn new_passenger_awaits_selection() {
        let p = passenger(0, 3);
        assert_eq!(p.state(), PassengerState::AwaitingSelection);
        assert_eq!(p.current_floor(), FloorId(0));
        assert!(p.times().assignment.is_none());
        assert!(p.final_penalty().is_none());
    }

    #[test]
    fn select_car_stamps_assignment_once() {
        let mut p = passenger(0, 3);
        assert!(p.select_car(CarId(0), 5.0));
        assert_eq!(p.state(), PassengerState::WalkingToCar);
        assert_eq!(p.times().assignment, Some(5.0));
        assert!(!p.select_car(CarId(1), 9.0));
        assert_eq!(p.times().assignment, Some(5.0));
        assert_eq!(p.selected_car(), Some(CarId(0)));
    }

    #[test]
    fn cannot_board_before_reaching_the_door() {
        let mut p = passenger(0, 3);
        assert!(matches!(p.board(), Err(PassengerError::InvalidTransition { .. })));
        p.select_car(CarId(0), 1.0);
        assert!(matches!(p.board(), Err(PassengerError::InvalidTransition { .. })));
        assert_eq!(p.state(), PassengerState::WalkingToCar);
    }

    #[test]
    fn alight_only_at_target_floor() {
        let mut p = boarded(0, 3);
        assert!(matches!(p.alight(FloorId(2), 350.0, 100.0, 9.0), Err(PassengerError::WrongFloor { .. })));
        assert_eq!(p.state(), PassengerState::Boarded);
        p.alight(FloorId(3), 350.0, 100.0, 9.0).unwrap();
        assert_eq!(p.state(), PassengerState::Alighting);
        assert_eq!(p.current_floor(), FloorId(3));
        assert_eq!(p.times().delivery, Some(9.0));
    }

    #[test]
    fn full_journey_reaches_delivered_with_ordered_times() {
        let mut p = boarded(1, 4);
        p.alight(FloorId(4), 350.0, 120.0, 20.0).unwrap();
        let params = WalkParams::default();
        for _ in 0..600 {
            p.update(1.0 / 60.0, &params, door);
        }
        assert_eq!(p.state(), PassengerState::Delivered);
        assert_eq!(p.x(), 120.0);

        let t = p.times();
        let (assigned, delivered) = (t.assignment.unwrap(), t.delivery.unwrap());
        assert!(t.request <= assigned && assigned <= delivered);
        // (1 - 0) * 1 + (20 - 1) * 2
        assert_eq!(p.final_penalty(), Some(39.0));
    }

    #[test]
    fn delivered_is_terminal() {
        let mut p = boarded(1, 4);
        p.alight(FloorId(4), 350.0, 351.0, 20.0).unwrap();
        p.update(1.0 / 60.0, &WalkParams::default(), door);
        assert_eq!(p.state(), PassengerState::Delivered);
        assert!(p.state().successor().is_none());
        assert!(p.board().is_err());
        assert!(p.alight(FloorId(4), 0.0, 0.0, 30.0).is_err());
        assert_eq!(p.times().delivery, Some(20.0));
    }

    #[test]
    fn transition_table_is_a_chain() {
        use PassengerState::*;
        let chain = [AwaitingSelection, WalkingToCar, WaitingAtCar, Boarded, Alighting, Delivered];
        for pair in chain.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]));
            assert!(!pair[1].can_transition_to(pair[0]));
        }
        assert!(!AwaitingSelection.can_transition_to(Boarded));
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn wandering_stays_within_margins() {
        let params = WalkParams::default();
        let mut p = passenger(0, 2);
        for _ in 0..10_000 {
            p.update(1.0 / 60.0, &params, door);
            assert!(p.x() >= params.wander_margin);
            assert!(p.x() <= params.floor_width - params.wander_margin - params.body_width);
        }
        assert_eq!(p.state(), PassengerState::AwaitingSelection);
    }

    #[test]
    fn focused_passenger_stands_still() {
        let mut p = passenger(0, 2);
        p.set_focused(true);
        let x = p.x();
        p.update(1.0, &WalkParams::default(), door);
        assert_eq!(p.x(), x);
    }

    #[test]
    fn walking_never_overshoots_the_door() {
        let params = WalkParams::default();
        let mut p = passenger(0, 2);
        p.select_car(CarId(0), 0.0);
        // One huge step: 120 * 10 = 1200 units, but the door is 150 away.
        p.update(10.0, &params, door);
        assert_eq!(p.x(), 350.0);
        p.update(0.01, &params, door);
        assert_eq!(p.state(), PassengerState::WaitingAtCar);
    }

    #[test]
    fn unknown_car_leaves_walker_in_place() {
        let mut p = passenger(0, 2);
        p.select_car(CarId(9), 0.0);
        let x = p.x();
        p.update(1.0, &WalkParams::default(), door);
        assert_eq!(p.x(), x);
        assert_eq!(p.state(), PassengerState::WalkingToCar);
        assert!(p.is_walking_to(CarId(9)));
    }
}
