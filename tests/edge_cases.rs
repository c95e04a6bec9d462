//! Edge case and boundary condition tests for the dispatcher

use rs_elevator::{
    hal::{NullSink, RecordingSink},
    status, CapacityLedger, CarEvent, Dispatcher, ElevatorSnapshot, ElevatorState, EngineError,
    InvalidArgument, Load, Passenger, PassengerClass, Refusal, Weight,
};

fn started() -> Dispatcher<RecordingSink> {
    let mut elevator = Dispatcher::new(RecordingSink::new());
    elevator.start().unwrap();
    elevator
}

// ============================================================================
// Argument Bounds
// ============================================================================

#[test]
fn class_bounds() {
    let mut elevator = started();
    assert_eq!(
        elevator.issue_request(0, 1, 2),
        Err(EngineError::InvalidArgument(InvalidArgument::Class(0)))
    );
    assert_eq!(
        elevator.issue_request(5, 1, 2),
        Err(EngineError::InvalidArgument(InvalidArgument::Class(5)))
    );
    for class in 1..=4 {
        assert!(elevator.issue_request(class, 2, 3).is_ok());
    }
}

#[test]
fn floor_bounds() {
    let mut elevator = started();
    for bad in [-1, 0, 11, i32::MAX] {
        assert_eq!(
            elevator.issue_request(1, bad, 2),
            Err(EngineError::InvalidArgument(InvalidArgument::Origin(bad)))
        );
        assert_eq!(
            elevator.issue_request(1, 2, bad),
            Err(EngineError::InvalidArgument(InvalidArgument::Destination(bad)))
        );
    }
    assert_eq!(elevator.snapshot().waiting, [0; 10]);
    assert_eq!(elevator.state(), ElevatorState::Idle);
}

#[test]
fn invalid_argument_wins_over_not_running() {
    let mut elevator = Dispatcher::new(NullSink);
    assert_eq!(
        elevator.issue_request(9, 1, 2),
        Err(EngineError::InvalidArgument(InvalidArgument::Class(9)))
    );
    assert_eq!(elevator.issue_request(1, 1, 2), Err(EngineError::NotRunning));
}

// ============================================================================
// Same-Floor Requests
// ============================================================================

#[test]
fn same_floor_request_is_served_in_place() {
    let mut elevator = started();
    elevator.issue_request(1, 1, 1).unwrap();
    assert_eq!(elevator.state(), ElevatorState::Loading);

    elevator.tick();
    assert_eq!(elevator.state(), ElevatorState::Idle);
    assert_eq!(elevator.serviced()[0], 1);
    assert_eq!(elevator.load(), Load::EMPTY);
    assert!(elevator
        .sink()
        .events()
        .iter()
        .any(|e| matches!(e, CarEvent::ServedInPlace { .. })));
}

#[test]
fn same_floor_request_elsewhere_travels_first() {
    let mut elevator = started();
    elevator.issue_request(2, 4, 4).unwrap();
    assert_eq!(elevator.state(), ElevatorState::MovingUp);

    while elevator.state().is_active() {
        elevator.tick();
    }
    assert_eq!(elevator.current_floor(), 4);
    assert_eq!(elevator.serviced()[3], 1);
    assert!(elevator.sink().boarded().is_empty());
}

// ============================================================================
// Requests During Each State
// ============================================================================

#[test]
fn request_while_loading_does_not_reseed() {
    let mut elevator = started();
    elevator.issue_request(1, 1, 5).unwrap();
    assert_eq!(elevator.next_floor(), 5);

    elevator.issue_request(1, 8, 2).unwrap();
    assert_eq!(elevator.state(), ElevatorState::Loading);
    assert_eq!(elevator.next_floor(), 5);
    assert_eq!(elevator.waiting().count_at(8), 1);
}

#[test]
fn request_behind_empty_car_does_not_shorten() {
    let mut elevator = started();
    elevator.issue_request(1, 6, 9).unwrap();
    elevator.tick(); // floor 2
    elevator.tick(); // floor 3

    // below the car, and a pickup going the wrong way
    elevator.issue_request(1, 2, 9).unwrap();
    elevator.issue_request(1, 4, 1).unwrap();
    assert_eq!(elevator.next_floor(), 6);

    // ahead of the car and going up
    elevator.issue_request(1, 5, 7).unwrap();
    assert_eq!(elevator.next_floor(), 5);
}

#[test]
fn request_in_offline_car_after_drain() {
    let mut elevator = started();
    assert_eq!(elevator.request_stop(), Ok(true));
    assert_eq!(elevator.state(), ElevatorState::Offline);
    assert_eq!(elevator.issue_request(1, 1, 2), Err(EngineError::NotRunning));
}

#[test]
fn stop_while_moving_to_pickup_goes_offline_immediately() {
    let mut elevator = started();
    elevator.issue_request(1, 7, 2).unwrap();
    elevator.tick();

    // nobody aboard yet, so nothing to deliver
    assert_eq!(elevator.request_stop(), Ok(true));
    let snap = elevator.snapshot();
    assert_eq!(snap.state, ElevatorState::Offline);
    assert_eq!((snap.current_floor, snap.next_floor), (0, 0));
    assert_eq!(snap.waiting, [0; 10]);
    assert!(elevator
        .sink()
        .events()
        .iter()
        .any(|e| matches!(e, CarEvent::Discarded { count: 1 })));
}

// ============================================================================
// Capacity Boundaries
// ============================================================================

#[test]
fn exact_ceiling_without_half_step_is_admitted() {
    let mut ledger = CapacityLedger::with_load(Load::new(8, Weight::new(12, false)));
    let heavy = Passenger::new(PassengerClass::Heavy, 1, 2);
    assert_eq!(ledger.admit(&heavy), Ok(()));
    assert_eq!(ledger.load(), Load::new(10, Weight::new(15, false)));
}

#[test]
fn half_step_at_ceiling_is_refused() {
    let ledger = CapacityLedger::with_load(Load::new(5, Weight::new(12, true)));
    let heavy = Passenger::new(PassengerClass::Heavy, 1, 2);
    assert_eq!(ledger.check(&heavy), Err(Refusal::HalfStepCeiling));

    let ledger = CapacityLedger::with_load(Load::new(5, Weight::new(15, false)));
    let child = Passenger::new(PassengerClass::Child, 1, 2);
    assert_eq!(ledger.check(&child), Err(Refusal::HalfStepCeiling));
}

#[test]
fn over_weight_is_refused() {
    let ledger = CapacityLedger::with_load(Load::new(4, Weight::new(13, false)));
    let heavy = Passenger::new(PassengerClass::Heavy, 1, 2);
    assert_eq!(ledger.check(&heavy), Err(Refusal::Weight));
}

#[test]
fn deferred_passenger_keeps_queue_position() {
    let mut elevator = started();
    for _ in 0..5 {
        elevator.issue_request(4, 1, 3).unwrap();
    }
    elevator.issue_request(1, 1, 2).unwrap();
    elevator.issue_request(2, 1, 2).unwrap();

    elevator.tick();
    assert_eq!(elevator.load().units, 10);
    let left: Vec<PassengerClass> = elevator.waiting().iter().map(|p| p.class).collect();
    assert_eq!(left, vec![PassengerClass::Adult, PassengerClass::Child]);
}

// ============================================================================
// Status Text
// ============================================================================

#[test]
fn status_text_for_fresh_start() {
    let elevator = started();
    let text = status::render(&elevator.snapshot());
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("State: IDLE"));
    assert_eq!(lines.next(), Some("Current floor: 1"));
    assert_eq!(lines.next(), Some("Next floor: 1"));
    assert_eq!(
        lines.next(),
        Some("Current load: 0 passenger units, 0 weight units")
    );
    assert_eq!(lines.next(), Some(""));
    for floor in 1..=10 {
        assert_eq!(
            lines.next().map(str::to_owned),
            Some(format!(
                "Floor {floor}: 0 passengers waiting, 0 passengers serviced"
            ))
        );
    }
    assert_eq!(lines.next(), None);
}

#[test]
fn default_snapshot_is_offline() {
    let snap = ElevatorSnapshot::default();
    assert_eq!(snap.state, ElevatorState::Offline);
    assert_eq!(snap, Dispatcher::new(NullSink).snapshot());
}
