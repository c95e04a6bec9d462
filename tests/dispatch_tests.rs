//! Integration tests for the dispatcher, driven tick by tick

use rs_elevator::{
    hal::RecordingSink, CarEvent, Dispatcher, ElevatorState, EngineError, Load, Refusal, Tick,
    Weight,
};

fn started() -> Dispatcher<RecordingSink> {
    let mut elevator = Dispatcher::new(RecordingSink::new());
    elevator.start().unwrap();
    elevator.sink_mut().clear();
    elevator
}

/// Ticks until the car parks or goes offline, returning the ticks taken.
fn run_until_parked(elevator: &mut Dispatcher<RecordingSink>, limit: usize) -> usize {
    for n in 0..limit {
        if !elevator.state().is_active() {
            return n;
        }
        elevator.tick();
        assert_eq!(elevator.check_invariants(), Ok(()));
    }
    panic!("car still busy after {limit} ticks: {:?}", elevator.snapshot());
}

#[test]
fn passenger_from_three_to_seven_is_delivered() {
    let mut elevator = started();
    elevator.issue_request(1, 3, 7).unwrap();

    assert_eq!(elevator.tick(), Tick::Moved { floor: 2 });
    assert_eq!(elevator.tick(), Tick::Arrived { floor: 3 });
    match elevator.tick() {
        Tick::Serviced(report) => assert_eq!(report.boarded, 1),
        other => panic!("expected a stop, got {other:?}"),
    }
    assert_eq!(elevator.state(), ElevatorState::MovingUp);
    assert_eq!(elevator.next_floor(), 7);

    run_until_parked(&mut elevator, 20);
    assert_eq!(elevator.current_floor(), 7);
    assert_eq!(elevator.serviced()[2], 1);
    assert_eq!(elevator.load(), Load::EMPTY);

    let moves = elevator.sink().moves();
    let expected: Vec<_> = (1..7).map(|f| (f, f + 1)).collect();
    assert_eq!(moves, expected);
}

#[test]
fn full_car_leaves_overflow_for_a_second_trip() {
    let mut elevator = started();
    for _ in 0..6 {
        elevator.issue_request(4, 1, 5).unwrap();
    }
    elevator.issue_request(2, 1, 5).unwrap();
    assert_eq!(elevator.state(), ElevatorState::Loading);

    match elevator.tick() {
        Tick::Serviced(report) => {
            assert_eq!(report.boarded, 5);
            assert_eq!(report.deferred, 2);
        }
        other => panic!("expected a stop, got {other:?}"),
    }
    assert_eq!(elevator.load(), Load::new(10, Weight::new(15, false)));
    assert_eq!(elevator.waiting().count_at(1), 2);

    let refusals: Vec<Refusal> = elevator
        .sink()
        .events()
        .iter()
        .filter_map(|e| match e {
            CarEvent::BoardingDeferred { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(refusals, vec![Refusal::Units, Refusal::Units]);

    // first trip delivers five, then the car returns for the rest
    run_until_parked(&mut elevator, 100);
    assert_eq!(elevator.current_floor(), 5);
    assert_eq!(elevator.serviced()[0], 7);
    assert!(elevator.waiting().is_empty());
    assert_eq!(elevator.sink().unloaded().len(), 7);
}

#[test]
fn second_load_carries_half_step() {
    let mut elevator = started();
    elevator.issue_request(4, 1, 5).unwrap();
    elevator.issue_request(4, 1, 5).unwrap();
    elevator.issue_request(2, 1, 5).unwrap();

    elevator.tick();
    assert_eq!(elevator.load(), Load::new(5, Weight::new(6, true)));
    let snap = elevator.snapshot();
    assert!(rs_elevator::status::render(&snap)
        .contains("Current load: 5 passenger units, 6.5 weight units"));
}

#[test]
fn drain_rejects_new_requests_and_ends_empty() {
    let mut elevator = started();
    elevator.issue_request(1, 1, 8).unwrap();
    elevator.issue_request(3, 1, 6).unwrap();
    elevator.issue_request(1, 9, 2).unwrap();
    elevator.issue_request(2, 4, 3).unwrap();

    elevator.tick(); // boards the two at floor 1
    assert_eq!(elevator.load().units, 3);

    assert_eq!(elevator.request_stop(), Ok(false));
    assert!(elevator.is_draining());
    assert_eq!(elevator.issue_request(1, 2, 3), Err(EngineError::Draining));

    run_until_parked(&mut elevator, 50);
    assert_eq!(elevator.state(), ElevatorState::Offline);
    assert_eq!(elevator.current_floor(), 0);
    assert_eq!(elevator.next_floor(), 0);
    assert_eq!(elevator.load(), Load::EMPTY);
    assert!(elevator.waiting().is_empty());
    assert!(elevator.onboard().is_empty());
    assert_eq!(elevator.serviced()[0], 2);

    assert_eq!(elevator.issue_request(1, 2, 3), Err(EngineError::NotRunning));
}

#[test]
fn repeated_stop_while_draining_is_accepted() {
    let mut elevator = started();
    elevator.issue_request(1, 1, 4).unwrap();
    elevator.tick();

    assert_eq!(elevator.request_stop(), Ok(false));
    assert_eq!(elevator.request_stop(), Ok(false));
    run_until_parked(&mut elevator, 20);
    assert_eq!(elevator.request_stop(), Err(EngineError::NotRunning));
}

#[test]
fn riders_leave_in_floor_order() {
    let mut elevator = started();
    elevator.issue_request(1, 1, 9).unwrap();
    elevator.issue_request(1, 1, 4).unwrap();
    elevator.issue_request(1, 1, 6).unwrap();

    run_until_parked(&mut elevator, 40);
    let order: Vec<u8> = elevator
        .sink()
        .unloaded()
        .iter()
        .map(|p| p.destination)
        .collect();
    assert_eq!(order, vec![4, 6, 9]);
}

#[test]
fn loaded_car_does_not_detour_for_pickups() {
    let mut elevator = started();
    elevator.issue_request(1, 1, 9).unwrap();
    elevator.tick(); // board
    elevator.issue_request(1, 4, 8).unwrap();

    // strict drop-offs first: straight to 9, no stop at 4
    while elevator.current_floor() < 9 {
        assert_ne!(elevator.state(), ElevatorState::Loading);
        elevator.tick();
    }
    assert_eq!(elevator.state(), ElevatorState::Loading);

    run_until_parked(&mut elevator, 40);
    assert_eq!(elevator.serviced()[0], 1);
    assert_eq!(elevator.serviced()[3], 1);
    assert_eq!(elevator.current_floor(), 8);
}

#[test]
fn top_to_bottom_round_trip() {
    let mut elevator = started();
    elevator.issue_request(3, 10, 1).unwrap();

    let ticks = run_until_parked(&mut elevator, 40);
    // 9 up, board, 9 down, unload
    assert_eq!(ticks, 20);
    assert_eq!(elevator.current_floor(), 1);
    assert_eq!(elevator.serviced()[9], 1);
}

#[test]
fn pseudo_random_traffic_is_fully_delivered() {
    let mut elevator = started();
    let mut seed: u64 = 0x5eed_1234;
    let mut next = move |bound: u64| {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) % bound
    };

    let mut issued = 0u32;
    for _ in 0..400 {
        if next(3) == 0 {
            let class = next(4) as i32 + 1;
            let origin = next(10) as i32 + 1;
            let destination = next(10) as i32 + 1;
            elevator.issue_request(class, origin, destination).unwrap();
            issued += 1;
        }
        elevator.tick();

        let load = elevator.load();
        assert!(load.units <= 10);
        assert!(load.weight.as_halves() <= 30);
        assert_eq!(elevator.check_invariants(), Ok(()));
    }

    run_until_parked(&mut elevator, 10_000);
    assert_eq!(elevator.state(), ElevatorState::Idle);
    assert_eq!(elevator.serviced().iter().sum::<u32>(), issued);
    assert!(elevator.waiting().is_empty());
}
