use crate::demo::{CarError, CarState, ScenarioError, ScenarioSpec};
use crate::sim::SimError;

#[test]
fn scenario_parses_minimal_json_with_defaults() {
    let raw = r#"{ "until": 15, "cars": [ {}, { "name": "taxi", "start": 1 } ] }"#;
    let spec = ScenarioSpec::from_json(raw).expect("parse scenario");
    assert_eq!(spec.until, 15.0);
    assert_eq!(spec.cars.len(), 2);
    assert!(spec.cars[0].name.is_none());
    assert_eq!(spec.cars[0].parking, 5.0);
    assert_eq!(spec.cars[0].driving, 2.0);
    assert_eq!(spec.cars[1].name.as_deref(), Some("taxi"));
    assert_eq!(spec.cars[1].start, 1.0);
}

#[test]
fn scenario_without_cars_only_advances_the_clock() {
    let spec = ScenarioSpec::from_json(r#"{ "until": 3.5 }"#).expect("parse scenario");
    let outcome = spec.run(false).expect("run");
    assert_eq!(outcome.final_time, 3.5);
    assert_eq!(outcome.events, 0);
    assert!(outcome.trace.is_empty());
}

#[test]
fn scenario_rejects_negative_until() {
    let err = ScenarioSpec::from_json(r#"{ "until": -1 }"#).expect_err("negative until");
    assert!(matches!(err, ScenarioError::Json(_)));
}

#[test]
fn scenario_rejects_zero_cycle_car() {
    let spec = ScenarioSpec::from_json(r#"{ "until": 5, "cars": [ { "parking": 0, "driving": 0 } ] }"#)
        .expect("parse scenario");
    let err = spec.run(false).expect_err("zero cycle");
    assert!(matches!(err, ScenarioError::Car(CarError::ZeroCycle { ref car }) if car == "car-0"));
}

#[test]
fn scenario_rejects_negative_start() {
    let spec = ScenarioSpec::from_json(r#"{ "until": 5, "cars": [ { "start": -2 } ] }"#)
        .expect("parse scenario");
    let err = spec.run(false).expect_err("negative start");
    assert!(matches!(err, ScenarioError::Sim(SimError::InvalidDelay { .. })));
}

#[test]
fn scenario_fails_instead_of_spinning_at_large_clock_values() {
    let spec = ScenarioSpec::from_json(
        r#"{ "until": 2e16, "cars": [ { "parking": 0.5, "driving": 0.5, "start": 1e16 } ] }"#,
    )
    .expect("parse scenario");
    let err = spec.run(false).expect_err("stalled car");
    assert!(matches!(err, ScenarioError::Sim(SimError::Action(_))));
    assert!(err.to_string().contains("cannot advance the clock"));
}

#[test]
fn fleet_runs_every_car_and_counts_events() {
    let spec = ScenarioSpec::fleet(2, 5.0, 2.0, 15.0).expect("fleet");
    let outcome = spec.run(true).expect("run");

    assert_eq!(outcome.final_time, 15.0);
    assert_eq!(outcome.trace.len(), 10);
    assert_eq!(outcome.events, 10);
    assert_eq!(outcome.trace[0].car, "car-0");
    assert_eq!(outcome.trace[1].car, "car-1");
    assert!(outcome.trace.iter().filter(|r| r.car == "car-1").map(|r| r.state).eq([
        CarState::Parking,
        CarState::Driving,
        CarState::Parking,
        CarState::Driving,
        CarState::Parking,
    ]));
}

#[test]
fn outcome_serializes_trace_records() {
    let outcome = ScenarioSpec::fleet(1, 5.0, 2.0, 6.0)
        .expect("fleet")
        .run(false)
        .expect("run");
    let json = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(json["final_time"], 6.0);
    assert_eq!(json["trace"][1]["state"], "driving");
    assert_eq!(json["trace"][1]["time"], 5.0);
}
