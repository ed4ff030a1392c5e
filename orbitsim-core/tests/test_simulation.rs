//! Tests for the body collection: run flag, CRUD, resets and trails

use glam::DVec3;
use orbitsim_core::engine::{BodySpec, SimConstants};
use orbitsim_core::error::SimError;
use orbitsim_core::integrator::step;
use orbitsim_core::simulation::Simulation;
use orbitsim_core::tests::test_helpers::{earth_constants, spec_at};

fn two_body_simulation() -> Simulation {
    let mut sim = Simulation::new(earth_constants(200.0)).expect("valid constants");
    sim.add_body(spec_at(
        "a",
        DVec3::new(2.1e7, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 5000.0),
    ))
    .expect("valid body");
    sim.add_body(spec_at(
        "b",
        DVec3::new(0.0, 3.0e7, 0.0),
        DVec3::new(4000.0, 0.0, 0.0),
    ))
    .expect("valid body");
    sim
}

#[test]
fn test_paused_tick_leaves_state_untouched() {
    let mut sim = two_body_simulation();
    assert!(!sim.is_running());

    let before: Vec<_> = sim.bodies().iter().map(|s| s.body.clone()).collect();
    for _ in 0..10 {
        let report = sim.tick();
        assert_eq!(report.advanced, 0);
    }
    let after: Vec<_> = sim.bodies().iter().map(|s| s.body.clone()).collect();

    assert_eq!(before, after);
    assert_eq!(sim.ticks(), 0);
}

#[test]
fn test_running_tick_matches_direct_step() {
    let mut sim = two_body_simulation();
    let constants = *sim.constants();
    let expected: Vec<_> = sim
        .bodies()
        .iter()
        .map(|s| step(&constants, s.body.pos, s.body.vel, s.body.mass))
        .collect();

    sim.start();
    let report = sim.tick();

    assert_eq!(report.advanced, 2);
    assert!(report.stalled.is_empty());
    for (slot, next) in sim.bodies().iter().zip(expected) {
        assert_eq!(slot.body.pos, next.position);
        assert_eq!(slot.body.vel, next.velocity);
    }
    assert_eq!(sim.ticks(), 1);
    assert_eq!(sim.elapsed(), 200.0);
}

#[test]
fn test_stop_halts_advancement() {
    let mut sim = two_body_simulation();
    sim.start();
    sim.tick();
    sim.stop();

    let frozen: Vec<_> = sim.bodies().iter().map(|s| s.body.clone()).collect();
    sim.tick();
    let after: Vec<_> = sim.bodies().iter().map(|s| s.body.clone()).collect();
    assert_eq!(frozen, after);

    sim.toggle();
    assert!(sim.is_running());
    sim.tick();
    assert_eq!(sim.ticks(), 2);
}

#[test]
fn test_step_once_ignores_run_flag() {
    let mut sim = two_body_simulation();
    let report = sim.step_once();
    assert_eq!(report.advanced, 2);
    assert!(!sim.is_running());
}

#[test]
fn test_add_rejects_invalid_mass() {
    let mut sim = Simulation::new(SimConstants::default()).expect("valid constants");
    let spec = BodySpec {
        mass: 0.0,
        ..BodySpec::default()
    };
    assert!(matches!(sim.add_body(spec), Err(SimError::InvalidMass(_))));
    assert!(sim.is_empty());
}

#[test]
fn test_remove_body_keeps_others_advancing() {
    let mut sim = two_body_simulation();
    let first = sim.bodies()[0].id;
    let removed = sim.remove_body(first).expect("body exists");
    assert_eq!(removed.name, "a");
    assert_eq!(sim.len(), 1);

    let report = sim.step_once();
    assert_eq!(report.advanced, 1);
    assert_eq!(sim.bodies()[0].body.name, "b");
}

#[test]
fn test_spec_edits_apply_only_on_reset() {
    let mut sim = two_body_simulation();
    let id = sim.bodies()[0].id;
    sim.run_for(5);
    let mid_flight = sim.body(id).expect("body exists").body.clone();

    let edited = spec_at("a", DVec3::new(4.0e7, 0.0, 0.0), DVec3::new(0.0, 3000.0, 0.0));
    sim.update_spec(id, edited.clone()).expect("valid spec");
    assert_eq!(sim.body(id).expect("body exists").body, mid_flight);

    sim.reset_body(id).expect("body exists");
    let slot = sim.body(id).expect("body exists");
    assert_eq!(slot.body.pos, edited.position);
    assert_eq!(slot.body.vel, edited.velocity);
    assert_eq!(slot.trail.len(), 1);
}

#[test]
fn test_update_spec_rejects_invalid_mass() {
    let mut sim = two_body_simulation();
    let id = sim.bodies()[0].id;
    let bad = BodySpec {
        mass: -5.0,
        ..BodySpec::default()
    };
    assert!(matches!(sim.update_spec(id, bad), Err(SimError::InvalidMass(_))));
}

#[test]
fn test_reset_restores_initial_conditions_and_pauses() {
    let mut sim = two_body_simulation();
    let initial: Vec<_> = sim.bodies().iter().map(|s| s.body.clone()).collect();

    sim.start();
    for _ in 0..20 {
        sim.tick();
    }
    sim.reset().expect("reset succeeds");

    let after: Vec<_> = sim.bodies().iter().map(|s| s.body.clone()).collect();
    assert_eq!(initial, after);
    assert_eq!(sim.ticks(), 0);
    assert!(!sim.is_running());
}

#[test]
fn test_trail_follows_body_and_stays_bounded() {
    let mut sim = Simulation::new(earth_constants(200.0))
        .expect("valid constants")
        .with_trail_length(8);
    let id = sim.add_body(BodySpec::default()).expect("valid body");

    sim.run_for(3);
    let slot = sim.body(id).expect("body exists");
    assert_eq!(slot.trail.len(), 4);
    assert_eq!(slot.trail.latest(), Some(slot.body.pos));

    sim.run_for(20);
    let slot = sim.body(id).expect("body exists");
    assert_eq!(slot.trail.len(), 8);
    assert_eq!(slot.trail.latest(), Some(slot.body.pos));
}

#[test]
fn test_runs_are_reproducible() {
    let mut first = two_body_simulation();
    let mut second = two_body_simulation();
    first.run_for(500);
    second.run_for(500);

    for (a, b) in first.bodies().iter().zip(second.bodies()) {
        assert_eq!(a.body, b.body);
    }
}

#[test]
fn test_body_at_center_never_goes_non_finite() {
    let mut sim = Simulation::new(earth_constants(200.0)).expect("valid constants");
    let id = sim
        .add_body(spec_at("core", DVec3::ZERO, DVec3::ZERO))
        .expect("valid body");

    let stalled = sim.run_for(10);
    assert!(stalled.is_empty());
    let slot = sim.body(id).expect("body exists");
    assert!(!slot.stalled);
    assert_eq!(slot.body.pos, DVec3::ZERO);
}
