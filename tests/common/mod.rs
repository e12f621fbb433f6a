//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::DVec2;
use orbital_journey::orbiter::{FlightPhase, OrbitingBody, Transition};
use orbital_journey::policy::OrbitPolicy;
use orbital_journey::simulation::step;
use orbital_journey::types::{GravityBody, SimulationConfig, TickInput};

/// Two radius-10 bodies 120 units apart on a horizontal line.
pub fn two_bodies() -> Vec<GravityBody> {
    vec![
        GravityBody::new(DVec2::new(60.0, 128.0), 10.0),
        GravityBody::new(DVec2::new(180.0, 128.0), 10.0),
    ]
}

/// A single radius-10 body at the centre of the world.
pub fn single_body() -> Vec<GravityBody> {
    vec![GravityBody::new(DVec2::new(128.0, 128.0), 10.0)]
}

/// Step until `done` returns true or `max_ticks` pass. Returns every
/// transition seen, in order.
pub fn run_until<P: OrbitPolicy + ?Sized>(
    orbiter: &mut OrbitingBody,
    bodies: &[GravityBody],
    input: TickInput,
    policy: &P,
    config: &SimulationConfig,
    max_ticks: usize,
    mut done: impl FnMut(&OrbitingBody) -> bool,
) -> Vec<Transition> {
    let mut transitions = Vec::new();
    for _ in 0..max_ticks {
        if let Some(transition) = step(orbiter, bodies, &input, policy, config) {
            transitions.push(transition);
        }
        if done(orbiter) {
            break;
        }
    }
    transitions
}

/// Step until the orbiter reaches `phase`.
pub fn run_until_phase<P: OrbitPolicy + ?Sized>(
    orbiter: &mut OrbitingBody,
    bodies: &[GravityBody],
    input: TickInput,
    policy: &P,
    config: &SimulationConfig,
    phase: FlightPhase,
    max_ticks: usize,
) -> Vec<Transition> {
    run_until(orbiter, bodies, input, policy, config, max_ticks, |o| o.phase() == phase)
}

/// Input script cycling through idle, increase and decrease.
pub fn scripted_input(tick: usize) -> TickInput {
    match (tick / 7) % 3 {
        0 => TickInput::IDLE,
        1 => TickInput::increase(),
        _ => TickInput::decrease(),
    }
}
