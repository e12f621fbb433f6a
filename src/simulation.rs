//! Fixed-rate simulation step.
//!
//! [`step`] is the only operation the game loop calls: it advances one
//! orbiter exactly one tick against a read-only set of bodies. Bodies are
//! always visited in level order, so replaying the same inputs from the same
//! state gives a bit-identical result.

use bevy::prelude::*;

use crate::level::Level;
use crate::orbiter::{FlightState, OrbitingBody, Transition};
use crate::physics::orbit::{first_cosmic_velocity, second_cosmic_velocity};
use crate::policy::{OrbitModel, OrbitPolicy};
use crate::session::{terminal_condition, GameOverReason, Session};
use crate::types::{BodyId, GravityBody, SimulationConfig, SimulationSet, TickInput};

/// Setup-time misconfiguration. Nothing per-tick ever fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("a level needs at least one gravitating body")]
    NoBodies,

    #[error("initial host {host} does not exist (level has {count} bodies)")]
    UnknownHost { host: BodyId, count: usize },

    #[error("invalid initial orbit radius: {0} (must be positive)")]
    NonPositiveOrbitRadius(f64),

    #[error("orbit radius {radius} is inside the minimum clearance {minimum}")]
    OrbitBelowClearance { radius: f64, minimum: f64 },
}

/// Advance `orbiter` one tick.
///
/// Dispatches on the current state. `bodies` is never mutated. Falling is
/// terminal and leaves the orbiter untouched.
pub fn step<P: OrbitPolicy + ?Sized>(
    orbiter: &mut OrbitingBody,
    bodies: &[GravityBody],
    input: &TickInput,
    policy: &P,
    config: &SimulationConfig,
) -> Option<Transition> {
    match *orbiter.state() {
        FlightState::Orbiting(orbit) => {
            orbiter.record_trail(config.trail_length);
            orbiter.update_orbit(orbit, bodies, input, policy, config)
        }
        FlightState::FreeFlight { velocity } => {
            orbiter.record_trail(config.trail_length);
            orbiter.update_free_flight(velocity, bodies, input, policy, config)
        }
        FlightState::Falling { .. } => None,
    }
}

/// One play session's simulation: the level, the orbiter and its policy.
///
/// Owns the bodies so the orbiter's host id always resolves.
#[derive(Resource)]
pub struct Simulation {
    bodies: Vec<GravityBody>,
    orbiter: OrbitingBody,
    policy: Box<dyn OrbitPolicy>,
    model: OrbitModel,
    config: SimulationConfig,
    tick: u64,
}

impl Simulation {
    /// Build a simulation with the orbiter attached to `host` at `orbit_radius`.
    pub fn new(
        bodies: Vec<GravityBody>,
        host: BodyId,
        orbit_radius: f64,
        model: OrbitModel,
        config: SimulationConfig,
    ) -> Result<Self, SetupError> {
        let policy = model.policy();
        let orbiter = OrbitingBody::new(&bodies, host, orbit_radius, policy.as_ref(), &config)?;

        Ok(Self {
            bodies,
            orbiter,
            policy,
            model,
            config,
            tick: 0,
        })
    }

    /// Build a simulation from a generated level.
    pub fn from_level(level: Level, model: OrbitModel, config: SimulationConfig) -> Result<Self, SetupError> {
        Self::new(level.bodies, level.start, level.start_orbit_radius, model, config)
    }

    /// Advance one tick.
    pub fn step(&mut self, input: &TickInput) -> Option<Transition> {
        self.tick += 1;
        step(&mut self.orbiter, &self.bodies, input, self.policy.as_ref(), &self.config)
    }

    pub fn bodies(&self) -> &[GravityBody] {
        &self.bodies
    }

    pub fn orbiter(&self) -> &OrbitingBody {
        &self.orbiter
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn model(&self) -> OrbitModel {
        self.model
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Ticks advanced since the simulation was built.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Body the orbiter is (or was last) orbiting.
    pub fn host_body(&self) -> Option<&GravityBody> {
        self.bodies.get(self.orbiter.host().0)
    }

    /// First and second cosmic velocity for the current host and orbit, for
    /// display. `None` outside an orbit.
    pub fn host_velocities(&self) -> Option<(f64, f64)> {
        let host = self.host_body()?;
        let radius = self.orbiter.guide_radius()?;
        Some((first_cosmic_velocity(host, radius), second_cosmic_velocity(host)))
    }

    /// Whether the session should end, and why.
    pub fn terminal_condition(&self) -> Option<GameOverReason> {
        terminal_condition(&self.orbiter, &self.config)
    }
}

/// Plugin running the simulation step at the fixed tick rate.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .init_resource::<TickInput>()
            .init_resource::<Session>()
            .configure_sets(FixedUpdate, SimulationSet::Session.after(SimulationSet::Step))
            .add_systems(
                FixedUpdate,
                advance_simulation
                    .in_set(SimulationSet::Step)
                    .run_if(resource_exists::<Simulation>),
            );
    }
}

/// Step the active simulation once per fixed tick.
///
/// Consumes the latched leave-orbit signal so one key press releases once.
fn advance_simulation(
    mut simulation: ResMut<Simulation>,
    mut input: ResMut<TickInput>,
    session: Res<Session>,
) {
    if !session.is_playing() {
        return;
    }

    simulation.step(&input);
    input.leave_orbit = false;
}
