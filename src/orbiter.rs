//! The controlled orbiting body and its state machine.
//!
//! States:
//! - [`FlightState::Orbiting`]: circular orbit around the host, driven by a
//!   scalar speed.
//! - [`FlightState::FreeFlight`]: cartesian velocity under multi-body gravity
//!   until a capture.
//! - [`FlightState::Falling`]: terminal; the orbit decayed into the host.
//!
//! Scalar speed and cartesian velocity live in different variants, so only one
//! of them is ever authoritative.

use std::collections::{BTreeSet, VecDeque};
use std::f64::consts::FRAC_PI_2;

use bevy::log::{debug, info, warn};
use bevy::math::DVec2;

use crate::physics::capture::{resolve_capture, Capture};
use crate::physics::compute_acceleration;
use crate::physics::orbit::{first_cosmic_velocity, min_orbit_radius, OrbitHealth};
use crate::policy::OrbitPolicy;
use crate::simulation::SetupError;
use crate::types::{BodyId, GravityBody, Rotation, SimulationConfig, TickInput};

/// Circular orbit around the current host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    /// Distance from the host centre.
    pub radius: f64,
    /// Tangential speed (never negative).
    pub speed: f64,
    pub rotation: Rotation,
}

impl Orbit {
    /// Angle advanced per tick.
    #[inline]
    pub fn angular_speed(&self) -> f64 {
        self.speed / self.radius
    }
}

/// Kinematic state of the orbiter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlightState {
    Orbiting(Orbit),
    FreeFlight { velocity: DVec2 },
    /// Terminal. Keeps the last orbit radius for display.
    Falling { orbit_radius: f64 },
}

/// Tag-only view of [`FlightState`] for presentation and session logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlightPhase {
    StableOrbit,
    FreeFlight,
    Falling,
}

impl FlightState {
    pub fn phase(&self) -> FlightPhase {
        match self {
            FlightState::Orbiting(_) => FlightPhase::StableOrbit,
            FlightState::FreeFlight { .. } => FlightPhase::FreeFlight,
            FlightState::Falling { .. } => FlightPhase::Falling,
        }
    }
}

/// Orbital health as shown to the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitStatus {
    Stable,
    /// The initial speed had to be lowered to fit the band.
    Stabilized,
    /// Below the first cosmic velocity; the orbit is shrinking.
    TooSlow,
    /// Reached escape speed on this tick.
    Escaping,
    FreeFlight,
    /// Free flight outside the world bounds.
    LostInSpace,
    Captured { radius: f64 },
    Falling,
}

impl std::fmt::Display for OrbitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrbitStatus::Stable => write!(f, "Stable orbit"),
            OrbitStatus::Stabilized => write!(f, "Orbit stabilized"),
            OrbitStatus::TooSlow => write!(f, "Too slow! Crashing into planet!"),
            OrbitStatus::Escaping => write!(f, "Escape velocity reached! Leaving orbit!"),
            OrbitStatus::FreeFlight => write!(f, "Free flight in space"),
            OrbitStatus::LostInSpace => write!(f, "Lost in space..."),
            OrbitStatus::Captured { radius } => write!(f, "Captured! New orbit at {radius:.1}px"),
            OrbitStatus::Falling => write!(f, "Falling into planet!"),
        }
    }
}

/// State change produced by a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// Orbit left for free flight with this velocity.
    Escaped { velocity: DVec2 },
    /// Orbit shrank while too slow and is still held.
    Descended { radius: f64 },
    /// Captured into a new orbit.
    Captured(Capture),
    /// Orbit decayed past the minimum clearance.
    Fell,
}

/// The player-controlled body.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitingBody {
    pub(crate) pos: DVec2,
    /// Orbital angle while orbiting; heading of the velocity in free flight.
    pub(crate) angle: f64,
    pub(crate) state: FlightState,
    pub(crate) host: BodyId,
    pub(crate) trail: VecDeque<DVec2>,
    pub(crate) escape_ticks: u32,
    pub(crate) status: OrbitStatus,
    pub(crate) visited: BTreeSet<BodyId>,
}

impl OrbitingBody {
    /// Attach a new orbiter to `host` at `orbit_radius`, angle zero.
    ///
    /// The policy picks the starting speed (and, for fixed orbits, the radius).
    pub fn new<P: OrbitPolicy + ?Sized>(
        bodies: &[GravityBody],
        host: BodyId,
        orbit_radius: f64,
        policy: &P,
        config: &SimulationConfig,
    ) -> Result<Self, SetupError> {
        if bodies.is_empty() {
            return Err(SetupError::NoBodies);
        }
        let host_body = bodies.get(host.0).ok_or(SetupError::UnknownHost {
            host,
            count: bodies.len(),
        })?;
        if orbit_radius <= 0.0 || orbit_radius.is_nan() {
            return Err(SetupError::NonPositiveOrbitRadius(orbit_radius));
        }

        let initial = policy.initial_orbit(host_body, orbit_radius, config);
        let minimum = min_orbit_radius(host_body, config.min_clearance);
        if initial.radius < minimum {
            return Err(SetupError::OrbitBelowClearance {
                radius: initial.radius,
                minimum,
            });
        }

        let orbit = Orbit {
            radius: initial.radius,
            speed: initial.speed,
            rotation: initial.rotation,
        };
        let mut orbiter = Self::in_orbit(host, host_body, orbit, 0.0);
        orbiter.status = initial.status;
        Ok(orbiter)
    }

    /// Orbiter on `orbit` around `host_body` at `angle`, skipping setup checks.
    pub fn in_orbit(host: BodyId, host_body: &GravityBody, orbit: Orbit, angle: f64) -> Self {
        Self {
            pos: host_body.pos + DVec2::from_angle(angle) * orbit.radius,
            angle,
            state: FlightState::Orbiting(orbit),
            host,
            trail: VecDeque::new(),
            escape_ticks: 0,
            status: OrbitStatus::Stable,
            visited: BTreeSet::from([host]),
        }
    }

    /// Orbiter already in free flight, last hosted by `host`.
    pub fn in_free_flight(host: BodyId, pos: DVec2, velocity: DVec2) -> Self {
        Self {
            pos,
            angle: heading_angle(velocity).unwrap_or(0.0),
            state: FlightState::FreeFlight { velocity },
            host,
            trail: VecDeque::new(),
            escape_ticks: 0,
            status: OrbitStatus::FreeFlight,
            visited: BTreeSet::from([host]),
        }
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.state.phase()
    }

    /// Body currently (or most recently) orbited.
    pub fn host(&self) -> BodyId {
        self.host
    }

    /// Recent positions, oldest first.
    pub fn trail(&self) -> &VecDeque<DVec2> {
        &self.trail
    }

    /// Ticks spent in the current free flight; zero otherwise.
    pub fn escape_ticks(&self) -> u32 {
        self.escape_ticks
    }

    /// Seconds spent in the current free flight at `tick_rate_hz`.
    pub fn escape_secs(&self, tick_rate_hz: f64) -> f64 {
        self.escape_ticks as f64 / tick_rate_hz
    }

    pub fn status(&self) -> OrbitStatus {
        self.status
    }

    /// Bodies orbited so far, including the starting host.
    pub fn visited(&self) -> &BTreeSet<BodyId> {
        &self.visited
    }

    /// Whether every body in a level of `body_count` bodies has been orbited.
    pub fn all_visited(&self, body_count: usize) -> bool {
        (0..body_count).all(|index| self.visited.contains(&BodyId(index)))
    }

    pub fn orbit(&self) -> Option<&Orbit> {
        match &self.state {
            FlightState::Orbiting(orbit) => Some(orbit),
            _ => None,
        }
    }

    /// Cartesian velocity in free flight.
    pub fn velocity(&self) -> Option<DVec2> {
        match self.state {
            FlightState::FreeFlight { velocity } => Some(velocity),
            _ => None,
        }
    }

    /// Current speed magnitude regardless of state (zero when falling).
    pub fn speed(&self) -> f64 {
        match self.state {
            FlightState::Orbiting(orbit) => orbit.speed,
            FlightState::FreeFlight { velocity } => velocity.length(),
            FlightState::Falling { .. } => 0.0,
        }
    }

    /// Orbit radius to draw a guide for (orbiting or falling).
    pub fn guide_radius(&self) -> Option<f64> {
        match self.state {
            FlightState::Orbiting(orbit) => Some(orbit.radius),
            FlightState::Falling { orbit_radius } => Some(orbit_radius),
            FlightState::FreeFlight { .. } => None,
        }
    }

    pub fn is_falling(&self) -> bool {
        matches!(self.state, FlightState::Falling { .. })
    }

    /// Record the current position in the bounded trail.
    pub(crate) fn record_trail(&mut self, capacity: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > capacity {
            self.trail.pop_front();
        }
    }

    /// One tick of orbital motion.
    pub(crate) fn update_orbit<P: OrbitPolicy + ?Sized>(
        &mut self,
        mut orbit: Orbit,
        bodies: &[GravityBody],
        input: &TickInput,
        policy: &P,
        config: &SimulationConfig,
    ) -> Option<Transition> {
        let Some(host) = bodies.get(self.host.0) else {
            warn!("Host {} missing from level, releasing orbiter", self.host);
            return Some(self.release(orbit));
        };

        orbit.speed = policy.adjust_speed(orbit.speed, input, config);

        if input.leave_orbit && policy.releases_on_command() {
            return Some(self.release(orbit));
        }

        let mut transition = None;
        match policy.assess(host, orbit.speed, orbit.radius) {
            OrbitHealth::Stable => self.status = OrbitStatus::Stable,
            OrbitHealth::TooSlow => {
                self.status = OrbitStatus::TooSlow;
                match self.descend(&mut orbit, host, config) {
                    Some(fell @ Transition::Fell) => return Some(fell),
                    other => transition = other,
                }
            }
            OrbitHealth::Escape => {
                self.status = OrbitStatus::Escaping;
                return Some(self.release(orbit));
            }
        }

        self.angle += orbit.rotation.sign() * orbit.angular_speed();
        self.pos = host.pos + DVec2::from_angle(self.angle) * orbit.radius;
        self.state = FlightState::Orbiting(orbit);

        transition
    }

    /// Shrink a too-slow orbit toward the host, or fall into it.
    fn descend(&mut self, orbit: &mut Orbit, host: &GravityBody, config: &SimulationConfig) -> Option<Transition> {
        let floor = min_orbit_radius(host, config.min_clearance);
        let shrunk = (orbit.radius - config.crash_step).max(floor);

        if shrunk <= floor {
            return Some(self.fall(orbit.radius));
        }

        let v1 = first_cosmic_velocity(host, shrunk);
        if let Some(ratio) = config.crash_fall_ratio {
            if orbit.speed < v1 * ratio {
                return Some(self.fall(shrunk));
            }
        }

        orbit.radius = shrunk;
        if orbit.speed < v1 {
            orbit.speed = v1 * config.crash_recovery_margin;
        }

        debug!(
            "Orbit decayed to {:.1} around {}, speed {:.3}",
            orbit.radius, self.host, orbit.speed
        );
        Some(Transition::Descended { radius: orbit.radius })
    }

    fn fall(&mut self, orbit_radius: f64) -> Transition {
        info!("Orbiter falling into {}", self.host);
        self.state = FlightState::Falling { orbit_radius };
        self.status = OrbitStatus::Falling;
        Transition::Fell
    }

    /// Leave orbit along the tangent, keeping the speed.
    fn release(&mut self, orbit: Orbit) -> Transition {
        let velocity = DVec2::from_angle(self.angle + FRAC_PI_2) * (orbit.speed * orbit.rotation.sign());

        info!(
            "Leaving orbit around {} at speed {:.3}",
            self.host, orbit.speed
        );

        self.state = FlightState::FreeFlight { velocity };
        if let Some(heading) = heading_angle(velocity) {
            self.angle = heading;
        }
        self.trail.clear();
        self.escape_ticks = 0;
        if self.status != OrbitStatus::Escaping {
            self.status = OrbitStatus::FreeFlight;
        }

        Transition::Escaped { velocity }
    }

    /// One tick of free flight: thrust, gravity, capture, then integration.
    pub(crate) fn update_free_flight<P: OrbitPolicy + ?Sized>(
        &mut self,
        mut velocity: DVec2,
        bodies: &[GravityBody],
        input: &TickInput,
        policy: &P,
        config: &SimulationConfig,
    ) -> Option<Transition> {
        if policy.free_flight_dynamics() {
            let heading = velocity.try_normalize().unwrap_or_else(|| DVec2::from_angle(self.angle));
            let thrust = config.speed_step * config.thrust_factor;
            if input.increase {
                velocity += heading * thrust;
            } else if input.decrease {
                velocity -= heading * thrust;
            }

            // Explicit Euler with a fixed step
            velocity += compute_acceleration(self.pos, bodies) * config.gravity_scale;
        }

        if let Some(capture) = resolve_capture(policy, bodies, self.host, self.pos, velocity, config) {
            if let Some(body) = bodies.get(capture.host.0) {
                self.enter_orbit(capture, body);
                return Some(Transition::Captured(capture));
            }
        }

        self.pos += velocity;
        if let Some(heading) = heading_angle(velocity) {
            self.angle = heading;
        }
        self.escape_ticks = self.escape_ticks.saturating_add(1);
        self.state = FlightState::FreeFlight { velocity };
        self.status = if config.world_bounds.contains(self.pos) {
            OrbitStatus::FreeFlight
        } else {
            OrbitStatus::LostInSpace
        };

        None
    }

    fn enter_orbit(&mut self, capture: Capture, body: &GravityBody) {
        let orbit = Orbit {
            radius: capture.orbit.radius,
            speed: capture.orbit.speed,
            rotation: capture.orbit.rotation,
        };
        let offset = self.pos - body.pos;

        self.host = capture.host;
        self.angle = offset.y.atan2(offset.x);
        self.pos = body.pos + DVec2::from_angle(self.angle) * orbit.radius;
        self.state = FlightState::Orbiting(orbit);
        self.escape_ticks = 0;
        self.status = OrbitStatus::Captured { radius: orbit.radius };
        self.visited.insert(capture.host);

        info!(
            "Captured by {}: radius {:.1}, speed {:.3}",
            capture.host, orbit.radius, orbit.speed
        );
    }
}

/// Direction of a velocity as an angle, if it is non-zero.
fn heading_angle(velocity: DVec2) -> Option<f64> {
    (velocity != DVec2::ZERO).then(|| velocity.y.atan2(velocity.x))
}
