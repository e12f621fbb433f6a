//! Re-capture of a free-flying orbiter into a new orbit.
//!
//! Bodies are evaluated in level order and the first acceptance wins, so two
//! simultaneous candidates always resolve the same way regardless of which is
//! closer.

use bevy::math::DVec2;

use crate::physics::orbit::{can_orbit, first_cosmic_velocity, ideal_orbit_radius_for_velocity, min_orbit_radius};
use crate::policy::OrbitPolicy;
use crate::types::{BodyId, GravityBody, Rotation, SimulationConfig};

/// Orbit adopted when a capture is accepted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOrbit {
    /// Radius of the new orbit around the capturing body.
    pub radius: f64,
    /// Tangential speed on that orbit.
    pub speed: f64,
    /// Direction of travel on that orbit.
    pub rotation: Rotation,
}

/// An accepted capture: which body, and the orbit around it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capture {
    pub host: BodyId,
    pub orbit: CaptureOrbit,
}

/// A body being considered for capture this tick.
#[derive(Clone, Copy, Debug)]
pub struct CaptureCandidate<'a> {
    pub id: BodyId,
    pub body: &'a GravityBody,
    /// Body the orbiter last orbited.
    pub current_host: BodyId,
    /// Orbiter position relative to the candidate's centre.
    pub offset: DVec2,
    /// Orbiter velocity.
    pub velocity: DVec2,
}

impl CaptureCandidate<'_> {
    /// Straight-line distance between the orbiter and the candidate centre.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.offset.length()
    }
}

/// Whether a body at `distance` is close enough for gravity to catch the
/// orbiter, and not already overlapping it.
pub fn in_capture_range(body: &GravityBody, distance: f64, config: &SimulationConfig) -> bool {
    distance > body.radius && distance < body.radius + config.capture_margin
}

/// Stable orbit parameters for capturing at `distance` with approach `speed`.
///
/// Prefers the current distance as the new radius so the orbiter does not jump;
/// falls back to the ideal radius for the speed when the current distance is
/// inside the minimum clearance. The resulting speed is never below the
/// circular speed times the safety margin, keeping it off the fragile lower
/// edge of the band.
///
/// # Returns
/// `(radius, speed)` inside the stable band, or `None` if no stable orbit exists.
pub fn stable_capture_parameters(
    body: &GravityBody,
    speed: f64,
    distance: f64,
    config: &SimulationConfig,
) -> Option<(f64, f64)> {
    let radius = if distance >= min_orbit_radius(body, config.min_clearance) {
        distance
    } else {
        ideal_orbit_radius_for_velocity(body, speed, config.min_clearance).ok()?
    };

    let required = first_cosmic_velocity(body, radius);
    let stable_speed = speed.max(required * config.capture_safety_margin);

    can_orbit(body, stable_speed, radius).then_some((radius, stable_speed))
}

/// Find the first body, in level order, that captures the orbiter.
pub fn resolve_capture<P: OrbitPolicy + ?Sized>(
    policy: &P,
    bodies: &[GravityBody],
    current_host: BodyId,
    position: DVec2,
    velocity: DVec2,
    config: &SimulationConfig,
) -> Option<Capture> {
    bodies.iter().enumerate().find_map(|(index, body)| {
        let candidate = CaptureCandidate {
            id: BodyId(index),
            body,
            current_host,
            offset: position - body.pos,
            velocity,
        };
        policy
            .capture(&candidate, config)
            .map(|orbit| Capture { host: candidate.id, orbit })
    })
}
