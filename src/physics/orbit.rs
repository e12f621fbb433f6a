//! Orbital thresholds derived from a body and a radius.
//!
//! All functions are pure. The stable band at radius `r` is the half-open
//! speed interval `[v1(r), v2)`, where `v1` is the circular-orbit speed and
//! `v2` the escape speed measured at the body's surface.

use crate::types::GravityBody;

/// Failure of an orbit derivation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum OrbitError {
    #[error("orbit radius is undefined for non-positive velocity {0}")]
    NonPositiveVelocity(f64),
}

/// Where a speed falls relative to the stable band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitHealth {
    /// Inside `[v1, v2)`.
    Stable,
    /// Below the first cosmic velocity; the orbit decays.
    TooSlow,
    /// At or above the second cosmic velocity; the body leaves orbit.
    Escape,
}

/// First cosmic velocity: minimum tangential speed for a circular orbit at `r`.
///
/// v1 = sqrt(GM / r)
#[inline]
pub fn first_cosmic_velocity(body: &GravityBody, orbit_radius: f64) -> f64 {
    (body.gm() / orbit_radius).sqrt()
}

/// Second cosmic velocity: escape speed at the body's surface.
///
/// v2 = sqrt(2GM / R)
#[inline]
pub fn second_cosmic_velocity(body: &GravityBody) -> f64 {
    (2.0 * body.gm() / body.radius).sqrt()
}

/// Whether `speed` keeps a stable orbit at `orbit_radius`.
///
/// The lower bound is inclusive (exactly circular is stable), the upper bound
/// exclusive (reaching escape speed ends the orbit).
pub fn can_orbit(body: &GravityBody, speed: f64, orbit_radius: f64) -> bool {
    classify(body, speed, orbit_radius) == OrbitHealth::Stable
}

/// Place `speed` relative to the stable band at `orbit_radius`.
pub fn classify(body: &GravityBody, speed: f64, orbit_radius: f64) -> OrbitHealth {
    if speed >= second_cosmic_velocity(body) {
        OrbitHealth::Escape
    } else if speed < first_cosmic_velocity(body, orbit_radius) {
        OrbitHealth::TooSlow
    } else {
        OrbitHealth::Stable
    }
}

/// Smallest orbit radius allowed around `body`.
#[inline]
pub fn min_orbit_radius(body: &GravityBody, min_clearance: f64) -> f64 {
    body.radius + min_clearance
}

/// Circular orbit radius for a given speed, floored to the minimum clearance.
///
/// Inverts v = sqrt(GM/r) into r = GM / v².
pub fn ideal_orbit_radius_for_velocity(
    body: &GravityBody,
    speed: f64,
    min_clearance: f64,
) -> Result<f64, OrbitError> {
    if speed <= 0.0 || speed.is_nan() {
        return Err(OrbitError::NonPositiveVelocity(speed));
    }
    let radius = body.gm() / (speed * speed);
    Ok(radius.max(min_orbit_radius(body, min_clearance)))
}
