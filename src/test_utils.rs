//! Test utilities for orbital simulation tests.
//!
//! Provides fixtures for common body layouts and orbiters, and assertions for
//! the geometric invariants of a held orbit.

use bevy::math::DVec2;

use crate::orbiter::{Orbit, OrbitingBody};
use crate::types::{BodyId, GravityBody, Rotation};

/// Fixtures for creating test layouts.
pub mod fixtures {
    use super::*;

    /// One body of radius 10 at the centre of the default world.
    ///
    /// GM = 20, so the second cosmic velocity is exactly 2 and the first cosmic
    /// velocity at radius 30 is about 0.8165.
    pub fn single_body() -> Vec<GravityBody> {
        vec![GravityBody::new(DVec2::new(128.0, 128.0), 10.0)]
    }

    /// Two radius-10 bodies on the same horizontal line, 120 units apart.
    ///
    /// Far enough that a point 30 units from one is outside the other's
    /// capture range.
    pub fn two_bodies() -> Vec<GravityBody> {
        vec![
            GravityBody::new(DVec2::new(60.0, 128.0), 10.0),
            GravityBody::new(DVec2::new(180.0, 128.0), 10.0),
        ]
    }

    /// Orbiter circling body 0 clockwise at angle zero, with no setup checks.
    pub fn orbiter_at(bodies: &[GravityBody], radius: f64, speed: f64) -> OrbitingBody {
        let orbit = Orbit {
            radius,
            speed,
            rotation: Rotation::Clockwise,
        };
        OrbitingBody::in_orbit(BodyId(0), &bodies[0], orbit, 0.0)
    }
}

/// Assertions for orbit invariants.
pub mod assertions {
    use super::*;

    /// Assert the orbiter sits on its orbit circle around `host`.
    pub fn assert_on_orbit(orbiter: &OrbitingBody, host: &GravityBody) {
        let orbit = orbiter.orbit().expect("orbiter should be orbiting");
        let distance = orbiter.pos().distance(host.pos);
        assert!(
            (distance - orbit.radius).abs() < 1e-9 * orbit.radius.max(1.0),
            "orbiter at distance {distance} but orbit radius is {}",
            orbit.radius
        );
    }
}
