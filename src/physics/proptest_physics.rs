//! Property-based tests for the orbit and capture rules using proptest.
//!
//! These check the invariants across a wide range of body sizes, radii and
//! approach speeds rather than a handful of hand-picked values.

use bevy::math::DVec2;
use proptest::prelude::*;

use crate::physics::capture::stable_capture_parameters;
use crate::physics::orbit::{
    can_orbit, first_cosmic_velocity, ideal_orbit_radius_for_velocity, min_orbit_radius, second_cosmic_velocity,
};
use crate::policy::VelocityOrbits;
use crate::simulation::step;
use crate::test_utils::{assertions, fixtures};
use crate::types::{BodyId, GravityBody, SimulationConfig, TickInput};

fn body(radius: f64) -> GravityBody {
    GravityBody::new(DVec2::ZERO, radius)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Wider orbits need less speed.
    #[test]
    fn prop_first_cosmic_velocity_decreases_with_radius(
        radius in 1.0f64..40.0,
        r in 1.0f64..500.0,
        extra in 0.1f64..500.0,
    ) {
        let b = body(radius);
        prop_assert!(first_cosmic_velocity(&b, r) > first_cosmic_velocity(&b, r + extra));
    }

    /// The first cosmic velocity at the surface times √2 is the second.
    #[test]
    fn prop_sqrt_two_relation(radius in 0.5f64..100.0) {
        let b = body(radius);
        let v1 = first_cosmic_velocity(&b, radius);
        let v2 = second_cosmic_velocity(&b);
        prop_assert!((v1 * std::f64::consts::SQRT_2 - v2).abs() <= 1e-12 * v2.max(1.0));
    }

    /// The band is closed below and open above.
    #[test]
    fn prop_band_is_half_open(radius in 1.0f64..40.0, factor in 1.0f64..20.0) {
        let b = body(radius);
        let r = radius * factor;
        let v1 = first_cosmic_velocity(&b, r);
        let v2 = second_cosmic_velocity(&b);

        prop_assert!(can_orbit(&b, v1, r));
        prop_assert!(!can_orbit(&b, v2, r));
        prop_assert!(!can_orbit(&b, v1 * 0.999, r));
    }

    /// The ideal radius never violates the clearance.
    #[test]
    fn prop_ideal_radius_respects_clearance(
        radius in 1.0f64..40.0,
        speed in 0.001f64..10.0,
        clearance in 0.0f64..30.0,
    ) {
        let b = body(radius);
        let r = ideal_orbit_radius_for_velocity(&b, speed, clearance).unwrap();
        prop_assert!(r >= min_orbit_radius(&b, clearance));
    }

    /// Any accepted capture lands inside the band, above the lower edge.
    #[test]
    fn prop_capture_lands_in_band(
        radius in 2.0f64..25.0,
        gap in 0.1f64..50.0,
        speed in 0.0f64..5.0,
    ) {
        let config = SimulationConfig::default();
        let b = body(radius);
        let distance = radius + gap;

        if let Some((r, s)) = stable_capture_parameters(&b, speed, distance, &config) {
            prop_assert!(r >= min_orbit_radius(&b, config.min_clearance) || r == distance);
            prop_assert!(can_orbit(&b, s, r));
            prop_assert!(s >= first_cosmic_velocity(&b, r) * config.capture_safety_margin);
        }
    }

    /// A held orbit keeps the orbiter exactly on its circle.
    #[test]
    fn prop_orbit_stays_on_circle(
        radius in 30.0f64..60.0,
        speed_factor in 1.0f64..1.4,
        inputs in prop::collection::vec(0u8..3, 1..60),
    ) {
        let config = SimulationConfig::default();
        let bodies = fixtures::single_body();
        let speed = first_cosmic_velocity(&bodies[0], radius) * speed_factor;
        let mut orbiter = fixtures::orbiter_at(&bodies, radius, speed);

        for code in inputs {
            let input = match code {
                0 => TickInput::IDLE,
                1 => TickInput::increase(),
                _ => TickInput::decrease(),
            };
            step(&mut orbiter, &bodies, &input, &VelocityOrbits, &config);
            if orbiter.orbit().is_none() {
                break;
            }
            prop_assert_eq!(orbiter.host(), BodyId(0));
            assertions::assert_on_orbit(&orbiter, &bodies[0]);
            prop_assert!(orbiter.trail().len() <= config.trail_length);
        }
    }

    /// Same state and inputs give bit-identical results.
    #[test]
    fn prop_step_is_deterministic(
        vx in -2.0f64..2.0,
        vy in -2.0f64..2.0,
        ticks in 1usize..120,
    ) {
        let config = SimulationConfig::default();
        let bodies = fixtures::two_bodies();
        let start = crate::orbiter::OrbitingBody::in_free_flight(
            BodyId(0),
            DVec2::new(120.0, 90.0),
            DVec2::new(vx, vy),
        );

        let mut a = start.clone();
        let mut b = start;
        for _ in 0..ticks {
            let ta = step(&mut a, &bodies, &TickInput::IDLE, &VelocityOrbits, &config);
            let tb = step(&mut b, &bodies, &TickInput::IDLE, &VelocityOrbits, &config);
            prop_assert_eq!(ta, tb);
        }
        prop_assert_eq!(a, b);
    }
}
