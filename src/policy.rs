//! Orbit-radius policies.
//!
//! The orbiter runs one state machine; a policy decides how radius and speed
//! relate, how input changes speed, and how capture works. Two policies exist:
//!
//! - [`VelocityOrbits`]: the radius follows from speed through the cosmic
//!   velocities (the journey game).
//! - [`FixedOrbits`]: every body has a constant orbit radius and the orbiter
//!   moves at a constant angular speed (the "visit every body" tour).

use crate::physics::capture::{in_capture_range, stable_capture_parameters, CaptureCandidate, CaptureOrbit};
use crate::physics::orbit::{can_orbit, classify, first_cosmic_velocity, OrbitHealth};
use crate::orbiter::OrbitStatus;
use crate::types::{GravityBody, Rotation, SimulationConfig, TickInput};

/// Angular speed of the tour model, in radians per tick.
pub const TOUR_ANGULAR_SPEED: f64 = 0.05;

/// Orbit chosen when an orbiter is first attached to a host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialOrbit {
    pub radius: f64,
    pub speed: f64,
    pub rotation: Rotation,
    pub status: OrbitStatus,
}

/// Strategy plugged into the orbiter state machine.
pub trait OrbitPolicy: Send + Sync {
    /// Short name for logs and the HUD.
    fn name(&self) -> &'static str;

    /// Orbit for a fresh orbiter around `host` at the requested radius.
    fn initial_orbit(&self, host: &GravityBody, orbit_radius: f64, config: &SimulationConfig) -> InitialOrbit;

    /// Speed after this tick's input has been applied.
    fn adjust_speed(&self, speed: f64, input: &TickInput, config: &SimulationConfig) -> f64;

    /// Where the current orbit sits relative to the stable band.
    fn assess(&self, host: &GravityBody, speed: f64, orbit_radius: f64) -> OrbitHealth;

    /// Whether the leave-orbit signal releases the orbiter.
    fn releases_on_command(&self) -> bool;

    /// Whether free flight feels gravity and player thrust.
    fn free_flight_dynamics(&self) -> bool;

    /// Orbit around `candidate` if it captures the orbiter this tick.
    fn capture(&self, candidate: &CaptureCandidate<'_>, config: &SimulationConfig) -> Option<CaptureOrbit>;
}

/// Radius derived from speed: the journey game.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityOrbits;

impl OrbitPolicy for VelocityOrbits {
    fn name(&self) -> &'static str {
        "journey"
    }

    fn initial_orbit(&self, host: &GravityBody, orbit_radius: f64, config: &SimulationConfig) -> InitialOrbit {
        let v1 = first_cosmic_velocity(host, orbit_radius);
        let speed = v1 * config.initial_speed_margin;

        let (speed, status) = if can_orbit(host, speed, orbit_radius) {
            (speed, OrbitStatus::Stable)
        } else {
            (v1 * config.initial_fallback_margin, OrbitStatus::Stabilized)
        };

        InitialOrbit {
            radius: orbit_radius,
            speed,
            rotation: Rotation::Clockwise,
            status,
        }
    }

    fn adjust_speed(&self, speed: f64, input: &TickInput, config: &SimulationConfig) -> f64 {
        if input.increase {
            speed + config.speed_step
        } else if input.decrease {
            (speed - config.speed_step).max(config.min_speed)
        } else {
            speed
        }
    }

    fn assess(&self, host: &GravityBody, speed: f64, orbit_radius: f64) -> OrbitHealth {
        classify(host, speed, orbit_radius)
    }

    fn releases_on_command(&self) -> bool {
        false
    }

    fn free_flight_dynamics(&self) -> bool {
        true
    }

    fn capture(&self, candidate: &CaptureCandidate<'_>, config: &SimulationConfig) -> Option<CaptureOrbit> {
        let distance = candidate.distance();
        if !in_capture_range(candidate.body, distance, config) {
            return None;
        }

        let (radius, speed) =
            stable_capture_parameters(candidate.body, candidate.velocity.length(), distance, config)?;

        Some(CaptureOrbit {
            radius,
            speed,
            rotation: Rotation::Clockwise,
        })
    }
}

/// Constant per-body radius and angular speed: the tour game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedOrbits {
    /// Radians advanced per tick.
    pub angular_speed: f64,
}

impl Default for FixedOrbits {
    fn default() -> Self {
        Self {
            angular_speed: TOUR_ANGULAR_SPEED,
        }
    }
}

impl FixedOrbits {
    fn orbit_around(&self, body: &GravityBody, rotation: Rotation) -> CaptureOrbit {
        CaptureOrbit {
            radius: body.orbit_radius,
            speed: self.angular_speed * body.orbit_radius,
            rotation,
        }
    }
}

impl OrbitPolicy for FixedOrbits {
    fn name(&self) -> &'static str {
        "tour"
    }

    fn initial_orbit(&self, host: &GravityBody, _orbit_radius: f64, _config: &SimulationConfig) -> InitialOrbit {
        let orbit = self.orbit_around(host, Rotation::Clockwise);
        InitialOrbit {
            radius: orbit.radius,
            speed: orbit.speed,
            rotation: orbit.rotation,
            status: OrbitStatus::Stable,
        }
    }

    fn adjust_speed(&self, speed: f64, _input: &TickInput, _config: &SimulationConfig) -> f64 {
        speed
    }

    fn assess(&self, _host: &GravityBody, _speed: f64, _orbit_radius: f64) -> OrbitHealth {
        OrbitHealth::Stable
    }

    fn releases_on_command(&self) -> bool {
        true
    }

    fn free_flight_dynamics(&self) -> bool {
        false
    }

    fn capture(&self, candidate: &CaptureCandidate<'_>, _config: &SimulationConfig) -> Option<CaptureOrbit> {
        // The body just left can't pull the orbiter straight back
        if candidate.id == candidate.current_host {
            return None;
        }

        let distance = candidate.distance();
        if distance > candidate.body.orbit_radius || distance <= candidate.body.radius {
            return None;
        }

        let cross = candidate.velocity.perp_dot(candidate.offset);
        Some(self.orbit_around(candidate.body, Rotation::from_cross(cross)))
    }
}

/// Which policy a session plays with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrbitModel {
    /// Variable radius, multi-body free flight.
    #[default]
    Journey,
    /// Fixed radius, visit every body.
    Tour,
}

impl OrbitModel {
    /// Boxed policy for this model.
    pub fn policy(self) -> Box<dyn OrbitPolicy> {
        match self {
            OrbitModel::Journey => Box::new(VelocityOrbits),
            OrbitModel::Tour => Box::new(FixedOrbits::default()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrbitModel::Journey => "Orbital Journey",
            OrbitModel::Tour => "Planet Tour",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BodyId;
    use approx::assert_relative_eq;
    use bevy::math::DVec2;

    #[test]
    fn test_journey_initial_orbit_is_twenty_percent_above_v1() {
        let config = SimulationConfig::default();
        let host = GravityBody::new(DVec2::ZERO, 10.0);
        let initial = VelocityOrbits.initial_orbit(&host, 30.0, &config);

        assert_relative_eq!(initial.speed, first_cosmic_velocity(&host, 30.0) * 1.2, epsilon = 1e-12);
        assert_eq!(initial.status, OrbitStatus::Stable);
        assert!(can_orbit(&host, initial.speed, initial.radius));
    }

    #[test]
    fn test_journey_initial_orbit_falls_back() {
        // Make the band narrow enough that 1.2 * v1 reaches escape speed:
        // v1(r)/v2 = sqrt(R / 2r), so at r = 0.6R the ratio is ~0.913
        let config = SimulationConfig::default();
        let host = GravityBody::new(DVec2::ZERO, 10.0);
        let initial = VelocityOrbits.initial_orbit(&host, 6.0, &config);

        assert_eq!(initial.status, OrbitStatus::Stabilized);
        assert_relative_eq!(initial.speed, first_cosmic_velocity(&host, 6.0) * 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_journey_speed_input() {
        let config = SimulationConfig::default();
        assert_relative_eq!(VelocityOrbits.adjust_speed(1.0, &TickInput::increase(), &config), 1.02);
        assert_relative_eq!(VelocityOrbits.adjust_speed(1.0, &TickInput::decrease(), &config), 0.98);
        assert_eq!(VelocityOrbits.adjust_speed(0.06, &TickInput::decrease(), &config), 0.05);
        assert_eq!(VelocityOrbits.adjust_speed(1.0, &TickInput::IDLE, &config), 1.0);

        let both = TickInput {
            increase: true,
            decrease: true,
            leave_orbit: false,
        };
        assert_relative_eq!(VelocityOrbits.adjust_speed(1.0, &both, &config), 1.02);
    }

    #[test]
    fn test_tour_ignores_speed_input_and_is_always_stable() {
        let config = SimulationConfig::default();
        let host = GravityBody::new(DVec2::ZERO, 10.0);
        let tour = FixedOrbits::default();

        assert_eq!(tour.adjust_speed(1.5, &TickInput::increase(), &config), 1.5);
        assert_eq!(tour.assess(&host, 100.0, 11.0), OrbitHealth::Stable);
        assert_eq!(tour.assess(&host, 0.0, 11.0), OrbitHealth::Stable);
    }

    #[test]
    fn test_tour_initial_orbit_uses_body_radius() {
        let config = SimulationConfig::default();
        let host = GravityBody::new(DVec2::ZERO, 10.0).with_orbit_radius(35.0);
        let initial = FixedOrbits::default().initial_orbit(&host, 99.0, &config);
        assert_eq!(initial.radius, 35.0);
        assert_relative_eq!(initial.speed, 35.0 * TOUR_ANGULAR_SPEED);
    }

    #[test]
    fn test_tour_capture_direction_follows_cross_product() {
        let config = SimulationConfig::default();
        let body = GravityBody::new(DVec2::ZERO, 10.0).with_orbit_radius(30.0);
        let tour = FixedOrbits::default();

        // Orbiter above the body (y = -25 on screen), moving right: v × d < 0
        let moving_right = CaptureCandidate {
            id: BodyId(1),
            body: &body,
            current_host: BodyId(0),
            offset: DVec2::new(0.0, -25.0),
            velocity: DVec2::new(1.0, 0.0),
        };
        let orbit = tour.capture(&moving_right, &config).unwrap();
        assert_eq!(orbit.rotation, Rotation::Clockwise);
        assert_eq!(orbit.radius, 30.0);

        let moving_left = CaptureCandidate {
            velocity: DVec2::new(-1.0, 0.0),
            ..moving_right
        };
        assert_eq!(
            tour.capture(&moving_left, &config).unwrap().rotation,
            Rotation::CounterClockwise
        );
    }

    #[test]
    fn test_tour_never_recaptures_current_host() {
        let config = SimulationConfig::default();
        let body = GravityBody::new(DVec2::ZERO, 10.0).with_orbit_radius(30.0);
        let candidate = CaptureCandidate {
            id: BodyId(0),
            body: &body,
            current_host: BodyId(0),
            offset: DVec2::new(20.0, 0.0),
            velocity: DVec2::Y,
        };
        assert!(FixedOrbits::default().capture(&candidate, &config).is_none());
    }

    #[test]
    fn test_tour_capture_bounds() {
        let config = SimulationConfig::default();
        let body = GravityBody::new(DVec2::ZERO, 10.0).with_orbit_radius(30.0);
        let tour = FixedOrbits::default();
        let at = |distance: f64| CaptureCandidate {
            id: BodyId(1),
            body: &body,
            current_host: BodyId(0),
            offset: DVec2::new(distance, 0.0),
            velocity: DVec2::Y,
        };

        assert!(tour.capture(&at(30.0), &config).is_some(), "orbit radius is inclusive");
        assert!(tour.capture(&at(30.5), &config).is_none());
        assert!(tour.capture(&at(10.0), &config).is_none(), "surface is exclusive");
    }

    #[test]
    fn test_model_policies() {
        assert_eq!(OrbitModel::Journey.policy().name(), "journey");
        assert_eq!(OrbitModel::Tour.policy().name(), "tour");
        assert!(!OrbitModel::Journey.policy().releases_on_command());
        assert!(OrbitModel::Tour.policy().releases_on_command());
    }
}
