//! Core simulation types and tuning constants.
//!
//! Units are game units (pixels and ticks), tuned for feel rather than
//! physical accuracy.

use bevy::math::DVec2;
use bevy::prelude::*;

/// System set for ordering the fixed-rate simulation systems.
///
/// Input sampling must land before the step, and the session check must see
/// the state the step produced.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Advance the orbiter one tick.
    Step,
    /// Evaluate terminal conditions for the session.
    Session,
}

/// Gravitational constant for the journey model (scaled for game speed).
pub const GRAVITATIONAL_CONSTANT: f64 = 0.02;

/// Gravitational constant used by the classic tuning.
pub const CLASSIC_GRAVITATIONAL_CONSTANT: f64 = 0.1;

/// Default gap between a body's surface and its fixed orbit.
pub const DEFAULT_ORBIT_OFFSET: f64 = 20.0;

/// Stable identifier of a gravitating body: its index in the level's body list.
///
/// The orbiter holds one of these instead of a reference, so it never owns or
/// outlives the body it circles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "body #{}", self.0)
    }
}

/// A fixed gravitating point mass with a visual radius.
///
/// Bodies never move and never change mass once a level is built; a new stage
/// replaces the whole set.
#[derive(Clone, Debug, PartialEq)]
pub struct GravityBody {
    /// Centre position.
    pub pos: DVec2,
    /// Surface radius (> 0).
    pub radius: f64,
    /// Mass, proportional to volume (radius³).
    pub mass: f64,
    /// Gravitational constant this body was built with.
    pub g: f64,
    /// Orbit radius used by the fixed-radius model.
    pub orbit_radius: f64,
}

impl GravityBody {
    /// Create a body with the journey gravitational constant.
    pub fn new(pos: DVec2, radius: f64) -> Self {
        Self {
            pos,
            radius,
            mass: radius.powi(3),
            g: GRAVITATIONAL_CONSTANT,
            orbit_radius: radius + DEFAULT_ORBIT_OFFSET,
        }
    }

    /// Replace the gravitational constant.
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    /// Replace the fixed orbit radius.
    pub fn with_orbit_radius(mut self, orbit_radius: f64) -> Self {
        self.orbit_radius = orbit_radius;
        self
    }

    /// Standard gravitational parameter (G·M).
    #[inline]
    pub fn gm(&self) -> f64 {
        self.g * self.mass
    }

    /// Distance from this body's centre to a point.
    #[inline]
    pub fn distance_to(&self, point: DVec2) -> f64 {
        (point - self.pos).length()
    }
}

/// Direction of travel around a host body.
///
/// Angles follow screen convention (y grows downward), so an increasing angle
/// reads as clockwise on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Angle increases each tick.
    #[default]
    Clockwise,
    /// Angle decreases each tick.
    CounterClockwise,
}

impl Rotation {
    /// Sign applied to the angular increment.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Rotation::Clockwise => 1.0,
            Rotation::CounterClockwise => -1.0,
        }
    }

    /// Pick the direction that continues an incoming motion smoothly.
    ///
    /// `cross` is `v × d`: the relative velocity crossed with the position
    /// relative to the new host. Positive means counter-clockwise.
    pub fn from_cross(cross: f64) -> Self {
        if cross > 0.0 {
            Rotation::CounterClockwise
        } else {
            Rotation::Clockwise
        }
    }
}

/// Player signals sampled once per tick.
///
/// The core has no notion of keys; the input layer fills this in.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Increase orbital speed / forward thrust.
    pub increase: bool,
    /// Decrease orbital speed / reverse thrust.
    pub decrease: bool,
    /// Leave the current orbit now (fixed-radius model only).
    pub leave_orbit: bool,
}

impl TickInput {
    /// Input with nothing held.
    pub const IDLE: Self = Self {
        increase: false,
        decrease: false,
        leave_orbit: false,
    };

    /// Hold the increase signal.
    pub const fn increase() -> Self {
        Self {
            increase: true,
            ..Self::IDLE
        }
    }

    /// Hold the decrease signal.
    pub const fn decrease() -> Self {
        Self {
            decrease: true,
            ..Self::IDLE
        }
    }

    /// Press the leave-orbit signal.
    pub const fn leave_orbit() -> Self {
        Self {
            leave_orbit: true,
            ..Self::IDLE
        }
    }
}

/// Axis-aligned play area rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl WorldBounds {
    /// Square play area from the origin.
    pub const fn square(size: f64) -> Self {
        Self {
            min: DVec2::ZERO,
            max: DVec2::new(size, size),
        }
    }

    /// Whether a point lies inside the rectangle (edges included).
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// Tuning constants for the simulation.
///
/// The source game shipped several variants with different margins and no
/// stated rationale, so every one of them is a named field here.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Minimum gap between a body's surface and any orbit around it.
    pub min_clearance: f64,
    /// Extra distance beyond the surface within which capture is attempted.
    pub capture_margin: f64,
    /// Multiplier on the required speed after capture.
    pub capture_safety_margin: f64,
    /// Radius lost per tick while too slow.
    pub crash_step: f64,
    /// Multiplier on the first cosmic velocity after a crash-shrink.
    pub crash_recovery_margin: f64,
    /// If set, falling starts once speed drops below this fraction of the
    /// first cosmic velocity at the shrunk radius.
    pub crash_fall_ratio: Option<f64>,
    /// Speed change per tick of held input while orbiting.
    pub speed_step: f64,
    /// Floor for orbital speed.
    pub min_speed: f64,
    /// Free-flight thrust as a fraction of `speed_step`.
    pub thrust_factor: f64,
    /// Integration step applied to gravitational acceleration.
    pub gravity_scale: f64,
    /// Initial speed as a multiple of the first cosmic velocity.
    pub initial_speed_margin: f64,
    /// Fallback multiple when the initial speed would not be stable.
    pub initial_fallback_margin: f64,
    /// Number of positions kept in the trail.
    pub trail_length: usize,
    /// Play area; leaving it is reported as "lost in space".
    pub world_bounds: WorldBounds,
    /// Free-flight ticks allowed before the session ends.
    pub escape_timeout_ticks: u32,
    /// Nominal tick rate.
    pub tick_rate_hz: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_clearance: 10.0,
            capture_margin: 50.0,
            capture_safety_margin: 1.05,
            crash_step: 5.0,
            crash_recovery_margin: 1.05,
            crash_fall_ratio: None,
            speed_step: 0.02,
            min_speed: 0.05,
            thrust_factor: 0.3,
            gravity_scale: 0.005,
            initial_speed_margin: 1.2,
            initial_fallback_margin: 1.1,
            trail_length: 20,
            world_bounds: WorldBounds::square(256.0),
            escape_timeout_ticks: 150, // 5 s at 30 Hz
            tick_rate_hz: 30.0,
        }
    }
}

impl SimulationConfig {
    /// Tuning for the variable-radius journey game.
    pub fn journey() -> Self {
        Self::default()
    }

    /// The earlier, faster tuning: bigger input steps, stronger gravity pull,
    /// 10% crash recovery and no capture safety margin.
    ///
    /// Insert it as the `SimulationConfig` resource together with
    /// [`LevelConfig::classic`](crate::level::LevelConfig::classic) before
    /// adding the session plugin, so levels are built with
    /// [`CLASSIC_GRAVITATIONAL_CONSTANT`].
    pub fn classic() -> Self {
        Self {
            capture_safety_margin: 1.0,
            crash_recovery_margin: 1.1,
            speed_step: 0.1,
            min_speed: 0.1,
            thrust_factor: 0.5,
            gravity_scale: 0.01,
            ..Self::default()
        }
    }

    /// Escape timeout expressed in seconds at the nominal tick rate.
    pub fn escape_timeout_secs(&self) -> f64 {
        self.escape_timeout_ticks as f64 / self.tick_rate_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_body_mass_is_volume_proportional() {
        let body = GravityBody::new(DVec2::ZERO, 10.0);
        assert_eq!(body.mass, 1000.0);
        assert_relative_eq!(body.gm(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_body_builders() {
        let body = GravityBody::new(DVec2::new(5.0, 5.0), 4.0)
            .with_gravity(CLASSIC_GRAVITATIONAL_CONSTANT)
            .with_orbit_radius(40.0);
        assert_eq!(body.g, CLASSIC_GRAVITATIONAL_CONSTANT);
        assert_eq!(body.orbit_radius, 40.0);
        assert_eq!(body.distance_to(DVec2::new(8.0, 9.0)), 5.0);
    }

    #[test]
    fn test_rotation_from_cross() {
        assert_eq!(Rotation::from_cross(2.0), Rotation::CounterClockwise);
        assert_eq!(Rotation::from_cross(-2.0), Rotation::Clockwise);
        // Head-on approach keeps the default direction
        assert_eq!(Rotation::from_cross(0.0), Rotation::Clockwise);
        assert_eq!(Rotation::Clockwise.sign(), 1.0);
        assert_eq!(Rotation::CounterClockwise.sign(), -1.0);
    }

    #[test]
    fn test_world_bounds_edges_inclusive() {
        let bounds = WorldBounds::square(256.0);
        assert!(bounds.contains(DVec2::new(0.0, 256.0)));
        assert!(!bounds.contains(DVec2::new(-0.1, 10.0)));
        assert!(!bounds.contains(DVec2::new(10.0, 256.5)));
        assert_eq!(bounds.center(), DVec2::splat(128.0));
    }

    #[test]
    fn test_escape_timeout_is_five_seconds() {
        let config = SimulationConfig::default();
        assert_relative_eq!(config.escape_timeout_secs(), 5.0);
    }

    #[test]
    fn test_classic_preset_overrides_margins() {
        let classic = SimulationConfig::classic();
        assert_eq!(classic.crash_recovery_margin, 1.1);
        assert_eq!(classic.capture_safety_margin, 1.0);
        assert_eq!(classic.min_clearance, SimulationConfig::default().min_clearance);
    }
}
