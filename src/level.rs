//! Seeded level generation.
//!
//! A level is an ordered, non-empty list of bodies plus the body and radius the
//! orbiter starts on. Generation is deterministic for a seed: the same seed and
//! config always produce the same layout.

use bevy::log::{debug, warn};
use bevy::math::DVec2;
use bevy::prelude::Resource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::policy::OrbitModel;
use crate::types::{BodyId, GravityBody, CLASSIC_GRAVITATIONAL_CONSTANT, DEFAULT_ORBIT_OFFSET, GRAVITATIONAL_CONSTANT};

/// Generated body layout and starting orbit.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    /// Bodies in iteration order. Never empty.
    pub bodies: Vec<GravityBody>,
    pub start: BodyId,
    pub start_orbit_radius: f64,
    pub seed: u64,
}

impl Level {
    pub fn start_body(&self) -> Option<&GravityBody> {
        self.bodies.get(self.start.0)
    }
}

/// Parameters for the variable-radius journey layout.
#[derive(Clone, Debug, PartialEq)]
pub struct JourneyLayout {
    /// Range for each coordinate of the start body's centre.
    pub start_center: (f64, f64),
    pub start_radius: (f64, f64),
    /// Gap between the start body's surface and its orbit.
    pub start_orbit_offset: f64,
    /// Number of bodies placed besides the start body.
    pub extra_count: (usize, usize),
    pub body_radius: (f64, f64),
    /// Distance kept between a body's surface and the world edge.
    pub edge_margin: f64,
    /// Minimum surface-to-surface distance between bodies.
    pub spacing: f64,
    /// Minimum distance between a body's surface and the starting orbit.
    pub start_orbit_clearance: f64,
    pub attempts: usize,
}

impl Default for JourneyLayout {
    fn default() -> Self {
        Self {
            start_center: (100.0, 156.0),
            start_radius: (5.0, 10.0),
            start_orbit_offset: DEFAULT_ORBIT_OFFSET,
            extra_count: (3, 5),
            body_radius: (3.0, 12.0),
            edge_margin: 25.0,
            spacing: 25.0,
            start_orbit_clearance: 15.0,
            attempts: 100,
        }
    }
}

/// Parameters for the fixed-radius tour layout.
#[derive(Clone, Debug, PartialEq)]
pub struct TourLayout {
    pub count: (usize, usize),
    /// Range each body must lie within, surface included.
    pub area: (f64, f64),
    pub body_radius: (f64, f64),
    /// Minimum surface-to-surface distance between bodies.
    pub spacing: f64,
    pub attempts: usize,
}

impl Default for TourLayout {
    fn default() -> Self {
        Self {
            count: (5, 8),
            area: (30.0, 226.0),
            body_radius: (8.0, 25.0),
            spacing: 40.0,
            attempts: 50,
        }
    }
}

/// Level generation parameters for both models.
///
/// Count ranges may be given in either order, and a zero attempt budget still
/// places the first body of a tour.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct LevelConfig {
    /// Side of the square world the layouts are placed in.
    pub world_size: f64,
    /// Gravitational constant every generated body is built with.
    pub gravitational_constant: f64,
    pub journey: JourneyLayout,
    pub tour: TourLayout,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            world_size: 256.0,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            journey: JourneyLayout::default(),
            tour: TourLayout::default(),
        }
    }
}

impl LevelConfig {
    /// Layouts with the stronger classic gravity. Pair with
    /// [`SimulationConfig::classic`](crate::types::SimulationConfig::classic).
    pub fn classic() -> Self {
        Self {
            gravitational_constant: CLASSIC_GRAVITATIONAL_CONSTANT,
            ..Self::default()
        }
    }

    fn body(&self, pos: DVec2, radius: f64) -> GravityBody {
        GravityBody::new(pos, radius).with_gravity(self.gravitational_constant)
    }
}

/// Generate a level for `model` from `seed`.
pub fn generate(model: OrbitModel, seed: u64, config: &LevelConfig) -> Level {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    match model {
        OrbitModel::Journey => journey_layout(&mut rng, seed, config),
        OrbitModel::Tour => tour_layout(&mut rng, seed, config),
    }
}

fn journey_layout(rng: &mut ChaChaRng, seed: u64, config: &LevelConfig) -> Level {
    let layout = &config.journey;

    let start_pos = DVec2::new(
        sample(rng, layout.start_center),
        sample(rng, layout.start_center),
    );
    let start = config.body(start_pos, sample(rng, layout.start_radius));
    let start_orbit_radius = start.radius + layout.start_orbit_offset;
    let keep_out = start_orbit_radius + layout.start_orbit_clearance;

    let mut bodies = vec![start];
    let wanted = count(rng, layout.extra_count);

    for index in 0..wanted {
        let placed = (0..layout.attempts).find_map(|_| {
            let radius = sample(rng, layout.body_radius);
            let low = layout.edge_margin + radius;
            let high = config.world_size - layout.edge_margin - radius;
            let pos = DVec2::new(sample(rng, (low, high)), sample(rng, (low, high)));

            let clear_of_start = pos.distance(start_pos) - radius >= keep_out;
            let spaced = surface_gaps_ok(&bodies, pos, radius, layout.spacing);
            (clear_of_start && spaced).then(|| config.body(pos, radius))
        });

        match placed {
            Some(body) => bodies.push(body),
            None => debug!(
                "Could not place journey body {} after {} attempts (seed {seed})",
                index + 1,
                layout.attempts
            ),
        }
    }

    if bodies.len() < wanted + 1 {
        warn!(
            "Journey level for seed {seed} has {} of {} bodies",
            bodies.len(),
            wanted + 1
        );
    }

    Level {
        bodies,
        start: BodyId(0),
        start_orbit_radius,
        seed,
    }
}

fn tour_layout(rng: &mut ChaChaRng, seed: u64, config: &LevelConfig) -> Level {
    let layout = &config.tour;
    let wanted = count(rng, layout.count).max(1);
    let mut bodies: Vec<GravityBody> = Vec::with_capacity(wanted);

    for index in 0..wanted {
        // The first body needs one draw even with no attempt budget
        let attempts = if bodies.is_empty() { layout.attempts.max(1) } else { layout.attempts };
        let placed = (0..attempts).find_map(|_| {
            let radius = sample(rng, layout.body_radius);
            let span = (layout.area.0 + radius, layout.area.1 - radius);
            let pos = DVec2::new(sample(rng, span), sample(rng, span));
            surface_gaps_ok(&bodies, pos, radius, layout.spacing).then(|| config.body(pos, radius))
        });

        match placed {
            Some(body) => bodies.push(body),
            None => debug!(
                "Could not place tour body {} after {} attempts (seed {seed})",
                index + 1,
                layout.attempts
            ),
        }
    }

    if bodies.len() < wanted {
        warn!("Tour level for seed {seed} has {} of {wanted} bodies", bodies.len());
    }

    // The first candidate never conflicts, so `bodies` is non-empty here
    let start = BodyId(rng.random_range(0..bodies.len().max(1)));
    let start_orbit_radius = bodies.get(start.0).map_or(0.0, |body| body.orbit_radius);

    Level {
        bodies,
        start,
        start_orbit_radius,
        seed,
    }
}

/// Whether a body at `pos` keeps `spacing` between its surface and every
/// existing body's surface.
fn surface_gaps_ok(bodies: &[GravityBody], pos: DVec2, radius: f64, spacing: f64) -> bool {
    bodies
        .iter()
        .all(|other| pos.distance(other.pos) - radius - other.radius >= spacing)
}

/// Uniform count from an inclusive range given in either order.
fn count(rng: &mut ChaChaRng, (a, b): (usize, usize)) -> usize {
    rng.random_range(a.min(b)..=a.max(b))
}

/// Uniform sample from an inclusive range, tolerating a degenerate range.
fn sample(rng: &mut ChaChaRng, (low, high): (f64, f64)) -> f64 {
    if high > low {
        rng.random_range(low..=high)
    } else {
        low
    }
}
