//! Gizmo rendering of the level, the orbit guide and the orbiter.
//!
//! The simulation works in a y-down world of game units; everything here maps
//! it into Bevy's y-up render space with [`to_render`].

use bevy::math::{DVec2, Isometry2d};
use bevy::prelude::*;

use crate::orbiter::{FlightState, OrbitStatus, OrbitingBody};
use crate::simulation::Simulation;
use crate::types::{BodyId, WorldBounds};

/// Render units per game unit.
pub const RENDER_SCALE: f32 = 3.0;

/// Centre of the default 256-unit world, mapped to the render origin.
pub const WORLD_ORIGIN: DVec2 = DVec2::new(128.0, 128.0);

/// Heading indicator length per unit of speed.
const HEADING_LENGTH: f32 = 8.0;

/// Orbiter dot radius in game units.
const ORBITER_RADIUS: f32 = 2.0;

const STABLE_GUIDE: Color = Color::srgba(0.2, 0.9, 0.3, 0.6);
const UNSTABLE_GUIDE: Color = Color::srgba(0.95, 0.25, 0.2, 0.7);
const BODY_COLOR: Color = Color::srgb(0.55, 0.6, 0.75);
const VISITED_BODY_COLOR: Color = Color::srgb(0.95, 0.8, 0.35);
const ORBITER_COLOR: Color = Color::WHITE;
const BOUNDS_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.1);

/// Plugin drawing the active simulation every frame.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)))
            .add_systems(Update, draw_simulation.run_if(resource_exists::<Simulation>));
    }
}

/// Map a y-down world position into render space.
pub fn to_render(pos: DVec2) -> Vec2 {
    let local = pos - WORLD_ORIGIN;
    Vec2::new(local.x as f32, -local.y as f32) * RENDER_SCALE
}

/// Guide colour: green while the orbit holds, red while it is failing.
pub fn guide_color(status: OrbitStatus) -> Color {
    match status {
        OrbitStatus::Stable | OrbitStatus::Stabilized | OrbitStatus::Captured { .. } => STABLE_GUIDE,
        _ => UNSTABLE_GUIDE,
    }
}

/// Trail segment colour, fading toward the oldest point.
fn trail_color(index: usize, len: usize) -> Color {
    let alpha = (index + 1) as f32 / len.max(1) as f32;
    Color::srgba(0.6, 0.8, 1.0, 0.8 * alpha)
}

fn draw_simulation(mut gizmos: Gizmos, simulation: Res<Simulation>) {
    let orbiter = simulation.orbiter();

    draw_bounds(&mut gizmos, &simulation.config().world_bounds);

    for (index, body) in simulation.bodies().iter().enumerate() {
        let color = if orbiter.visited().contains(&BodyId(index)) {
            VISITED_BODY_COLOR
        } else {
            BODY_COLOR
        };
        gizmos.circle_2d(
            Isometry2d::from_translation(to_render(body.pos)),
            body.radius as f32 * RENDER_SCALE,
            color,
        );
    }

    if let (Some(host), Some(radius)) = (simulation.host_body(), orbiter.guide_radius()) {
        gizmos.circle_2d(
            Isometry2d::from_translation(to_render(host.pos)),
            radius as f32 * RENDER_SCALE,
            guide_color(orbiter.status()),
        );
    }

    draw_trail(&mut gizmos, orbiter);

    let pos = to_render(orbiter.pos());
    gizmos.circle_2d(Isometry2d::from_translation(pos), ORBITER_RADIUS * RENDER_SCALE, ORBITER_COLOR);

    if let FlightState::FreeFlight { velocity } = orbiter.state() {
        let tip = pos + to_render_direction(*velocity) * HEADING_LENGTH * RENDER_SCALE;
        gizmos.line_2d(pos, tip, ORBITER_COLOR);
    }
}

fn draw_trail(gizmos: &mut Gizmos, orbiter: &OrbitingBody) {
    let trail = orbiter.trail();
    let len = trail.len();
    for (index, (from, to)) in trail.iter().zip(trail.iter().skip(1)).enumerate() {
        gizmos.line_2d(to_render(*from), to_render(*to), trail_color(index, len));
    }
}

fn draw_bounds(gizmos: &mut Gizmos, bounds: &WorldBounds) {
    let size = bounds.size();
    gizmos.rect_2d(
        Isometry2d::from_translation(to_render(bounds.center())),
        Vec2::new(size.x as f32, size.y as f32) * RENDER_SCALE,
        BOUNDS_COLOR,
    );
}

/// Velocity in render space, unscaled.
fn to_render_direction(velocity: DVec2) -> Vec2 {
    Vec2::new(velocity.x as f32, -velocity.y as f32)
}
