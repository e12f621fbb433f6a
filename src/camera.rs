//! Camera that follows the orbiter.
//!
//! Eases toward the host centre while orbiting and toward the orbiter itself
//! in free flight. Scroll wheel zooms.

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;

use crate::orbiter::FlightPhase;
use crate::render::to_render;
use crate::simulation::Simulation;

/// Fraction of the remaining distance covered per frame.
pub const FOLLOW_FACTOR: f32 = 0.1;

/// Closest zoom.
pub const MIN_ZOOM: f32 = 0.25;

/// Furthest zoom.
pub const MAX_ZOOM: f32 = 4.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing the follow camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            (
                follow_orbiter.run_if(resource_exists::<Simulation>),
                camera_zoom,
            ),
        );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Point the camera should settle on, in render space.
pub fn camera_target(simulation: &Simulation) -> Vec2 {
    let orbiter = simulation.orbiter();
    match (orbiter.phase(), simulation.host_body()) {
        (FlightPhase::StableOrbit | FlightPhase::Falling, Some(host)) => to_render(host.pos),
        _ => to_render(orbiter.pos()),
    }
}

/// One easing step from `current` toward `target`.
pub fn follow_step(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current.lerp(target, factor)
}

fn follow_orbiter(simulation: Res<Simulation>, mut camera: Query<&mut Transform, With<MainCamera>>) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    let current = transform.translation.truncate();
    let next = follow_step(current, camera_target(&simulation), FOLLOW_FACTOR);
    transform.translation.x = next.x;
    transform.translation.y = next.y;
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut camera: Query<&mut Projection, With<MainCamera>>,
) {
    if mouse_scroll.delta.y == 0.0 {
        return;
    }

    let Ok(mut projection) = camera.single_mut() else {
        return;
    };

    let Projection::Orthographic(ref mut ortho) = *projection else {
        return;
    };

    // Logarithmic zoom
    let zoom_factor = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;
    ortho.scale = (ortho.scale * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
}
