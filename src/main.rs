//! Orbital Journey - a small orbital mechanics game
//!
//! Hold an orbit between the first and second cosmic velocity, break free,
//! and get captured by the next body.

use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orbital_journey::camera::CameraPlugin;
use orbital_journey::input::InputPlugin;
use orbital_journey::render::RenderPlugin;
use orbital_journey::session::{Session, SessionPlugin};
use orbital_journey::simulation::SimulationPlugin;
use orbital_journey::types::SimulationConfig;
use orbital_journey::ui::UiPlugin;

fn main() {
    let config = SimulationConfig::journey();
    // Different layout every launch; restarts then walk the seed forward
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(1);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbital Journey".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz))
        .insert_resource(Session::with_seed(seed))
        .insert_resource(config)
        .add_plugins((SimulationPlugin, SessionPlugin, InputPlugin, CameraPlugin, RenderPlugin, UiPlugin))
        .run();
}
