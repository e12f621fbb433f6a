//! UI module providing the egui HUD and session screens.

pub mod hud;
pub mod icons;
mod overlays;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::simulation::Simulation;

pub use hud::{hud_readout, HudReadout, HudRow};
pub use overlays::game_over_headline;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    overlays::title_screen_system,
                    overlays::game_over_system,
                    hud::hud_system.run_if(resource_exists::<Simulation>),
                )
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}
