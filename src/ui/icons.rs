//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::orbiter::OrbitStatus;

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

/// Body currently orbited
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
/// Orbit holding
pub const STABLE: &str = egui_phosphor::regular::CHECK_CIRCLE;
/// Orbit decaying
pub const WARNING: &str = egui_phosphor::regular::WARNING;
/// Free flight
pub const ROCKET: &str = egui_phosphor::regular::ROCKET;
/// Capture
pub const MAGNET: &str = egui_phosphor::regular::MAGNET;
/// Out of bounds
pub const LOST: &str = egui_phosphor::regular::QUESTION;
/// Escape timer
pub const TIMER: &str = egui_phosphor::regular::TIMER;
/// Crash
pub const CRASH: &str = egui_phosphor::regular::SKULL;
/// Restart
pub const RESTART: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
/// Visited bodies
pub const FLAG: &str = egui_phosphor::regular::FLAG;

/// Icon shown next to an orbit status.
pub fn status_icon(status: OrbitStatus) -> &'static str {
    match status {
        OrbitStatus::Stable | OrbitStatus::Stabilized => STABLE,
        OrbitStatus::TooSlow | OrbitStatus::Escaping => WARNING,
        OrbitStatus::FreeFlight => ROCKET,
        OrbitStatus::LostInSpace => LOST,
        OrbitStatus::Captured { .. } => MAGNET,
        OrbitStatus::Falling => CRASH,
    }
}
