//! Flight readout shown during play.
//!
//! Orbiting: speed, first and second cosmic velocity, status, host mass.
//! Free flight: speed, velocity components, status, time left, position and
//! the nearest body.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::orbiter::{FlightState, OrbitStatus};
use crate::physics::find_closest_body;
use crate::session::{time_left_secs, Session};
use crate::simulation::Simulation;

/// One labelled HUD value.
#[derive(Clone, Debug, PartialEq)]
pub struct HudRow {
    pub label: &'static str,
    pub value: String,
}

impl HudRow {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Readout for the current tick.
#[derive(Clone, Debug, PartialEq)]
pub struct HudReadout {
    pub title: &'static str,
    pub status: OrbitStatus,
    pub rows: Vec<HudRow>,
}

/// Build the readout for `simulation`.
pub fn hud_readout(simulation: &Simulation) -> HudReadout {
    let orbiter = simulation.orbiter();
    let config = simulation.config();
    let mut rows = Vec::new();

    let title = match orbiter.state() {
        FlightState::FreeFlight { velocity } => {
            rows.push(HudRow::new("Speed", format!("{:.3}", velocity.length())));
            rows.push(HudRow::new("Velocity", format!("({:.3}, {:.3})", velocity.x, velocity.y)));
            rows.push(HudRow::new(
                "Time left",
                format!("{:.1} s", time_left_secs(orbiter, config)),
            ));
            rows.push(HudRow::new(
                "Position",
                format!("({:.0}, {:.0})", orbiter.pos().x, orbiter.pos().y),
            ));
            if let Some((index, distance)) = find_closest_body(orbiter.pos(), simulation.bodies()) {
                rows.push(HudRow::new("Nearest", format!("body #{index} at {distance:.0}")));
            }
            "Free flight"
        }
        FlightState::Orbiting(orbit) => {
            rows.push(HudRow::new("Speed", format!("{:.3}", orbit.speed)));
            if let Some((v1, v2)) = simulation.host_velocities() {
                rows.push(HudRow::new("1st cosmic", format!("{v1:.3}")));
                rows.push(HudRow::new("2nd cosmic", format!("{v2:.3}")));
            }
            rows.push(HudRow::new("Radius", format!("{:.1}", orbit.radius)));
            if let Some(host) = simulation.host_body() {
                rows.push(HudRow::new("Host mass", format!("{:.0}", host.mass)));
            }
            "Orbiting"
        }
        FlightState::Falling { .. } => "Falling",
    };

    rows.push(HudRow::new(
        "Visited",
        format!("{}/{}", orbiter.visited().len(), simulation.bodies().len()),
    ));

    HudReadout {
        title,
        status: orbiter.status(),
        rows,
    }
}

fn status_color(status: OrbitStatus) -> egui::Color32 {
    match status {
        OrbitStatus::Stable | OrbitStatus::Stabilized | OrbitStatus::Captured { .. } => {
            egui::Color32::from_rgb(100, 220, 120)
        }
        OrbitStatus::FreeFlight => egui::Color32::from_rgb(120, 180, 255),
        _ => egui::Color32::from_rgb(255, 110, 90),
    }
}

/// System to render the flight HUD.
pub fn hud_system(mut contexts: EguiContexts, simulation: Res<Simulation>, session: Res<Session>) {
    if !session.is_playing() {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let readout = hud_readout(&simulation);

    egui::Window::new(format!("{} {}", icons::PLANET, readout.title))
        .id(egui::Id::new("flight_hud"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{} {}", icons::status_icon(readout.status), readout.status))
                    .color(status_color(readout.status)),
            );
            ui.separator();

            egui::Grid::new("hud_rows").num_columns(2).show(ui, |ui| {
                for row in &readout.rows {
                    ui.label(row.label);
                    ui.label(egui::RichText::new(&row.value).monospace());
                    ui.end_row();
                }
            });
        });
}
