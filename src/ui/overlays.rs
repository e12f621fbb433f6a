//! Title and game-over screens.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::policy::OrbitModel;
use crate::session::{GameOverReason, Session, SessionPhase, SessionRequest};
use crate::simulation::Simulation;

/// Headline and icon for a game-over reason.
pub fn game_over_headline(reason: GameOverReason) -> (&'static str, &'static str) {
    match reason {
        GameOverReason::OutOfBounds => (icons::LOST, "LOST IN SPACE"),
        GameOverReason::EscapeTimeout => (icons::TIMER, "OUT OF TIME"),
        GameOverReason::CrashedIntoPlanet => (icons::CRASH, "CRASHED"),
    }
}

fn centered_window(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .default_width(320.0)
}

fn model_buttons(ui: &mut egui::Ui, requests: &mut MessageWriter<SessionRequest>) {
    ui.horizontal(|ui| {
        if ui.button(format!("[Z] {}", OrbitModel::Journey.label())).clicked() {
            requests.write(SessionRequest::Start(OrbitModel::Journey));
        }
        if ui.button(format!("[X] {}", OrbitModel::Tour.label())).clicked() {
            requests.write(SessionRequest::Start(OrbitModel::Tour));
        }
    });
}

/// System to render the title screen.
pub fn title_screen_system(
    mut contexts: EguiContexts,
    session: Res<Session>,
    mut requests: MessageWriter<SessionRequest>,
) {
    if session.phase != SessionPhase::Title {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    centered_window("title").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(format!("{} Orbital Journey", icons::PLANET));
            ui.add_space(8.0);
            ui.label("Up/Down change speed. Stay between the first and second cosmic velocity.");
            ui.label("Reach escape speed to fly free, then drift close to another body to be captured.");
            ui.label("In the tour, Space leaves orbit. Visit every body.");
            ui.add_space(8.0);
            model_buttons(ui, &mut requests);
        });
    });
}

/// System to render the game-over screen.
pub fn game_over_system(
    mut contexts: EguiContexts,
    session: Res<Session>,
    simulation: Option<Res<Simulation>>,
    mut requests: MessageWriter<SessionRequest>,
) {
    let Some(reason) = session.game_over_reason() else {
        return;
    };

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let (icon, headline) = game_over_headline(reason);

    centered_window("game_over").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(
                egui::RichText::new(format!("{icon} {headline}")).color(egui::Color32::from_rgb(255, 110, 90)),
            );
            ui.label(reason.to_string());

            if let Some(simulation) = &simulation {
                let visited = simulation.orbiter().visited().len();
                let total = simulation.bodies().len();
                ui.label(format!("{} {visited}/{total} bodies visited", icons::FLAG));
                if simulation.orbiter().all_visited(total) {
                    ui.label(egui::RichText::new("Every body visited!").strong());
                }
            }

            ui.add_space(8.0);
            if ui.button(format!("{} [R] Play again", icons::RESTART)).clicked() {
                requests.write(SessionRequest::Restart);
            }
            model_buttons(ui, &mut requests);
        });
    });
}
