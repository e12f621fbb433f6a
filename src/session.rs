//! Session flow: title screen, play, game over, restart.

use bevy::prelude::*;

use crate::level::{generate, LevelConfig};
use crate::orbiter::{FlightPhase, OrbitingBody};
use crate::policy::OrbitModel;
use crate::simulation::Simulation;
use crate::types::{SimulationConfig, SimulationSet, TickInput};

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// Flew outside the world bounds.
    OutOfBounds,
    /// Free flight lasted longer than the escape timeout.
    EscapeTimeout,
    /// Orbit decayed into the host.
    CrashedIntoPlanet,
}

impl std::fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOverReason::OutOfBounds => write!(f, "Lost in space"),
            GameOverReason::EscapeTimeout => write!(f, "Drifted too long without an orbit"),
            GameOverReason::CrashedIntoPlanet => write!(f, "Crashed into planet"),
        }
    }
}

/// Whether the orbiter's state ends the session.
///
/// Checked in order: outside the world bounds, escape timeout, falling.
/// Only free flight can leave the bounds; an orbit around an edge body may
/// sweep past them and still hold.
pub fn terminal_condition(orbiter: &OrbitingBody, config: &SimulationConfig) -> Option<GameOverReason> {
    let in_flight = orbiter.phase() == FlightPhase::FreeFlight;
    if in_flight && !config.world_bounds.contains(orbiter.pos()) {
        Some(GameOverReason::OutOfBounds)
    } else if orbiter.escape_ticks() >= config.escape_timeout_ticks {
        Some(GameOverReason::EscapeTimeout)
    } else if orbiter.is_falling() {
        Some(GameOverReason::CrashedIntoPlanet)
    } else {
        None
    }
}

/// Seconds of free flight left before the escape timeout.
pub fn time_left_secs(orbiter: &OrbitingBody, config: &SimulationConfig) -> f64 {
    (config.escape_timeout_secs() - orbiter.escape_secs(config.tick_rate_hz)).max(0.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Title,
    Playing,
    GameOver(GameOverReason),
}

/// Current session phase and the seed the next level is built from.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct Session {
    pub phase: SessionPhase,
    pub model: OrbitModel,
    /// Seed of the current (or next) level.
    pub seed: u64,
    pub games_started: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

impl Session {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            phase: SessionPhase::Title,
            model: OrbitModel::default(),
            seed,
            games_started: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.phase {
            SessionPhase::GameOver(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Request to start or restart play.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionRequest {
    /// Start a new game with this model (from the title or game-over screen).
    Start(OrbitModel),
    /// Play the current model again on the next level.
    Restart,
}

/// Plugin wiring session requests and the game-over check.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Session>()
            .init_resource::<LevelConfig>()
            .init_resource::<SimulationConfig>()
            .add_message::<SessionRequest>()
            .add_systems(Update, handle_session_requests)
            .add_systems(
                FixedUpdate,
                check_terminal
                    .in_set(SimulationSet::Session)
                    .run_if(resource_exists::<Simulation>),
            );
    }
}

/// Build a fresh simulation for each accepted request.
fn handle_session_requests(
    mut commands: Commands,
    mut requests: MessageReader<SessionRequest>,
    mut session: ResMut<Session>,
    mut input: ResMut<TickInput>,
    level_config: Res<LevelConfig>,
    sim_config: Res<SimulationConfig>,
) {
    for request in requests.read() {
        let model = match (*request, session.phase) {
            (SessionRequest::Start(model), SessionPhase::Title | SessionPhase::GameOver(_)) => model,
            (SessionRequest::Restart, SessionPhase::GameOver(_)) => session.model,
            _ => continue,
        };

        // Every game after the first gets a new layout
        if session.games_started > 0 {
            session.seed = session.seed.wrapping_add(1);
        }

        let level = generate(model, session.seed, &level_config);
        let body_count = level.bodies.len();
        match Simulation::from_level(level, model, sim_config.clone()) {
            Ok(simulation) => {
                info!(
                    "Starting {} (seed {}, {} bodies)",
                    model.label(),
                    session.seed,
                    body_count
                );
                commands.insert_resource(simulation);
                *input = TickInput::IDLE;
                session.model = model;
                session.phase = SessionPhase::Playing;
                session.games_started += 1;
            }
            Err(err) => warn!("Could not start {}: {err}", model.label()),
        }
    }
}

/// End the session once the orbiter reaches a terminal condition.
fn check_terminal(simulation: Res<Simulation>, mut session: ResMut<Session>) {
    if !session.is_playing() {
        return;
    }

    if let Some(reason) = simulation.terminal_condition() {
        info!(
            "Game over after {} ticks: {reason} ({} of {} bodies visited)",
            simulation.tick(),
            simulation.orbiter().visited().len(),
            simulation.bodies().len()
        );
        session.phase = SessionPhase::GameOver(reason);
    }
}
