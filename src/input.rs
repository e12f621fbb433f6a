//! Keyboard input.
//!
//! Held keys are sampled into [`TickInput`] every frame; the fixed-rate step
//! reads it. Leave-orbit is a press, so it stays latched until a step consumes
//! it. Session keys become [`SessionRequest`] messages.

use bevy::prelude::*;

use crate::policy::OrbitModel;
use crate::session::{Session, SessionPhase, SessionRequest};
use crate::types::TickInput;

/// Plugin mapping the keyboard onto simulation and session input.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickInput>()
            .add_systems(Update, (sample_flight_keys, session_shortcuts));
    }
}

/// Fold this frame's keys into the pending tick input.
pub fn flight_input(keys: &ButtonInput<KeyCode>, pending: TickInput) -> TickInput {
    TickInput {
        increase: keys.pressed(KeyCode::ArrowUp),
        decrease: keys.pressed(KeyCode::ArrowDown),
        leave_orbit: pending.leave_orbit || keys.just_pressed(KeyCode::Space),
    }
}

/// Session request for this frame's keys, if any.
///
/// Z and X pick a model from the title or game-over screen; R replays the
/// current model after a game over.
pub fn session_request(keys: &ButtonInput<KeyCode>, phase: SessionPhase) -> Option<SessionRequest> {
    match phase {
        SessionPhase::Playing => None,
        SessionPhase::Title | SessionPhase::GameOver(_) => {
            if keys.just_pressed(KeyCode::KeyZ) {
                Some(SessionRequest::Start(OrbitModel::Journey))
            } else if keys.just_pressed(KeyCode::KeyX) {
                Some(SessionRequest::Start(OrbitModel::Tour))
            } else if keys.just_pressed(KeyCode::KeyR) && phase != SessionPhase::Title {
                Some(SessionRequest::Restart)
            } else {
                None
            }
        }
    }
}

fn sample_flight_keys(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<TickInput>) {
    let sampled = flight_input(&keys, *input);
    // Avoid tripping change detection every frame
    input.set_if_neq(sampled);
}

fn session_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    session: Res<Session>,
    mut requests: MessageWriter<SessionRequest>,
) {
    if let Some(request) = session_request(&keys, session.phase) {
        requests.write(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameOverReason;

    fn pressed(codes: &[KeyCode]) -> ButtonInput<KeyCode> {
        let mut keys = ButtonInput::default();
        for code in codes {
            keys.press(*code);
        }
        keys
    }

    #[test]
    fn test_arrows_map_to_speed_signals() {
        let input = flight_input(&pressed(&[KeyCode::ArrowUp]), TickInput::IDLE);
        assert_eq!(input, TickInput::increase());

        let input = flight_input(&pressed(&[KeyCode::ArrowDown]), TickInput::IDLE);
        assert_eq!(input, TickInput::decrease());
    }

    #[test]
    fn test_leave_orbit_latches_until_consumed() {
        let input = flight_input(&pressed(&[KeyCode::Space]), TickInput::IDLE);
        assert!(input.leave_orbit);

        // Next frame: key no longer just pressed, but nothing consumed it yet
        let mut keys = pressed(&[KeyCode::Space]);
        keys.clear();
        assert!(flight_input(&keys, input).leave_orbit);
        assert!(!flight_input(&keys, TickInput::IDLE).leave_orbit);
    }

    #[test]
    fn test_session_keys_by_phase() {
        let z = pressed(&[KeyCode::KeyZ]);
        let x = pressed(&[KeyCode::KeyX]);
        let r = pressed(&[KeyCode::KeyR]);
        let over = SessionPhase::GameOver(GameOverReason::OutOfBounds);

        assert_eq!(
            session_request(&z, SessionPhase::Title),
            Some(SessionRequest::Start(OrbitModel::Journey))
        );
        assert_eq!(
            session_request(&x, over),
            Some(SessionRequest::Start(OrbitModel::Tour))
        );
        assert_eq!(session_request(&r, over), Some(SessionRequest::Restart));
        assert_eq!(session_request(&r, SessionPhase::Title), None);
        assert_eq!(session_request(&z, SessionPhase::Playing), None);
    }
}
