//! Demo player
//!
//! Derives intents from the state alone, so an autopilot run is as
//! deterministic as the simulation it drives.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// How close the paddle must be to its target before it stops chasing
const DEAD_ZONE: f32 = 12.0;

/// Look-ahead used to lead a falling ball
const LEAD_TIME: f32 = 0.15;

pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Start
        | GamePhase::Paused
        | GamePhase::WaitingToContinue
        | GamePhase::LevelComplete => TickInput {
            confirm: true,
            ..Default::default()
        },
        GamePhase::GameOver => TickInput::default(),
        GamePhase::Playing => track_ball(state),
    }
}

fn track_ball(state: &GameState) -> TickInput {
    let ball = &state.ball;
    let paddle = &state.paddle;

    let target = if ball.vel.y > 0.0 {
        // Lead the ball and aim slightly off-center so returns are not vertical
        let lead = ball.pos.x + ball.vel.x * LEAD_TIME;
        let center = GAME_AREA_LEFT + GAME_AREA_WIDTH / 2.0;
        let side = if lead < center { -1.0 } else { 1.0 };
        let nudge = side * 0.2 * paddle.width / 2.0;
        lead - nudge
    } else {
        ball.pos.x
    };
    let target = target.clamp(paddle.min_x(), paddle.max_x());

    TickInput {
        move_left: paddle.x > target + DEAD_ZONE,
        move_right: paddle.x < target - DEAD_ZONE,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::level::Level;

    #[test]
    fn test_confirms_outside_play() {
        let mut state = GameState::new(Level::create_default(), 1);
        assert!(autopilot_input(&state).confirm);
        state.phase = GamePhase::GameOver;
        assert_eq!(autopilot_input(&state), TickInput::default());
    }

    #[test]
    fn test_chases_ball() {
        let mut state = GameState::new(Level::create_default(), 1);
        state.phase = GamePhase::Playing;

        state.ball.pos = Vec2::new(200.0, 500.0);
        state.ball.vel = Vec2::new(0.0, -300.0);
        let input = autopilot_input(&state);
        assert!(input.move_left && !input.move_right);

        state.ball.pos = Vec2::new(1300.0, 500.0);
        let input = autopilot_input(&state);
        assert!(input.move_right && !input.move_left);

        state.ball.pos.x = state.paddle.x;
        assert_eq!(autopilot_input(&state), TickInput::default());
    }
}
