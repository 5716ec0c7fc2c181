//! Fixed timestep game controller
//!
//! Owns the session state and advances it one tick at a time. The phase
//! machine decides what a tick does; only `Playing` runs physics.

use super::collision;
use super::motion::{self, MoveIntent, PaddleMotion};
use super::state::{GamePhase, GameState};
use crate::level::{self, Level, LevelError, LevelSource};
use crate::tuning::Tuning;

/// Player intents for a single tick
///
/// `confirm` and `pause` should be edge-triggered by the caller; movement
/// may be held across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Start, serve again, advance to the next level
    pub confirm: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn movement(&self) -> MoveIntent {
        MoveIntent {
            left: self.move_left,
            right: self.move_right,
        }
    }

    pub fn any_movement(&self) -> bool {
        self.move_left || self.move_right
    }
}

/// A play session: state plus everything needed to advance it
pub struct Game {
    state: GameState,
    tuning: Tuning,
    levels: Box<dyn LevelSource>,
    motion: Box<dyn PaddleMotion>,
}

impl Game {
    /// Start a session on level 1. A level 1 that fails to load is replaced
    /// by the built-in default level.
    pub fn new(tuning: Tuning, levels: Box<dyn LevelSource>) -> Self {
        let motion = motion::for_model(&tuning.paddle);
        log::info!(
            "New game: levels from {}, {} paddle",
            levels.describe(),
            motion.name()
        );

        let state = match level::load(levels.as_ref(), 1, &tuning.bricks) {
            Ok(level) => {
                let mut state = GameState::new(level, 1);
                state.apply_score_floor(1);
                state
            }
            Err(e) => {
                log::warn!("{e}; falling back to the default level");
                GameState::new(Level::create_default(), 1)
            }
        };

        Self {
            state,
            tuning,
            levels,
            motion,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Advance the game by one fixed timestep
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        match self.state.phase {
            GamePhase::Start => {
                if input.confirm || input.any_movement() {
                    self.set_phase(GamePhase::Playing);
                }
            }
            GamePhase::Playing => {
                // Pause wins over physics for this tick
                if input.pause {
                    self.set_phase(GamePhase::Paused);
                    return;
                }
                self.step_playing(input, dt);
            }
            GamePhase::Paused => {
                if input.confirm || input.pause {
                    self.set_phase(GamePhase::Playing);
                }
            }
            GamePhase::WaitingToContinue => {
                if input.confirm {
                    self.state.respawn_ball();
                    self.set_phase(GamePhase::Playing);
                }
            }
            GamePhase::LevelComplete => {
                if input.confirm {
                    self.advance_level();
                }
            }
            GamePhase::GameOver => {}
        }
    }

    fn step_playing(&mut self, input: &TickInput, dt: f32) {
        let state = &mut self.state;
        state.time_ticks += 1;

        self.motion.step(&mut state.paddle, input.movement(), dt);
        state.ball.update(dt);

        let report = collision::resolve(
            &mut state.ball,
            &state.paddle,
            &mut state.bricks,
            &mut state.score,
            state.lives,
            &self.tuning,
        );
        if let Some(hit) = report.brick {
            log::debug!(
                "Brick {} hit (+{}){}",
                hit.index,
                hit.points,
                if hit.destroyed { ", destroyed" } else { "" }
            );
        }
        if report.paddle_hit {
            log::debug!("Paddle return at x={:.1}", state.ball.pos.x);
        }

        if state.ball.is_lost(self.tuning.ball_lost_margin) {
            state.lives = state.lives.saturating_sub(1);
            log::info!("Ball lost, {} lives left", state.lives);
            if state.lives == 0 {
                self.set_phase(GamePhase::GameOver);
            } else {
                self.set_phase(GamePhase::WaitingToContinue);
            }
            return;
        }

        if self.state.bricks_remaining() == 0 {
            log::info!(
                "Level {} cleared with score {}",
                self.state.current_level,
                self.state.score
            );
            self.set_phase(GamePhase::LevelComplete);
        }
    }

    /// Move on to the next level, or end the run if there is none
    fn advance_level(&mut self) {
        let next = self.state.current_level + 1;
        match level::load(self.levels.as_ref(), next, &self.tuning.bricks) {
            Ok(level) => {
                self.state.current_level = next;
                self.state.install_level(level);
                self.state.apply_score_floor(next);
                self.set_phase(GamePhase::Playing);
            }
            Err(LevelError::NotFound { .. }) => {
                log::info!(
                    "No level {next}; campaign finished with score {}",
                    self.state.score
                );
                self.set_phase(GamePhase::GameOver);
            }
            Err(e) => {
                log::warn!("{e}; playing the default level as level {next}");
                self.state.current_level = next;
                self.state.install_level(Level::create_default());
                self.set_phase(GamePhase::Playing);
            }
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.state.phase != phase {
            log::info!("Phase {} -> {}", self.state.phase.as_str(), phase.as_str());
            self.state.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::level::{BrickKind, EmbeddedLevels, MemoryLevels};
    use crate::sim::autopilot::autopilot_input;

    const CONFIRM: TickInput = TickInput {
        move_left: false,
        move_right: false,
        confirm: true,
        pause: false,
    };
    const IDLE: TickInput = TickInput {
        move_left: false,
        move_right: false,
        confirm: false,
        pause: false,
    };
    const PAUSE: TickInput = TickInput {
        move_left: false,
        move_right: false,
        confirm: false,
        pause: true,
    };

    /// One standard brick at grid (5, 2): screen box 645..795 x 260..320
    const SOLO: &str = r#"{
        "format": "grid",
        "name": "Solo",
        "brick_width": 150,
        "brick_height": 60,
        "brick_spacing_x": 25,
        "brick_spacing_y": 30,
        "ball_speed": 400,
        "bricks": [{"x": 5, "y": 2, "type": "standard", "hits": 1}]
    }"#;

    fn solo_game(levels: u32) -> Game {
        let source = (1..=levels).fold(MemoryLevels::new(), |src, n| src.with_level(n, SOLO));
        Game::new(Tuning::default(), Box::new(source))
    }

    fn playing(mut game: Game) -> Game {
        game.tick(&CONFIRM, SIM_DT);
        assert_eq!(game.phase(), GamePhase::Playing);
        game
    }

    fn drop_ball(game: &mut Game) {
        let ball = &mut game.state_mut().ball;
        ball.pos = Vec2::new(700.0, GAME_AREA_BOTTOM + 100.0);
        ball.vel = Vec2::new(0.0, 400.0);
    }

    /// Put the ball just under the solo brick, heading into it
    fn aim_at_solo_brick(game: &mut Game) {
        let ball = &mut game.state_mut().ball;
        ball.pos = Vec2::new(720.0, 330.0);
        ball.vel = Vec2::new(0.0, -400.0);
    }

    #[test]
    fn test_start_waits_for_input() {
        let mut game = solo_game(1);
        let ball_before = game.state().ball.pos;
        for _ in 0..10 {
            game.tick(&IDLE, SIM_DT);
        }
        assert_eq!(game.phase(), GamePhase::Start);
        assert_eq!(game.state().ball.pos, ball_before);

        game.tick(
            &TickInput {
                move_left: true,
                ..IDLE
            },
            SIM_DT,
        );
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_ball_lost_decrements_lives() {
        let mut game = playing(solo_game(1));
        assert_eq!(game.state().lives, 3);
        drop_ball(&mut game);
        game.tick(&IDLE, SIM_DT);
        assert_eq!(game.state().lives, 2);
        assert_eq!(game.phase(), GamePhase::WaitingToContinue);

        // Lives are not touched again on continue
        game.tick(&CONFIRM, SIM_DT);
        assert_eq!(game.state().lives, 2);
        assert_eq!(game.phase(), GamePhase::Playing);
        let paddle = &game.state().paddle;
        assert_eq!(
            game.state().ball.pos,
            Vec2::new(paddle.x, paddle.y - BALL_SPAWN_OFFSET)
        );
        assert!((game.state().ball.vel.length() - 400.0).abs() < 0.01);
    }

    #[test]
    fn test_last_life_ends_game_and_freezes() {
        let mut game = playing(solo_game(1));
        game.state_mut().lives = 1;
        drop_ball(&mut game);
        game.tick(&IDLE, SIM_DT);
        assert_eq!(game.state().lives, 0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.is_over());

        let ball = game.state().ball.pos;
        let paddle = game.state().paddle.x;
        let right = TickInput {
            move_right: true,
            ..IDLE
        };
        for input in [CONFIRM, PAUSE, right] {
            game.tick(&input, SIM_DT);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.state().ball.pos, ball);
        assert_eq!(game.state().paddle.x, paddle);
    }

    #[test]
    fn test_last_brick_completes_level_same_tick() {
        let mut game = playing(solo_game(1));
        let score_before = game.state().score;
        let lives = game.state().lives;
        aim_at_solo_brick(&mut game);

        game.tick(&IDLE, SIM_DT);

        assert_eq!(game.phase(), GamePhase::LevelComplete);
        assert_eq!(game.state().bricks_remaining(), 0);
        let expected = game
            .tuning()
            .scoring
            .brick_points(BrickKind::Standard, lives, true);
        assert_eq!(game.state().score - score_before, u64::from(expected));
        assert!(game.state().ball.vel.y > 0.0);
    }

    #[test]
    fn test_pause_preempts_physics() {
        let mut game = playing(solo_game(1));
        let ball = game.state().ball.clone();
        let ticks = game.state().time_ticks;

        game.tick(&PAUSE, SIM_DT);
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.state().ball.pos, ball.pos);
        assert_eq!(game.state().time_ticks, ticks);

        for _ in 0..5 {
            game.tick(&IDLE, SIM_DT);
        }
        assert_eq!(game.state().ball.pos, ball.pos);

        game.tick(&PAUSE, SIM_DT);
        assert_eq!(game.phase(), GamePhase::Playing);
        game.tick(&PAUSE, SIM_DT);
        game.tick(&CONFIRM, SIM_DT);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_score_floor_on_level_loads() {
        let mut game = solo_game(2);
        assert_eq!(game.state().score, LEVEL_SCORE_FLOOR);

        game = playing(game);
        aim_at_solo_brick(&mut game);
        game.tick(&IDLE, SIM_DT);
        assert_eq!(game.phase(), GamePhase::LevelComplete);

        // Nothing happens until the player confirms
        game.tick(&IDLE, SIM_DT);
        assert_eq!(game.phase(), GamePhase::LevelComplete);

        game.tick(&CONFIRM, SIM_DT);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().current_level, 2);
        assert_eq!(game.state().score, 2 * LEVEL_SCORE_FLOOR);
        assert_eq!(game.state().bricks_remaining(), 1);
    }

    #[test]
    fn test_running_out_of_levels_ends_game() {
        let mut game = playing(solo_game(1));
        aim_at_solo_brick(&mut game);
        game.tick(&IDLE, SIM_DT);
        let score = game.state().score;

        game.tick(&CONFIRM, SIM_DT);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.state().current_level, 1);
        assert_eq!(game.state().score, score);
    }

    #[test]
    fn test_bad_first_level_falls_back_to_default() {
        let source = MemoryLevels::new().with_level(1, "{ not json");
        let game = Game::new(Tuning::default(), Box::new(source));
        assert_eq!(game.state().level, Level::create_default());
        assert_eq!(game.state().bricks.len(), 4);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.phase(), GamePhase::Start);
    }

    #[test]
    fn test_off_grid_first_level_falls_back_to_default() {
        let wide = r#"{"format": "grid", "name": "Wide", "brick_width": 150, "brick_height": 60,
            "bricks": [{"x": -5, "y": 0, "hits": 1}, {"x": 2147483647, "y": 0, "hits": 1}]}"#;
        let source = MemoryLevels::new().with_level(1, wide);
        let game = Game::new(Tuning::default(), Box::new(source));
        assert_eq!(game.state().level, Level::create_default());
        assert_eq!(game.state().current_level, 1);
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_bad_next_level_plays_default() {
        let source = MemoryLevels::new()
            .with_level(1, SOLO)
            .with_level(2, r#"{"format": "grid", "name": "", "bricks": []}"#);
        let mut game = playing(Game::new(Tuning::default(), Box::new(source)));
        aim_at_solo_brick(&mut game);
        game.tick(&IDLE, SIM_DT);
        let score = game.state().score;

        game.tick(&CONFIRM, SIM_DT);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().current_level, 2);
        assert_eq!(game.state().level.name, "Default Level");
        // No floor for a level that did not load
        assert_eq!(game.state().score, score);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut game = Game::new(Tuning::default(), Box::new(EmbeddedLevels));
            for _ in 0..3000 {
                let input = autopilot_input(game.state());
                game.tick(&input, SIM_DT);
            }
            serde_json::to_string(game.state()).unwrap()
        };
        assert_eq!(run(), run());
    }
}
