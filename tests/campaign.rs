//! End-to-end sessions through the public API

use std::fs;

use glam::Vec2;

use brix::consts::*;
use brix::level::{DirLevelSource, EmbeddedLevels, MemoryLevels};
use brix::sim::{Game, GamePhase, TickInput, autopilot_input};
use brix::tuning::{PaddleModel, Tuning};

const CONFIRM: TickInput = TickInput {
    move_left: false,
    move_right: false,
    confirm: true,
    pause: false,
};

fn run_autopilot(game: &mut Game, ticks: u32) {
    for _ in 0..ticks {
        if game.is_over() {
            break;
        }
        let input = autopilot_input(game.state());
        game.tick(&input, SIM_DT);
    }
}

#[test]
fn fresh_game_loses_a_life() {
    let mut game = Game::new(Tuning::default(), Box::new(EmbeddedLevels));
    assert_eq!(game.state().lives, 3);
    assert_eq!(game.state().current_level, 1);
    assert_eq!(game.phase(), GamePhase::Start);

    game.tick(&CONFIRM, SIM_DT);
    let ball = &mut game.state_mut().ball;
    ball.pos = Vec2::new(400.0, GAME_AREA_BOTTOM + 60.0);
    ball.vel = Vec2::new(0.0, 300.0);
    game.tick(&TickInput::default(), SIM_DT);

    assert_eq!(game.state().lives, 2);
    assert_eq!(game.phase(), GamePhase::WaitingToContinue);
}

#[test]
fn autopilot_session_keeps_invariants() {
    for paddle in [PaddleModel::DIRECT_DEFAULT, PaddleModel::INERTIAL_DEFAULT] {
        let mut game = Game::new(
            Tuning::default().with_paddle(paddle),
            Box::new(EmbeddedLevels),
        );
        let mut last_score = game.state().score;
        let mut last_level = game.state().current_level;

        for _ in 0..20_000 {
            if game.is_over() {
                break;
            }
            let input = autopilot_input(game.state());
            game.tick(&input, SIM_DT);

            let state = game.state();
            assert!(state.score >= last_score);
            assert!(state.lives <= STARTING_LIVES);
            assert!(state.current_level >= last_level);
            assert!(state.score >= u64::from(state.current_level) * LEVEL_SCORE_FLOOR);

            let paddle = &state.paddle;
            assert!(paddle.x >= paddle.min_x() && paddle.x <= paddle.max_x());
            if state.phase == GamePhase::LevelComplete {
                assert_eq!(state.bricks_remaining(), 0);
            }
            last_score = state.score;
            last_level = state.current_level;
        }
    }
}

#[test]
fn directory_levels_play_through_to_game_over() {
    let dir = tempfile::tempdir().unwrap();
    let single = r#"{
        "format": "pixel",
        "name": "Target",
        "ball_speed": 400,
        "bricks": [{"pixel_x": 625, "pixel_y": 200, "type": "weed"}]
    }"#;
    fs::write(dir.path().join("level1.json"), single).unwrap();
    fs::write(dir.path().join("level2.json"), single).unwrap();

    let mut game = Game::new(Tuning::default(), Box::new(DirLevelSource::new(dir.path())));
    assert_eq!(game.state().level.name, "Target");

    for expected_level in 1..=2 {
        if game.phase() != GamePhase::Playing {
            game.tick(&CONFIRM, SIM_DT);
        }
        assert_eq!(game.state().current_level, expected_level);

        // Brick occupies 645..795 x 280..340 on screen
        let ball = &mut game.state_mut().ball;
        ball.pos = Vec2::new(720.0, 350.0);
        ball.vel = Vec2::new(0.0, -400.0);
        game.tick(&TickInput::default(), SIM_DT);
        assert_eq!(game.phase(), GamePhase::LevelComplete);
    }

    game.tick(&CONFIRM, SIM_DT);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.state().lives, STARTING_LIVES);
}

#[test]
fn identical_inputs_give_identical_sessions() {
    let levels = || {
        Box::new(
            MemoryLevels::new()
                .with_level(1, include_str!("../levels/level1.json"))
                .with_level(2, include_str!("../levels/level3.json")),
        )
    };
    let mut a = Game::new(Tuning::default(), levels());
    let mut b = Game::new(Tuning::default(), levels());
    run_autopilot(&mut a, 5_000);
    run_autopilot(&mut b, 5_000);

    assert_eq!(
        serde_json::to_value(a.state()).unwrap(),
        serde_json::to_value(b.state()).unwrap()
    );
}
