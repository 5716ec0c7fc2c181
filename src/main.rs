//! Brix headless runner
//!
//! Plays a session with the autopilot and prints where it ended up. Useful
//! for checking level files and tuning without a renderer.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};

use brix::consts::SIM_DT;
use brix::level::{DirLevelSource, EmbeddedLevels, LevelSource};
use brix::sim::{FixedTimestep, Game, GamePhase, autopilot_input};
use brix::tuning::{PaddleModel, Tuning};

/// Tuning picked up from the working directory when `--tuning` is not given
const DEFAULT_TUNING_PATH: &str = "config/tuning.json";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaddleArg {
    Direct,
    Inertial,
}

impl From<PaddleArg> for PaddleModel {
    fn from(arg: PaddleArg) -> Self {
        match arg {
            PaddleArg::Direct => PaddleModel::DIRECT_DEFAULT,
            PaddleArg::Inertial => PaddleModel::INERTIAL_DEFAULT,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "brix")]
#[command(about = "Run a brick breaker session headless with the autopilot")]
struct Cli {
    /// Directory containing level1.json, level2.json, ... (built-in levels if omitted)
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Tuning file (JSON); missing fields keep their defaults [default: config/tuning.json]
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Frames to simulate at 60 fps
    #[arg(long, default_value_t = 36_000)]
    ticks: u32,
    /// Override the tuning's paddle model
    #[arg(long, value_enum)]
    paddle: Option<PaddleArg>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut tuning = match &cli.tuning {
        Some(path) => Tuning::read(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::load(DEFAULT_TUNING_PATH),
    };
    if let Some(paddle) = cli.paddle {
        tuning = tuning.with_paddle(paddle.into());
    }

    let levels: Box<dyn LevelSource> = match &cli.levels {
        Some(dir) => {
            ensure!(dir.is_dir(), "level directory {} does not exist", dir.display());
            Box::new(DirLevelSource::new(dir))
        }
        None => Box::new(EmbeddedLevels),
    };

    let mut game = Game::new(tuning, levels);
    let mut clock = FixedTimestep::new();
    let mut frames = 0;

    while frames < cli.ticks && !game.is_over() {
        for _ in 0..clock.advance(SIM_DT) {
            let input = autopilot_input(game.state());
            game.tick(&input, SIM_DT);
        }
        frames += 1;
    }

    let state = game.state();
    let outcome = match state.phase {
        GamePhase::GameOver if state.lives > 0 => "campaign complete",
        GamePhase::GameOver => "out of lives",
        _ => "frame limit reached",
    };
    println!(
        "{outcome}: level {} ({}), score {}, lives {}, bricks left {}, {} frames",
        state.current_level,
        state.level.name,
        state.score,
        state.lives,
        state.bricks_remaining(),
        frames
    );

    Ok(())
}
