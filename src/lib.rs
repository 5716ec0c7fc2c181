//! Brix - ball-and-paddle brick breaker simulation core
//!
//! Core modules:
//! - `level`: Level descriptors, auto-fit layout, validation and sources
//! - `sim`: Deterministic simulation (entities, collisions, game phases)
//! - `tuning`: Data-driven game balance (scoring, paddle feel)
//!
//! Rendering, asset decoding and input polling live outside this crate. A
//! renderer reads [`sim::GameState`] and never mutates it.

pub mod level;
pub mod sim;
pub mod tuning;

pub use level::{Level, LevelError, LevelSource};
pub use sim::{Game, GamePhase, GameState, TickInput};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical screen resolution
    pub const SCREEN_WIDTH: f32 = 1440.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;
    /// HUD strip above the playfield
    pub const HUD_HEIGHT: f32 = 80.0;

    /// Gameplay area (1400x1000 below the HUD, 20px side borders)
    pub const GAME_AREA_LEFT: f32 = 20.0;
    pub const GAME_AREA_TOP: f32 = HUD_HEIGHT;
    pub const GAME_AREA_WIDTH: f32 = 1400.0;
    pub const GAME_AREA_HEIGHT: f32 = 1000.0;
    pub const GAME_AREA_RIGHT: f32 = GAME_AREA_LEFT + GAME_AREA_WIDTH;
    pub const GAME_AREA_BOTTOM: f32 = GAME_AREA_TOP + GAME_AREA_HEIGHT;

    /// Brick grid bounds
    pub const BRICK_COLS: i32 = 12;
    pub const BRICK_ROWS: i32 = 10;
    /// Pixel-format brick size when a level leaves it unset
    pub const DEFAULT_PIXEL_BRICK_WIDTH: f32 = 150.0;
    pub const DEFAULT_PIXEL_BRICK_HEIGHT: f32 = 60.0;

    /// Paddle defaults (y is the top edge, fixed for the whole session)
    pub const PADDLE_WIDTH: f32 = 160.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_Y: f32 = 1000.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Used when a level has no speed or a bounce sees a stationary ball
    pub const FALLBACK_BALL_SPEED: f32 = 240.0;
    /// Respawn height above the paddle's top edge
    pub const BALL_SPAWN_OFFSET: f32 = 40.0;

    /// Player lives at session start
    pub const STARTING_LIVES: u8 = 3;
    /// Score floor granted per level number reached
    pub const LEVEL_SCORE_FLOOR: u64 = 1000;
}
