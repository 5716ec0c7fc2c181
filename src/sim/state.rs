//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here. The controller in
//! `tick` is the only writer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;
use crate::level::layout::{grid_cell_position, row_bounds};
use crate::level::{BrickKind, GridBrick, GridLayout, Layout, Level, PixelBrick, PixelLayout};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for any input
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Ball was lost, waiting for the player to serve again
    WaitingToContinue,
    /// Every brick is down, waiting to advance
    LevelComplete,
    /// Run ended (out of lives or out of levels)
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "Start",
            GamePhase::Playing => "Playing",
            GamePhase::Paused => "Paused",
            GamePhase::WaitingToContinue => "WaitingToContinue",
            GamePhase::LevelComplete => "LevelComplete",
            GamePhase::GameOver => "GameOver",
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x
    pub x: f32,
    /// Top edge, fixed
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (inertial movement only)
    pub vx: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: GAME_AREA_LEFT + GAME_AREA_WIDTH / 2.0,
            y: PADDLE_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            vx: 0.0,
        }
    }
}

impl Paddle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x - self.width / 2.0, self.y),
            Vec2::new(self.x + self.width / 2.0, self.y + self.height),
        )
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        GAME_AREA_LEFT + self.width / 2.0
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        GAME_AREA_RIGHT - self.width / 2.0
    }

    /// Keep the paddle inside the gameplay area. Hitting an edge stops it dead.
    pub fn clamp_to_area(&mut self) {
        if self.x < self.min_x() {
            self.x = self.min_x();
            self.vx = 0.0;
        }
        if self.x > self.max_x() {
            self.x = self.max_x();
            self.vx = 0.0;
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Configured speed for this level
    pub speed: f32,
}

impl Ball {
    /// Fresh ball above the paddle, heading up and to the right at 45 degrees
    pub fn above_paddle(paddle: &Paddle, speed: f32) -> Self {
        let dir = Vec2::new(1.0, -1.0).normalize();
        Self {
            pos: Vec2::new(paddle.x, paddle.y - BALL_SPAWN_OFFSET),
            vel: dir * speed,
            radius: BALL_RADIUS,
            speed,
        }
    }

    /// Integrate position. No collision awareness.
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }

    pub fn reverse_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn reverse_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Ball center has dropped `margin` below the gameplay area
    pub fn is_lost(&self, margin: f32) -> bool {
        self.pos.y > GAME_AREA_BOTTOM + margin
    }
}

/// How a brick's pixel position is derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BrickPlacement {
    /// Grid cell; the row's occupied column range centers the row
    Grid {
        column: i32,
        row: i32,
        row_bounds: (i32, i32),
        spacing: Vec2,
    },
    /// Offset from the gameplay area's top-left corner
    Pixel { offset: Vec2 },
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    kind: BrickKind,
    hits: u32,
    active: bool,
    size: Vec2,
    placement: BrickPlacement,
}

impl Brick {
    pub fn from_grid(desc: &GridBrick, grid: &GridLayout, row_bounds: (i32, i32)) -> Self {
        Self {
            kind: desc.kind,
            hits: desc.hits.max(1) as u32,
            active: true,
            size: Vec2::new(grid.brick_width, grid.brick_height),
            placement: BrickPlacement::Grid {
                column: desc.column,
                row: desc.row,
                row_bounds,
                spacing: Vec2::new(grid.spacing_x, grid.spacing_y),
            },
        }
    }

    pub fn from_pixel(desc: &PixelBrick, layout: &PixelLayout) -> Self {
        Self {
            kind: desc.kind,
            hits: desc.hits.max(1) as u32,
            active: true,
            size: Vec2::new(
                desc.width.unwrap_or(layout.default_width),
                desc.height.unwrap_or(layout.default_height),
            ),
            placement: BrickPlacement::Pixel {
                offset: Vec2::new(desc.x, desc.y),
            },
        }
    }

    /// Register a ball hit. Returns true if this hit destroyed the brick.
    pub fn hit(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.hits = self.hits.saturating_sub(1);
        if self.hits == 0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn kind(&self) -> BrickKind {
        self.kind
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Top-left corner in screen pixels
    pub fn screen_position(&self) -> Vec2 {
        match &self.placement {
            BrickPlacement::Grid {
                column,
                row,
                row_bounds,
                spacing,
            } => grid_cell_position(*column, *row, *row_bounds, self.size, *spacing),
            BrickPlacement::Pixel { offset } => Vec2::new(GAME_AREA_LEFT, GAME_AREA_TOP) + *offset,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.screen_position(), self.size)
    }
}

/// Instantiate every brick of a level, in descriptor order
pub fn spawn_bricks(level: &Level) -> Vec<Brick> {
    match &level.layout {
        Layout::Grid(grid) => {
            let rows = row_bounds(&grid.bricks);
            grid.bricks
                .iter()
                .map(|desc| {
                    let bounds = rows
                        .get(&desc.row)
                        .copied()
                        .unwrap_or((desc.column, desc.column));
                    Brick::from_grid(desc, grid, bounds)
                })
                .collect()
        }
        Layout::Pixel(pixel) => pixel
            .bricks
            .iter()
            .map(|desc| Brick::from_pixel(desc, pixel))
            .collect(),
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// 1-based number of the level being played
    pub current_level: u32,
    pub level: Level,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Stable order: descriptor order from the level file
    pub bricks: Vec<Brick>,
    /// Simulation ticks spent in `Playing`
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh session on the given level, waiting on the start screen
    pub fn new(level: Level, level_number: u32) -> Self {
        let paddle = Paddle::default();
        let ball = Ball::above_paddle(&paddle, level.ball_speed);
        let bricks = spawn_bricks(&level);
        Self {
            phase: GamePhase::Start,
            score: 0,
            lives: STARTING_LIVES,
            current_level: level_number,
            level,
            paddle,
            ball,
            bricks,
            time_ticks: 0,
        }
    }

    /// Swap in a new level and serve a fresh ball
    pub fn install_level(&mut self, level: Level) {
        self.bricks = spawn_bricks(&level);
        self.level = level;
        self.respawn_ball();
    }

    /// Replace the ball with a new one above the paddle's current position
    pub fn respawn_ball(&mut self) {
        self.ball = Ball::above_paddle(&self.paddle, self.level.ball_speed);
    }

    /// Guaranteed baseline per level reached; never lowers the score
    pub fn apply_score_floor(&mut self, level_number: u32) {
        let floor = u64::from(level_number) * LEVEL_SCORE_FLOOR;
        self.score = self.score.max(floor);
    }

    pub fn active_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_active())
    }

    pub fn bricks_remaining(&self) -> usize {
        self.active_bricks().count()
    }
}
