//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (brick descriptor order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod motion;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use autopilot::autopilot_input;
pub use clock::FixedTimestep;
pub use collision::{BrickHit, CollisionReport, resolve};
pub use motion::{DirectMotion, InertialMotion, MoveIntent, PaddleMotion};
pub use state::{Ball, Brick, BrickPlacement, GamePhase, GameState, Paddle, spawn_bricks};
pub use tick::{Game, TickInput};
