//! Paddle movement models
//!
//! Movement feel is a tuning choice, so both models sit behind one trait and
//! `Tuning::paddle` decides which one the controller runs.

use std::fmt;

use super::state::Paddle;
use crate::tuning::PaddleModel;

/// Horizontal movement intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// -1, 0 or +1. Holding both directions cancels out.
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

pub trait PaddleMotion: fmt::Debug {
    /// Advance the paddle one tick. Must leave it inside the gameplay area.
    fn step(&self, paddle: &mut Paddle, intent: MoveIntent, dt: f32);

    fn name(&self) -> &'static str;
}

/// Constant speed while a direction is held
#[derive(Debug, Clone, Copy)]
pub struct DirectMotion {
    pub speed: f32,
}

impl PaddleMotion for DirectMotion {
    fn step(&self, paddle: &mut Paddle, intent: MoveIntent, dt: f32) {
        paddle.vx = intent.direction() * self.speed;
        paddle.x += paddle.vx * dt;
        paddle.clamp_to_area();
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

/// Acceleration toward the held direction, friction otherwise
#[derive(Debug, Clone, Copy)]
pub struct InertialMotion {
    pub accel: f32,
    pub friction: f32,
    pub max_speed: f32,
}

impl PaddleMotion for InertialMotion {
    fn step(&self, paddle: &mut Paddle, intent: MoveIntent, dt: f32) {
        let mut ax = intent.direction() * self.accel;

        // Friction must not carry velocity through zero in one tick
        if ax == 0.0 {
            if paddle.vx > 0.0 {
                ax = -self.friction;
                if paddle.vx + ax * dt < 0.0 {
                    ax = -paddle.vx / dt;
                }
            } else if paddle.vx < 0.0 {
                ax = self.friction;
                if paddle.vx + ax * dt > 0.0 {
                    ax = -paddle.vx / dt;
                }
            }
        }

        paddle.vx = (paddle.vx + ax * dt).clamp(-self.max_speed, self.max_speed);
        paddle.x += paddle.vx * dt;
        paddle.clamp_to_area();
    }

    fn name(&self) -> &'static str {
        "inertial"
    }
}

/// Build the movement model a tuning asks for
pub fn for_model(model: &PaddleModel) -> Box<dyn PaddleMotion> {
    match *model {
        PaddleModel::Direct { speed } => Box::new(DirectMotion { speed }),
        PaddleModel::Inertial {
            accel,
            friction,
            max_speed,
        } => Box::new(InertialMotion {
            accel,
            friction,
            max_speed,
        }),
    }
}
