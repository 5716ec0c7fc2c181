//! Collision detection and response
//!
//! Runs once per tick in a fixed order: paddle, then bricks (at most one),
//! then walls. Every test is box-vs-box against the ball's bounding square.
//! The bottom edge is not a wall; losing the ball is the controller's call.

use glam::Vec2;

use super::aabb::Aabb;
use super::state::{Ball, Brick, Paddle};
use crate::consts::*;
use crate::tuning::{BounceTuning, ScoringTable, Tuning};

/// A brick struck this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    /// Index into the brick list
    pub index: usize,
    pub destroyed: bool,
    pub points: u32,
}

/// What happened during one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub paddle_hit: bool,
    pub brick: Option<BrickHit>,
    pub wall_bounces: u8,
}

/// Bounce the ball off the paddle. Returns true on a hit.
///
/// The return angle depends on where the ball meets the paddle: dead center
/// goes straight up, the ends go out at the steepest allowed angle. Speed is
/// preserved.
pub fn paddle_collision(ball: &mut Ball, paddle: &Paddle, bounce: &BounceTuning) -> bool {
    // Still leaving the paddle after the last bounce
    if ball.vel.y <= 0.0 {
        return false;
    }
    if !ball.bounds().overlaps(&paddle.bounds()) {
        return false;
    }

    let offset = ((ball.pos.x - paddle.x) / (paddle.width / 2.0)).clamp(-1.0, 1.0);

    let mut speed = ball.vel.length();
    if speed == 0.0 {
        speed = FALLBACK_BALL_SPEED;
    }

    let mut vx = offset * speed * bounce.max_horizontal;
    let min_vertical = speed * bounce.min_vertical;
    let vertical = (speed * speed - vx * vx).max(0.0).sqrt();
    let vy = if vertical < min_vertical {
        vx = (speed * speed - min_vertical * min_vertical).max(0.0).sqrt().copysign(vx);
        -min_vertical
    } else {
        -vertical
    };

    ball.vel = Vec2::new(vx, vy);
    true
}

/// Reverse the axis matching the brick edge nearest the ball center.
/// Ties go to the horizontal axis.
pub fn resolve_brick_bounce(ball: &mut Ball, brick: &Aabb) {
    let left = ball.pos.x - brick.left();
    let right = brick.right() - ball.pos.x;
    let top = ball.pos.y - brick.top();
    let bottom = brick.bottom() - ball.pos.y;

    let nearest = left.min(right).min(top).min(bottom);
    if nearest == left || nearest == right {
        ball.reverse_x();
    } else {
        ball.reverse_y();
    }
}

/// Strike the first active brick the ball overlaps, in list order.
///
/// Only one brick is affected per call even if the ball touches several.
pub fn brick_collision(
    ball: &mut Ball,
    bricks: &mut [Brick],
    lives: u8,
    scoring: &ScoringTable,
) -> Option<BrickHit> {
    let ball_bounds = ball.bounds();
    let (index, brick) = bricks
        .iter_mut()
        .enumerate()
        .filter(|(_, b)| b.is_active())
        .find(|(_, b)| ball_bounds.overlaps(&b.bounds()))?;

    let bounds = brick.bounds();
    let destroyed = brick.hit();
    let points = scoring.brick_points(brick.kind(), lives, destroyed);
    resolve_brick_bounce(ball, &bounds);

    Some(BrickHit {
        index,
        destroyed,
        points,
    })
}

/// Bounce off the left, right and top edges of the gameplay area.
/// Returns the number of axes reversed.
pub fn wall_collision(ball: &mut Ball) -> u8 {
    let bounds = ball.bounds();
    let mut bounces = 0;

    if (bounds.left() <= GAME_AREA_LEFT && ball.vel.x < 0.0)
        || (bounds.right() >= GAME_AREA_RIGHT && ball.vel.x > 0.0)
    {
        ball.reverse_x();
        bounces += 1;
    }
    if bounds.top() <= GAME_AREA_TOP && ball.vel.y < 0.0 {
        ball.reverse_y();
        bounces += 1;
    }

    bounces
}

/// Run the full collision pass and credit points to `score`
pub fn resolve(
    ball: &mut Ball,
    paddle: &Paddle,
    bricks: &mut [Brick],
    score: &mut u64,
    lives: u8,
    tuning: &Tuning,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    if paddle_collision(ball, paddle, &tuning.bounce) {
        report.paddle_hit = true;
        *score += u64::from(tuning.scoring.paddle_points(lives));
    }

    if let Some(hit) = brick_collision(ball, bricks, lives, &tuning.scoring) {
        *score += u64::from(hit.points);
        report.brick = Some(hit);
    }

    report.wall_bounces = wall_collision(ball);
    report
}
