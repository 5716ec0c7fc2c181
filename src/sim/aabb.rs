//! Axis-aligned bounding boxes
//!
//! Every collision test in the simulation is box-vs-box. The ball is treated
//! as the square that encloses it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from a top-left corner and a size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Box enclosing a circle
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Overlap test; touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() >= other.left()
            && self.left() <= other.right()
            && self.bottom() >= other.top()
            && self.top() <= other.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_touching() {
        let a = Aabb::from_origin_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_origin_size(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let touching = Aabb::from_origin_size(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        let apart = Aabb::from_origin_size(Vec2::new(11.0, 0.0), Vec2::new(5.0, 5.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_around_circle() {
        let bounds = Aabb::around(Vec2::new(50.0, 60.0), 10.0);
        assert_eq!(bounds.left(), 40.0);
        assert_eq!(bounds.right(), 60.0);
        assert_eq!(bounds.top(), 50.0);
        assert_eq!(bounds.bottom(), 70.0);
        assert_eq!(bounds.center(), Vec2::new(50.0, 60.0));
    }
}
