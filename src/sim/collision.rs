//! Collision detection for axis-aligned boxes
//!
//! Every entity in the arena is a rectangle anchored at its top-left corner.
//! Overlap is strict: boxes that merely touch along an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test (all four inequalities strict)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Anything with a collision box
pub trait Bounds {
    fn bounds(&self) -> Rect;

    fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// Check whether two bounded entities overlap
#[inline]
pub fn check_collision(a: &impl Bounds, b: &impl Bounds) -> bool {
    a.bounds().overlaps(&b.bounds())
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Clamp a horizontal position so a box of `width` stays inside `[0, arena_width]`
#[inline]
pub fn clamp_x(x: f32, width: f32, arena_width: f32) -> f32 {
    x.clamp(0.0, (arena_width - width).max(0.0))
}

/// True when a point has left the arena by more than `margin` on any side
#[inline]
pub fn outside_arena(pos: Vec2, arena: Vec2, margin: f32) -> bool {
    pos.x < -margin || pos.x > arena.x + margin || pos.y < -margin || pos.y > arena.y + margin
}
