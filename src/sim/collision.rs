//! Axis-aligned collision primitives
//!
//! Everything in the game is a rectangle: cannon, enemies, projectiles,
//! the bonus saucer. Overlap is half-open on both axes so rectangles that
//! merely share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
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
}

/// True iff the two rectangles intersect (half-open interval overlap)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_disjoint_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));

        let c = Rect::new(0.0, 30.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Half-open intervals: sharing an edge is not a collision
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));

        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 4.0, 32.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }
}
