//! Axis-aligned bounding-box collision

use glam::Vec2;

/// Axis-aligned rectangle, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            w,
            h,
        }
    }

    /// Strict overlap test: rectangles that merely share an edge do not hit
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.w
            && self.pos.x + self.w > other.pos.x
            && self.pos.y < other.pos.y + other.h
            && self.pos.y + self.h > other.pos.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_detected() {
        let a = Rect::new(0.0, 0.0, 50.0, 90.0);
        let b = Rect::new(30.0, 60.0, 50.0, 90.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_separated_rects_do_not_hit() {
        let a = Rect::new(0.0, 0.0, 50.0, 90.0);
        let b = Rect::new(100.0, 0.0, 50.0, 90.0);
        assert!(!a.overlaps(&b));

        let below = Rect::new(0.0, 200.0, 50.0, 90.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_edge_touch_is_not_a_hit() {
        let a = Rect::new(0.0, 0.0, 50.0, 90.0);
        let right = Rect::new(50.0, 0.0, 50.0, 90.0);
        let under = Rect::new(0.0, 90.0, 50.0, 90.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&under));
    }

    #[test]
    fn test_contained_rect_hits() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(25.0, 25.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
