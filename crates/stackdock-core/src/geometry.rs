//! Rectangles in layout space.

use crate::math::Vec2;

/// An axis-aligned rectangle.
///
/// Stations, tab strips and displayers all describe their geometry with this
/// type. Edges are inclusive, so a point on the border is inside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal midpoint.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// The same rectangle moved by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Split off a band of `height` at the top.
    ///
    /// Returns `(top, rest)`; the band never exceeds the rectangle.
    pub fn split_top(&self, height: f32) -> (Self, Self) {
        let band = height.clamp(0.0, self.height.max(0.0));
        let top = Self {
            height: band,
            ..*self
        };
        let rest = Self {
            y: self.y + band,
            height: (self.height - band).max(0.0),
            ..*self
        };
        (top, rest)
    }

    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let rect = LayoutRect::new(10.0, 10.0, 20.0, 10.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 20.0)));
        assert!(!rect.contains(Vec2::new(30.1, 20.0)));
        assert!(!rect.contains(Vec2::new(9.9, 15.0)));
    }

    #[test]
    fn test_split_top() {
        let rect = LayoutRect::new(0.0, 0.0, 100.0, 80.0);
        let (top, rest) = rect.split_top(20.0);
        assert_eq!(top, LayoutRect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(rest, LayoutRect::new(0.0, 20.0, 100.0, 60.0));

        let (top, rest) = rect.split_top(200.0);
        assert_eq!(top.height, 80.0);
        assert_eq!(rest.height, 0.0);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_translate_and_center() {
        let rect = LayoutRect::new(0.0, 0.0, 40.0, 10.0);
        assert_eq!(rect.center_x(), 20.0);
        let moved = rect.translate(Vec2::new(5.0, -5.0));
        assert_eq!(moved.position(), Vec2::new(5.0, -5.0));
        assert_eq!(moved.size(), rect.size());
        assert_eq!(moved.right(), 45.0);
        assert_eq!(moved.bottom(), 5.0);
    }
}
