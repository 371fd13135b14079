// THEORY:
// `Rectangle` is the geometric currency of the engine. Search areas go in as
// rectangles and located regions come out as rectangles. Both axes are half-open,
// `[left, right) x [top, bottom)`, so a rectangle covering a whole W x H buffer is
// `{0, 0, W, H}` and its area is simply `width * height`.
//
// The locator signals "nothing matched" with an *inverted* rectangle (left past
// right, top past bottom). That value is not special-cased anywhere: every helper
// here treats a rectangle whose edges have crossed exactly like a zero-area one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

pub type Coordinate = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub left: Coordinate,
    pub top: Coordinate,
    pub right: Coordinate,
    pub bottom: Coordinate,
}

impl Rectangle {
    pub const fn new(left: Coordinate, top: Coordinate, right: Coordinate, bottom: Coordinate) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rectangle spanning an entire `width x height` buffer.
    pub fn covering(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as Coordinate, height as Coordinate)
    }

    /// True for zero-area and inverted (sentinel) rectangles alike.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    pub fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width() as u64 * self.height() as u64
        }
    }

    pub fn contains(&self, x: Coordinate, y: Coordinate) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    pub fn columns(&self) -> Range<Coordinate> {
        self.left..self.right
    }

    pub fn rows(&self) -> Range<Coordinate> {
        self.top..self.bottom
    }

    /// Pulls every edge inside `[0, width] x [0, height]`. Edge order is kept, so an
    /// inverted rectangle stays inverted (and therefore empty).
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let w = width as Coordinate;
        let h = height as Coordinate;
        Self {
            left: self.left.clamp(0, w),
            top: self.top.clamp(0, h),
            right: self.right.clamp(0, w),
            bottom: self.bottom.clamp(0, h),
        }
    }

    /// Grows the rectangle by `amount` on every side, then clamps it to the buffer.
    pub fn inflate(&self, amount: Coordinate, width: u32, height: u32) -> Self {
        Self {
            left: self.left - amount,
            top: self.top - amount,
            right: self.right + amount,
            bottom: self.bottom + amount,
        }
        .clamp_to(width, height)
    }

    /// The leftmost `1/divisor` slice of the rectangle, full height.
    pub fn leading_columns(&self, divisor: u32) -> Self {
        let divisor = divisor.max(1) as Coordinate;
        Self {
            right: self.left + (self.right - self.left) / divisor,
            ..*self
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.left, self.top, self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_rectangle_is_empty() {
        let sentinel = Rectangle::new(10, 10, 0, 0);
        assert!(sentinel.is_empty());
        assert_eq!(sentinel.area(), 0);
        assert_eq!(sentinel.width(), 0);
    }

    #[test]
    fn clamp_keeps_edges_inside_buffer() {
        let r = Rectangle::new(-5, -1, 50, 7).clamp_to(20, 10);
        assert_eq!(r, Rectangle::new(0, 0, 20, 7));
    }

    #[test]
    fn inflate_grows_then_clamps() {
        let r = Rectangle::new(2, 2, 4, 4).inflate(3, 6, 100);
        assert_eq!(r, Rectangle::new(0, 0, 6, 7));
    }

    #[test]
    fn leading_columns_takes_fraction_of_width() {
        let r = Rectangle::new(100, 10, 900, 50).leading_columns(8);
        assert_eq!(r, Rectangle::new(100, 10, 200, 50));
        assert_eq!(r.leading_columns(0), r);
    }

    #[test]
    fn display_lists_edges() {
        assert_eq!(Rectangle::new(1, 2, 3, 4).to_string(), "[1, 2, 3, 4]");
    }
}
