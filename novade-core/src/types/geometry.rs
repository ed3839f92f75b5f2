//! Integer geometry for output placement.
//!
//! Outputs live in a shared, signed coordinate space (an output left of the
//! primary one has a negative `x`), while their sizes are never negative.
//! Hence `PointInt` uses `i32` and `SizeInt` uses `u32`.

use serde::{Deserialize, Serialize};

/// An integer point with `i32` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointInt {
    pub x: i32,
    pub y: i32,
}

impl PointInt {
    /// Creates a new `PointInt`.
    pub const fn new(x: i32, y: i32) -> Self {
        PointInt { x, y }
    }
}

impl From<(i32, i32)> for PointInt {
    fn from((x, y): (i32, i32)) -> Self {
        PointInt::new(x, y)
    }
}

/// An integer size with `u32` dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SizeInt {
    pub width: u32,
    pub height: u32,
}

impl SizeInt {
    /// Creates a new `SizeInt`.
    pub const fn new(width: u32, height: u32) -> Self {
        SizeInt { width, height }
    }

    /// Checks if the area is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An integer rectangle with `i32` origin and `u32` size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RectInt {
    /// The origin point (top-left corner) of the rectangle.
    pub origin: PointInt,
    /// The size (width and height) of the rectangle.
    pub size: SizeInt,
}

impl RectInt {
    /// Creates a new `RectInt` from an origin point and a size.
    pub const fn new(origin: PointInt, size: SizeInt) -> Self {
        RectInt { origin, size }
    }

    /// Creates a new `RectInt` from individual coordinate and dimension values.
    pub const fn from_coords(x: i32, y: i32, width: u32, height: u32) -> Self {
        RectInt {
            origin: PointInt::new(x, y),
            size: SizeInt::new(width, height),
        }
    }

    /// Creates a rectangle of the given size anchored at the origin.
    pub const fn from_size(size: SizeInt) -> Self {
        RectInt { origin: PointInt::new(0, 0), size }
    }

    pub fn x(&self) -> i32 { self.origin.x }
    pub fn y(&self) -> i32 { self.origin.y }
    pub fn width(&self) -> u32 { self.size.width }
    pub fn height(&self) -> u32 { self.size.height }

    /// Returns the x-coordinate of the left edge.
    pub fn left(&self) -> i32 { self.origin.x }
    /// Returns the y-coordinate of the top edge.
    pub fn top(&self) -> i32 { self.origin.y }

    /// Calculates the x-coordinate of the right edge (exclusive), clamped to `i32::MAX`.
    pub fn right(&self) -> i32 {
        clamp_to_i32(far_edge(self.origin.x, self.size.width))
    }

    /// Calculates the y-coordinate of the bottom edge (exclusive), clamped to `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        clamp_to_i32(far_edge(self.origin.y, self.size.height))
    }

    /// Checks if a point is contained within the rectangle.
    /// Edges are inclusive for left/top, exclusive for right/bottom.
    pub fn contains_point(&self, point: PointInt) -> bool {
        point.x >= self.left() && point.x < self.right() &&
        point.y >= self.top() && point.y < self.bottom()
    }

    /// Calculates the smallest rectangle that contains both this and another `RectInt`.
    ///
    /// A span wider than `u32::MAX` saturates.
    pub fn union(&self, other: &RectInt) -> RectInt {
        let x1 = self.left().min(other.left());
        let y1 = self.top().min(other.top());
        let x2 = far_edge(self.origin.x, self.size.width).max(far_edge(other.origin.x, other.size.width));
        let y2 = far_edge(self.origin.y, self.size.height).max(far_edge(other.origin.y, other.size.height));

        RectInt::from_coords(x1, y1, span(x1, x2), span(y1, y2))
    }

    /// Returns the same rectangle moved so that its origin is `origin`.
    pub fn at(&self, origin: PointInt) -> RectInt {
        RectInt::new(origin, self.size)
    }

    /// Checks if the rectangle has zero width or height.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }
}

fn far_edge(start: i32, len: u32) -> i64 {
    i64::from(start) + i64::from(len)
}

fn clamp_to_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

fn span(start: i32, end: i64) -> u32 {
    u32::try_from(end - i64::from(start)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use static_assertions::assert_impl_all;

    assert_impl_all!(PointInt: std::fmt::Debug, Clone, Copy, PartialEq, Eq, std::hash::Hash, Default, Serialize, Send, Sync);
    assert_impl_all!(SizeInt: std::fmt::Debug, Clone, Copy, PartialEq, Eq, std::hash::Hash, Default, Serialize, Send, Sync);
    assert_impl_all!(RectInt: std::fmt::Debug, Clone, Copy, PartialEq, Eq, std::hash::Hash, Default, Serialize, Send, Sync);

    #[test]
    fn test_rect_edges() {
        let rect = RectInt::from_coords(-1920, 0, 1920, 1080);
        assert_eq!(rect.left(), -1920);
        assert_eq!(rect.right(), 0);
        assert_eq!(rect.top(), 0);
        assert_eq!(rect.bottom(), 1080);
    }

    #[test]
    fn test_rect_contains_point_is_half_open() {
        let rect = RectInt::from_coords(0, 0, 100, 50);
        assert!(rect.contains_point(PointInt::new(0, 0)));
        assert!(rect.contains_point(PointInt::new(99, 49)));
        assert!(!rect.contains_point(PointInt::new(100, 10)));
        assert!(!rect.contains_point(PointInt::new(10, 50)));
    }

    #[test]
    fn test_rect_union_side_by_side_outputs() {
        let left = RectInt::from_coords(0, 0, 2560, 1440);
        let right = RectInt::from_coords(2560, 200, 1920, 1080);
        assert_eq!(left.union(&right), RectInt::from_coords(0, 0, 4480, 1440));
    }

    #[test]
    fn test_rect_union_with_negative_origin() {
        let primary = RectInt::from_coords(0, 0, 1920, 1080);
        let above = RectInt::from_coords(0, -1080, 1920, 1080);
        assert_eq!(primary.union(&above), RectInt::from_coords(0, -1080, 1920, 2160));
    }

    #[test]
    fn test_from_size_and_at() {
        let bounds = RectInt::from_size(SizeInt::new(800, 600));
        assert_eq!(bounds.origin, PointInt::new(0, 0));
        assert_eq!(bounds.at(PointInt::new(10, 20)), RectInt::from_coords(10, 20, 800, 600));
    }

    #[test]
    fn test_empty_rect() {
        assert!(RectInt::from_coords(5, 5, 0, 10).is_empty());
        assert!(!RectInt::from_coords(5, 5, 1, 1).is_empty());
    }

    #[test]
    fn test_huge_width_does_not_wrap() {
        let rect = RectInt::from_coords(0, 0, u32::MAX, 10);
        assert_eq!(rect.right(), i32::MAX);
        assert!(rect.contains_point(PointInt::new(i32::MAX - 1, 5)));

        let far_left = RectInt::from_coords(i32::MIN, 0, 10, 10);
        assert_eq!(far_left.right(), i32::MIN + 10);
    }

    #[test]
    fn test_union_of_extreme_rects_saturates() {
        let far_left = RectInt::from_coords(i32::MIN, 0, 10, 10);
        let far_right = RectInt::from_coords(i32::MAX - 10, 0, 10, 10);
        assert_eq!(far_left.union(&far_right), RectInt::from_coords(i32::MIN, 0, u32::MAX, 10));

        let wide = RectInt::from_coords(-10, 0, u32::MAX, 10);
        assert_eq!(wide.union(&far_left), RectInt::from_coords(i32::MIN, 0, u32::MAX, 10));
    }
}
