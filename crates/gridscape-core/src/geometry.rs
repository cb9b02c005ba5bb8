//! Integer geometry types for cell grids and pixel areas.
//!
//! Both coordinate systems used by Gridscape (cells and pixels) are integral,
//! so a single set of types serves both. Which space a value lives in is a
//! property of where it came from, not of its type.
//!
//! All arithmetic saturates at the `i32` bounds, so positions far outside any
//! view stay far outside instead of overflowing.

use std::ops::{Add, Mul, Neg, Sub};

/// A point in 2D integer space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Scale a cell coordinate into pixel space using a cell size.
    #[inline]
    pub const fn scale(self, cell: Size) -> Self {
        Self {
            x: self.x.saturating_mul(cell.width),
            y: self.y.saturating_mul(cell.height),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl Mul<Size> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Size) -> Point {
        self.scale(rhs)
    }
}

/// A size in 2D integer space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

impl Mul for Size {
    type Output = Size;

    #[inline]
    fn mul(self, rhs: Size) -> Size {
        Size::new(
            self.width.saturating_mul(rhs.width),
            self.height.saturating_mul(rhs.height),
        )
    }
}

/// A half-open rectangle defined by origin and size.
///
/// A rectangle covers `left..right` horizontally and `top..bottom` vertically,
/// so a 10x10 rectangle at the origin contains `(9, 9)` but not `(10, 10)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size components.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle from an origin point and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> i32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> i32 {
        self.origin.y
    }

    /// Right edge x coordinate (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.origin.x.saturating_add(self.size.width)
    }

    /// Bottom edge y coordinate (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.size.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Check if the rectangle is empty (zero or negative size).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Check whether two rectangles share at least one cell.
    ///
    /// Empty rectangles never intersect anything.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Compute the intersection of two rectangles.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(
                left,
                top,
                right.saturating_sub(left),
                bottom.saturating_sub(top),
            ))
        } else {
            None
        }
    }

    /// Return the same size moved to a new origin.
    #[inline]
    pub fn with_position(&self, origin: Point) -> Rect {
        Rect {
            origin,
            size: self.size,
        }
    }

    /// Grow every side: left and right by `dx`, top and bottom by `dy`.
    #[inline]
    pub fn expand(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.origin.x.saturating_sub(dx),
            self.origin.y.saturating_sub(dy),
            self.size.width.saturating_add(dx.saturating_mul(2)),
            self.size.height.saturating_add(dy.saturating_mul(2)),
        )
    }

    /// Offset the rectangle by the given amount.
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            origin: Point {
                x: self.origin.x.saturating_add(dx),
                y: self.origin.y.saturating_add(dy),
            },
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains(Point::new(0, 0)));
        assert!(rect.contains(Point::new(9, 9)));
        assert!(!rect.contains(Point::new(10, 9)));
        assert!(!rect.contains(Point::new(-1, 0)));
    }

    #[test]
    fn test_intersects_edges() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(a.intersects(&Rect::new(-4, -4, 5, 5)));
        assert!(!a.intersects(&Rect::new(-5, -5, 5, 5)));
    }

    #[test]
    fn test_empty_never_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(2, 2, 0, 3)));
        assert!(!Rect::ZERO.intersects(&a));
    }

    #[test]
    fn test_intersect_region() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(20, 20, 1, 1)), None);
    }

    #[test]
    fn test_expand_grows_both_sides() {
        let rect = Rect::new(16, 32, 80, 160).expand(8, 16);
        assert_eq!(rect, Rect::new(8, 16, 96, 192));
    }

    #[test]
    fn test_point_scaling() {
        let cell = Size::new(8, 16);
        assert_eq!(Point::new(2, 3) * cell, Point::new(16, 48));
        assert_eq!(Point::new(5, 5) - Point::new(1, 2), Point::new(4, 3));
        assert_eq!(Size::new(3, 2) * cell, Size::new(24, 32));
    }

    #[test]
    fn test_with_position_keeps_size() {
        let rect = Rect::new(100, 100, 40, 20).with_position(Point::new(8, 0));
        assert_eq!(rect, Rect::new(8, 0, 40, 20));
        assert_eq!(rect.offset(-8, 2), Rect::new(0, 2, 40, 20));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let far = Point::new(i32::MAX, i32::MIN);
        assert_eq!(far + Point::new(5, -5), far);
        assert_eq!(far - Point::new(-5, 5), far);
        assert_eq!(-Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
        assert_eq!(far * Size::new(8, 16), far);

        let edge = Rect::new(i32::MAX - 1, i32::MIN, 10, 10);
        assert_eq!(edge.right(), i32::MAX);
        assert!(!edge.intersects(&Rect::new(0, 0, 10, 10)));
        assert_eq!(edge.offset(100, -100).origin, Point::new(i32::MAX, i32::MIN));
        assert_eq!(Rect::new(0, 0, 1, 1).expand(i32::MAX, 0).width(), i32::MAX);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn rect() -> impl Strategy<Value = Rect> {
            (-50i32..50, -50i32..50, 0i32..30, 0i32..30).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
        }

        proptest! {
            #[test]
            fn intersects_matches_intersect(a in rect(), b in rect()) {
                prop_assert_eq!(a.intersects(&b), b.intersects(&a));
                prop_assert_eq!(a.intersects(&b), a.intersect(&b).is_some());
            }

            #[test]
            fn intersection_points_lie_in_both(a in rect(), b in rect(), px in -60i32..90, py in -60i32..90) {
                let point = Point::new(px, py);
                let in_both = a.contains(point) && b.contains(point);
                let in_intersection = a.intersect(&b).is_some_and(|r| r.contains(point));
                prop_assert_eq!(in_both, in_intersection);
            }
        }
    }
}
