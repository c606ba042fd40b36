//! Geometry primitives: [`Point`], [`Range`] and Euclidean distances.
//!
//! Coordinates are game pixels. X grows right, Y grows down, so a target
//! "above" a mover has a smaller `y`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A pixel position, or a pixel offset when used as a velocity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point moved by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Squared distance to `other`. Exact, so it is safe for comparisons.
    #[inline]
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`, the edge cost of the navigation graph.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (self.distance_sq(other) as f64).sqrt() as f32
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.shift(rhs.x, rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.shift(-rhs.x, -rhs.y)
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f32 {
    a.distance(b)
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// An axis-aligned pixel rectangle, half-open: `min` is inside, `max` is not.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Range spanned by two opposite corners, given in any order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// The footprint of an object given by its centre and full extents.
    ///
    /// Odd extents lose their last pixel: the game reports centres and the
    /// rasterisation covers `[c - w/2, c + w/2)`.
    #[inline]
    pub fn from_center(center: Point, width: i32, height: i32) -> Self {
        let half = Point::new(width.max(0) / 2, height.max(0) / 2);
        let (min, max) = (center - half, center + half);
        Self::new(min.x, min.y, max.x, max.y)
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of pixels covered.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// The overlap of two ranges, or the empty default range.
    #[inline]
    pub fn intersect(self, other: Range) -> Self {
        let min = Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x < max.x && min.y < max.y {
            Self { min, max }
        } else {
            Self::default()
        }
    }

    /// Every pixel, row by row from the top.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
            len: self.len(),
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Row-major iterator over the pixels of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
    len: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.len {
            return None;
        }
        let w = self.range.width() as usize;
        let (row, col) = (self.next / w, self.next % w);
        self.next += 1;
        Some(self.range.min.shift(col as i32, row as i32))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_add_and_subtract() {
        let pos = Point::new(100, 370);
        let vel = Point::new(-8, 0);
        assert_eq!(pos + vel, Point::new(92, 370));
        assert_eq!((pos + vel) - pos, vel);
        assert_eq!(pos.shift(0, -30), Point::new(100, 340));
    }

    #[test]
    fn distances() {
        let a = Point::new(0, 0);
        let b = Point::new(30, -40);
        assert_eq!(a.distance_sq(b), 2_500);
        assert!((distance(a, b) - 50.0).abs() < 1e-6);
        assert_eq!(distance(b, b), 0.0);
        assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn corners_in_any_order() {
        let r = Range::new(40, 30, 10, 20);
        assert_eq!(r.min, Point::new(10, 20));
        assert_eq!(r.max, Point::new(40, 30));
        assert_eq!(r.len(), 300);
        assert_eq!(r.to_string(), "(10, 20)..(40, 30)");
    }

    #[test]
    fn centred_footprint_is_half_open() {
        let r = Range::from_center(Point::new(50, 20), 10, 4);
        assert_eq!(r, Range::new(45, 18, 55, 22));
        assert!(r.contains(Point::new(45, 18)));
        assert!(!r.contains(Point::new(55, 18)));
        assert!(!r.contains(Point::new(50, 22)));
        assert!(Range::from_center(Point::new(5, 5), 0, 0).is_empty());
        assert_eq!(Range::from_center(Point::new(5, 5), -4, 2).len(), 0);
    }

    #[test]
    fn iterates_rows_top_down() {
        let r = Range::new(-1, 5, 2, 7);
        let pts: Vec<_> = r.iter().collect();
        assert_eq!(r.iter().len(), 6);
        assert_eq!(pts.first(), Some(&Point::new(-1, 5)));
        assert_eq!(pts[3], Point::new(-1, 6));
        assert_eq!(pts.last(), Some(&Point::new(1, 6)));
        assert_eq!(Range::default().iter().count(), 0);
    }

    #[test]
    fn clip_to_level() {
        let level = Range::new(0, 0, 600, 400);
        let block = Range::from_center(Point::new(590, 395), 40, 20);
        assert_eq!(block.intersect(level), Range::new(570, 385, 600, 400));
        assert!(Range::new(700, 0, 710, 10).intersect(level).is_empty());
    }
}
