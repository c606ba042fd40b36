//! Level snapshots delivered by the host game.
//!
//! [`Level`] is the full geometry handed over once at setup; [`SensorUpdate`]
//! is the smaller per-tick snapshot. Both are plain data.

use crate::geom::{Point, Range};
use crate::kind::MoverKind;

/// Area of the rectangle mover in square pixels. The rectangle keeps its
/// area while morphing, so its width follows from its height.
pub const RECTANGLE_AREA: i32 = 10_000;

/// Position, velocity and size of one mover.
///
/// `size` is the radius for the circle and the current height for the
/// rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoverState {
    pub pos: Point,
    pub velocity: Point,
    pub size: i32,
}

impl MoverState {
    /// Create a resting mover.
    pub const fn new(pos: Point, size: i32) -> Self {
        Self {
            pos,
            velocity: Point::ZERO,
            size,
        }
    }

    /// Whether the mover has any velocity.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.velocity != Point::ZERO
    }

    /// Width and height of the body.
    pub fn extents(&self, kind: MoverKind, rectangle_area: i32) -> Point {
        match kind {
            MoverKind::Circle => Point::new(self.size * 2, self.size * 2),
            MoverKind::Rectangle => {
                let h = self.size.max(1);
                Point::new(rectangle_area / h, h)
            }
        }
    }

    /// The cells covered by the body. The circle is approximated by its
    /// bounding square.
    pub fn footprint(&self, kind: MoverKind, rectangle_area: i32) -> Range {
        let e = self.extents(kind, rectangle_area);
        Range::from_center(self.pos, e.x, e.y)
    }
}

/// An axis-aligned solid: an obstacle or a mover-exclusive platform.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub center: Point,
    pub width: i32,
    pub height: i32,
}

impl Block {
    pub const fn new(center: Point, width: i32, height: i32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// The painted cells.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::from_center(self.center, self.width, self.height)
    }

    /// The four corners, each pushed `offset` pixels outside the painted
    /// region.
    pub fn corners(&self, offset: i32) -> [Point; 4] {
        outer_corners(self.bounds(), offset)
    }
}

/// Corners of `r` pushed `offset` pixels outwards, in the order top-left,
/// top-right, bottom-left, bottom-right.
///
/// With `offset == 1` every corner lands on the first cell outside `r`.
pub fn outer_corners(r: Range, offset: i32) -> [Point; 4] {
    let left = r.min.x - offset;
    let right = r.max.x - 1 + offset;
    let top = r.min.y - offset;
    let bottom = r.max.y - 1 + offset;
    [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(left, bottom),
        Point::new(right, bottom),
    ]
}

/// The level geometry at setup time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    /// The playable area. The map covers exactly this range.
    pub area: Range,
    pub circle: MoverState,
    pub rectangle: MoverState,
    pub obstacles: Vec<Block>,
    pub circle_platforms: Vec<Block>,
    pub rectangle_platforms: Vec<Block>,
    /// Diamond centres.
    pub diamonds: Vec<Point>,
}

impl Level {
    /// State of the given mover.
    pub fn mover(&self, kind: MoverKind) -> &MoverState {
        match kind {
            MoverKind::Circle => &self.circle,
            MoverKind::Rectangle => &self.rectangle,
        }
    }
}

/// What the sensors report every tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorUpdate {
    pub circle: MoverState,
    pub rectangle: MoverState,
    /// Diamonds still in play.
    pub diamonds: Vec<Point>,
}

impl SensorUpdate {
    /// State of the given mover.
    pub fn mover(&self, kind: MoverKind) -> &MoverState {
        match kind {
            MoverKind::Circle => &self.circle,
            MoverKind::Rectangle => &self.rectangle,
        }
    }
}
