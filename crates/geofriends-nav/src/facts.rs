//! Per-tick positional facts for the movement layer.

use geofriends_core::{MoverKind, MoverState, Point};

use crate::map::Map;

/// Where a value sits relative to a reference, with a dead zone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Before,
    #[default]
    Aligned,
    After,
}

impl Side {
    /// `Before` when `value < reference - margin`, `After` when
    /// `value > reference + margin`.
    pub fn of(value: i32, reference: i32, margin: i32) -> Self {
        if value < reference - margin {
            Self::Before
        } else if value > reference + margin {
            Self::After
        } else {
            Self::Aligned
        }
    }
}

/// What the movement layer needs to know about the mover, its target and
/// the other mover. Screen axes: `Before` on `vertical` means above.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetFacts {
    /// Left of (`Before`) or right of (`After`) the target.
    pub horizontal: Side,
    /// Above (`Before`) or below (`After`) the target.
    pub vertical: Side,
    /// The straight line to the target is not walkable.
    pub obstacle_between: bool,
    pub other_horizontal: Side,
    pub other_vertical: Side,
    /// Neither clearly beside nor clearly above or below the other mover.
    pub near_other: bool,
    pub moving: bool,
    pub other_moving: bool,
}

impl TargetFacts {
    /// Compute facts for `mover` heading to `target`.
    ///
    /// The relation to the other mover uses both bodies' half-extents plus
    /// `margin`; `rectangle_area` gives the rectangle's width.
    pub fn compute(
        mover: MoverKind,
        me: &MoverState,
        other: &MoverState,
        target: Point,
        map: &Map,
        margin: i32,
        rectangle_area: i32,
    ) -> Self {
        let (circle, rectangle) = match mover {
            MoverKind::Circle => (me, other),
            MoverKind::Rectangle => (other, me),
        };
        let c = circle.extents(MoverKind::Circle, rectangle_area);
        let r = rectangle.extents(MoverKind::Rectangle, rectangle_area);
        let gap_x = c.x / 2 + r.x / 2 + margin;
        let gap_y = c.y / 2 + r.y / 2 + margin;

        let other_horizontal = Side::of(me.pos.x, other.pos.x, gap_x);
        let other_vertical = Side::of(me.pos.y, other.pos.y, gap_y);

        Self {
            horizontal: Side::of(me.pos.x, target.x, margin),
            vertical: Side::of(me.pos.y, target.y, margin),
            obstacle_between: !map.is_line_walkable(me.pos, target, mover),
            other_horizontal,
            other_vertical,
            near_other: other_horizontal == Side::Aligned && other_vertical == Side::Aligned,
            moving: me.is_moving(),
            other_moving: other.is_moving(),
        }
    }
}
