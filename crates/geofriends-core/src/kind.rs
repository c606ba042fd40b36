//! The shared tag vocabulary for map cells and graph nodes.

use std::fmt;

/// Which of the two movers an operation is about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoverKind {
    /// The small, fast mover. Rolls and jumps.
    Circle,
    /// The large, slow mover. Slides and morphs between wide and tall.
    Rectangle,
}

impl MoverKind {
    /// The other mover.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::Circle => Self::Rectangle,
            Self::Rectangle => Self::Circle,
        }
    }

    /// The object tag painted for this mover's body.
    #[inline]
    pub const fn as_object(self) -> ObjectKind {
        match self {
            Self::Circle => ObjectKind::Circle,
            Self::Rectangle => ObjectKind::Rectangle,
        }
    }

    /// The platform kind only this mover may pass through.
    #[inline]
    pub const fn own_platform(self) -> ObjectKind {
        match self {
            Self::Circle => ObjectKind::CirclePlatform,
            Self::Rectangle => ObjectKind::RectanglePlatform,
        }
    }
}

impl fmt::Display for MoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => f.write_str("circle"),
            Self::Rectangle => f.write_str("rectangle"),
        }
    }
}

/// What occupies a map cell, or what landmark a graph node stands for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    /// Open space for both movers.
    #[default]
    Space,
    /// Solid for both movers.
    Obstacle,
    /// A collectible.
    Diamond,
    /// Cells covered by the circle's body.
    Circle,
    /// Cells covered by the rectangle's body.
    Rectangle,
    /// A platform only the circle may pass through.
    CirclePlatform,
    /// A platform only the rectangle may pass through.
    RectanglePlatform,
}

impl ObjectKind {
    /// Whether `mover` may pass through this kind of cell.
    ///
    /// Obstacles block everyone; a platform blocks the mover it is *not*
    /// reserved for. Everything else, including the other mover's body and
    /// diamonds, is walkable.
    #[inline]
    pub const fn is_walkable_for(self, mover: MoverKind) -> bool {
        match (self, mover) {
            (Self::Obstacle, _) => false,
            (Self::RectanglePlatform, MoverKind::Circle) => false,
            (Self::CirclePlatform, MoverKind::Rectangle) => false,
            _ => true,
        }
    }

    /// Obstacles and both platform kinds.
    #[inline]
    pub const fn is_solid(self) -> bool {
        matches!(
            self,
            Self::Obstacle | Self::CirclePlatform | Self::RectanglePlatform
        )
    }
}
