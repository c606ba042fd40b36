//! Tunables for one navigator.

use geofriends_core::{MoverKind, RECTANGLE_AREA};

use crate::error::NavError;

/// Configuration for a [`Navigator`](crate::Navigator).
///
/// The defaults are the game's physical constants; hosts normally only
/// change `leader`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// How far obstacle and platform corner nodes sit outside the solid.
    pub corner_offset: i32,
    /// Half-extent of the square painted for each diamond. Zero paints a
    /// single cell.
    pub diamond_extent: i32,
    /// Highest rise the circle can jump.
    pub circle_jump_height: i32,
    /// Highest rise the rectangle reaches by morphing up.
    pub rectangle_morph_height: i32,
    /// Highest rise the circle reaches when launched from the rectangle.
    pub cooperative_launch_height: i32,
    /// Constant area of the rectangle; its width is `area / height`.
    pub rectangle_area: i32,
    /// Dead zone used by the relative-position facts.
    pub facts_margin: i32,
    /// The mover that opens and decides target arbitration.
    pub leader: MoverKind,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            corner_offset: 1,
            diamond_extent: 0,
            circle_jump_height: 240,
            rectangle_morph_height: 150,
            cooperative_launch_height: 650,
            rectangle_area: RECTANGLE_AREA,
            facts_margin: 10,
            leader: MoverKind::Circle,
        }
    }
}

impl NavConfig {
    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), NavError> {
        let non_negative = [
            ("corner_offset", self.corner_offset),
            ("diamond_extent", self.diamond_extent),
            ("circle_jump_height", self.circle_jump_height),
            ("rectangle_morph_height", self.rectangle_morph_height),
            ("cooperative_launch_height", self.cooperative_launch_height),
            ("facts_margin", self.facts_margin),
        ];
        for (name, value) in non_negative {
            if value < 0 {
                return Err(NavError::InvalidConfig(format!("{name} is negative ({value})")));
            }
        }
        if self.rectangle_area <= 0 {
            return Err(NavError::InvalidConfig(format!(
                "rectangle_area must be positive ({})",
                self.rectangle_area
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = NavConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.circle_jump_height, 240);
        assert_eq!(cfg.rectangle_morph_height, 150);
        assert_eq!(cfg.leader, MoverKind::Circle);
    }

    #[test]
    fn rejects_negative_height() {
        let cfg = NavConfig {
            rectangle_morph_height: -1,
            ..NavConfig::default()
        };
        match cfg.validate() {
            Err(NavError::InvalidConfig(msg)) => assert!(msg.contains("rectangle_morph_height")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_area() {
        let cfg = NavConfig {
            rectangle_area: 0,
            ..NavConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
