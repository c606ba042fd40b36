//! **geofriends-core** — shared types for the two-mover diamond collector.
//!
//! This crate provides the vocabulary used across the *geofriends*
//! workspace: integer geometry, the object/mover tags used by both the
//! rasterized map and the navigation graph, and the level snapshots the host
//! game hands to each mover.

pub mod geom;
pub mod kind;
pub mod level;

pub use geom::{Point, Range, distance};
pub use kind::{MoverKind, ObjectKind};
pub use level::{Block, Level, MoverState, RECTANGLE_AREA, SensorUpdate, outer_corners};
