//! Shortest-path search over small navigation graphs.
//!
//! Graphs are addressed by dense node indices `0..node_count()`. The search
//! itself lives on [`SearchArena`], which owns the per-search scratch
//! records (cost so far, estimate, parent, open/closed state) so that the
//! graph's nodes stay plain value data and repeated queries reuse the same
//! allocations.
//!
//! - **A\*** lowest-cost route ([`SearchArena::astar_path`])
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | node count, neighbours, goal identity |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible estimate |

mod arena;
mod astar;
mod distance;
mod traits;

pub use arena::{Route, SearchArena};
pub use distance::{euclidean, polyline_length};
pub use traits::{AstarPather, Pather, WeightedPather};
