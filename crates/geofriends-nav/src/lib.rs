//! **geofriends-nav** — per-mover navigation for the two-mover diamond
//! collector.
//!
//! Each mover owns one [`Navigator`]. Setup rasterizes the level into a
//! [`Map`], places a visibility [`Graph`] on its landmarks and searches a
//! path to every diamond the mover can reach, filling a [`PathRegistry`].
//! Every tick the navigator moves the mover nodes, rebuilds adjacency and
//! recomputes the path to its current target.
//!
//! The two navigators share no search state. They settle who pursues which
//! diamond by exchanging [`Message`]s: the leader asks for the other
//! mover's cheapest path and [`arbitrate`]s between the two.
//!
//! | Module | Role |
//! |---|---|
//! | [`map`] | typed cells, line-of-sight walkability |
//! | [`graph`] | landmark nodes, adjacency, known paths |
//! | [`reach`] | jump and morph height limits |
//! | [`facts`] | relative position facts for the movement layer |
//! | [`protocol`] / [`mailbox`] | request/answer messages and their FIFO |
//! | [`sensors`] | latest-snapshot handoff from the sensor callback |

pub mod arbiter;
pub mod config;
pub mod error;
pub mod facts;
pub mod graph;
pub mod mailbox;
pub mod map;
pub mod navigator;
pub mod node;
pub mod path;
pub mod protocol;
pub mod reach;
pub mod registry;
pub mod sensors;

pub use arbiter::{Decision, arbitrate};
pub use config::NavConfig;
pub use error::NavError;
pub use facts::{Side, TargetFacts};
pub use graph::Graph;
pub use mailbox::Mailbox;
pub use map::{Cell, Map};
pub use navigator::Navigator;
pub use node::{Node, NodeIndexer};
pub use path::Path;
pub use protocol::{Action, Answer, Attachment, Command, Message, MessageIds, Request, Verdict};
pub use reach::ReachPolicy;
pub use registry::PathRegistry;
pub use sensors::SensorFeed;
