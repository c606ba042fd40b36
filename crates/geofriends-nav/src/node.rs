use std::fmt;

use geofriends_core::{ObjectKind, Point};

/// Hands out dense node indices for one graph build.
///
/// Each build owns its indexer, so indices start at zero per graph and two
/// graphs never share a counter.
#[derive(Debug, Default)]
pub struct NodeIndexer {
    next: usize,
}

impl NodeIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next index.
    pub fn next_index(&mut self) -> usize {
        let i = self.next;
        self.next += 1;
        i
    }

    /// How many indices have been handed out.
    pub fn issued(&self) -> usize {
        self.next
    }
}

/// A point of interest in the navigation graph.
///
/// Two nodes are equal when they stand for the same landmark: same position
/// and kind. The index only locates the node inside its own graph, so a
/// node received from the other mover compares equal to the local node for
/// the same diamond.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub index: usize,
    pub pos: Point,
    pub kind: ObjectKind,
}

impl Node {
    /// Create a node with the indexer's next index.
    pub fn new(indexer: &mut NodeIndexer, pos: Point, kind: ObjectKind) -> Self {
        Self {
            index: indexer.next_index(),
            pos,
            kind,
        }
    }

    /// Whether this node marks a diamond.
    #[inline]
    pub fn is_diamond(&self) -> bool {
        self.kind == ObjectKind::Diamond
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.kind == other.kind
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {:?} {}", self.index, self.kind, self.pos)
    }
}
