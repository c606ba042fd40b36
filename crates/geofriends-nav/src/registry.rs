//! The known-paths cache: at most one path per live diamond.

use crate::node::Node;
use crate::path::Path;

/// Per-mover cache of the cheapest known path to each pursuable diamond.
///
/// Entries keep their insertion order; replacing the path for a goal keeps
/// the entry's slot. [`cheapest`](Self::cheapest) scans with a strict `<`,
/// so among equal costs the earliest entry wins.
#[derive(Debug, Clone, Default)]
pub struct PathRegistry {
    paths: Vec<Path>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `path` under its goal, replacing any path to the same goal.
    pub fn insert(&mut self, path: Path) {
        match self.paths.iter_mut().find(|p| p.goal() == path.goal()) {
            Some(slot) => *slot = path,
            None => self.paths.push(path),
        }
    }

    /// The path with the lowest cost, or `None` when empty.
    pub fn cheapest(&self) -> Option<&Path> {
        let mut best: Option<&Path> = None;
        for p in &self.paths {
            if best.is_none_or(|b| p.cost() < b.cost()) {
                best = Some(p);
            }
        }
        best
    }

    /// Drop the path to `goal` and return the new cheapest path.
    pub fn remove_target(&mut self, goal: &Node) -> Option<&Path> {
        self.paths.retain(|p| p.goal() != goal);
        self.cheapest()
    }

    /// Whether some path leads to `goal`.
    pub fn contains(&self, goal: &Node) -> bool {
        self.paths.iter().any(|p| p.goal() == goal)
    }

    /// The path to `goal`.
    pub fn get(&self, goal: &Node) -> Option<&Path> {
        self.paths.iter().find(|p| p.goal() == goal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    /// The registered goals, in insertion order.
    pub fn goals(&self) -> impl Iterator<Item = &Node> {
        self.paths.iter().map(|p| p.goal())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
