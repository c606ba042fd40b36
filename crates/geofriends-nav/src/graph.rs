//! The per-mover visibility graph and its known-paths registry.
//!
//! Nodes sit on landmarks: both movers, the outer corners of every solid,
//! and every diamond. Two nodes are adjacent when the mover can travel the
//! straight line between them on the current map. The mover's nodes keep
//! their indices across refreshes; only their positions change.

use geofriends_core::{Level, MoverKind, MoverState, ObjectKind, Point, outer_corners};
use geofriends_paths::{AstarPather, Pather, SearchArena, WeightedPather, euclidean};
use log::{debug, trace};

use crate::config::NavConfig;
use crate::error::NavError;
use crate::map::Map;
use crate::node::{Node, NodeIndexer};
use crate::path::Path;
use crate::reach::ReachPolicy;
use crate::registry::PathRegistry;

/// Navigation graph for one mover.
#[derive(Debug, Clone)]
pub struct Graph {
    mover: MoverKind,
    nodes: Vec<Node>,
    // row-major n x n
    adjacency: Vec<bool>,
    circle_node: Option<usize>,
    rectangle_node: Option<usize>,
    diamond_nodes: Vec<usize>,
    // circle graph only: the rectangle's body treated as an obstacle
    body_corners: Vec<usize>,
    corner_offset: i32,
    rectangle_area: i32,
    known: PathRegistry,
}

impl Graph {
    /// An empty graph for `mover`, using the default corner offset and
    /// rectangle area.
    pub fn new(mover: MoverKind) -> Self {
        let cfg = NavConfig::default();
        Self {
            mover,
            nodes: Vec::new(),
            adjacency: Vec::new(),
            circle_node: None,
            rectangle_node: None,
            diamond_nodes: Vec::new(),
            body_corners: Vec::new(),
            corner_offset: cfg.corner_offset,
            rectangle_area: cfg.rectangle_area,
            known: PathRegistry::new(),
        }
    }

    /// Build nodes and adjacency for `mover` from a level snapshot.
    pub fn build(mover: MoverKind, level: &Level, cfg: &NavConfig, map: &Map) -> Result<Self, NavError> {
        let mut g = Self::new(mover);
        g.corner_offset = cfg.corner_offset;
        g.rectangle_area = cfg.rectangle_area;
        g.build_nodes(level)?;
        g.build_adjacency(map);
        debug!(
            "{mover} graph: {} nodes, {} diamonds, {} edges",
            g.nodes.len(),
            g.diamond_nodes.len(),
            g.edge_count()
        );
        Ok(g)
    }

    /// Add a node. Indices must be dense and in order: the node's index
    /// must equal the current node count.
    ///
    /// Mover and diamond nodes are recorded by kind.
    pub fn add_node(&mut self, node: Node) -> Result<(), NavError> {
        let expected = self.nodes.len();
        if node.index < expected {
            return Err(NavError::DuplicateNode { index: node.index });
        }
        if node.index > expected {
            return Err(NavError::SparseNode {
                index: node.index,
                expected,
            });
        }
        match node.kind {
            ObjectKind::Circle => self.circle_node = Some(node.index),
            ObjectKind::Rectangle => self.rectangle_node = Some(node.index),
            ObjectKind::Diamond => self.diamond_nodes.push(node.index),
            _ => {}
        }
        self.nodes.push(node);
        // stale until the next build_adjacency
        self.adjacency.clear();
        Ok(())
    }

    /// Place nodes on every landmark of `level`.
    ///
    /// Order: rectangle, circle, obstacle corners, circle-platform corners,
    /// rectangle-platform corners, (circle graph only) the rectangle's body
    /// corners as obstacles, diamonds.
    pub fn build_nodes(&mut self, level: &Level) -> Result<(), NavError> {
        let mut ix = NodeIndexer::new();
        let off = self.corner_offset;

        self.add_node(Node::new(&mut ix, level.rectangle.pos, ObjectKind::Rectangle))?;
        self.add_node(Node::new(&mut ix, level.circle.pos, ObjectKind::Circle))?;

        let solids = [
            (&level.obstacles, ObjectKind::Obstacle),
            (&level.circle_platforms, ObjectKind::CirclePlatform),
            (&level.rectangle_platforms, ObjectKind::RectanglePlatform),
        ];
        for (blocks, kind) in solids {
            for b in blocks {
                for c in b.corners(off) {
                    self.add_node(Node::new(&mut ix, c, kind))?;
                }
            }
        }

        if self.mover == MoverKind::Circle {
            for c in self.body_corner_points(&level.rectangle) {
                let node = Node::new(&mut ix, c, ObjectKind::Obstacle);
                self.body_corners.push(node.index);
                self.add_node(node)?;
            }
        }

        for &d in &level.diamonds {
            self.add_node(Node::new(&mut ix, d, ObjectKind::Diamond))?;
        }
        Ok(())
    }

    fn body_corner_points(&self, rectangle: &MoverState) -> [Point; 4] {
        let body = rectangle.footprint(MoverKind::Rectangle, self.rectangle_area);
        outer_corners(body, self.corner_offset)
    }

    /// Recompute the whole adjacency matrix against `map`.
    pub fn build_adjacency(&mut self, map: &Map) {
        let n = self.nodes.len();
        self.adjacency.clear();
        self.adjacency.resize(n * n, false);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    self.adjacency[i * n + j] =
                        map.is_line_walkable(self.nodes[i].pos, self.nodes[j].pos, self.mover);
                }
            }
        }
    }

    /// Move the mover nodes (and the rectangle's body corners on the circle
    /// graph) and rebuild adjacency.
    pub fn refresh(&mut self, map: &Map, circle_pos: Point, rectangle_pos: Point, rectangle_height: i32) {
        if let Some(i) = self.circle_node {
            self.nodes[i].pos = circle_pos;
        }
        if let Some(i) = self.rectangle_node {
            self.nodes[i].pos = rectangle_pos;
        }
        if !self.body_corners.is_empty() {
            let corners = self.body_corner_points(&MoverState::new(rectangle_pos, rectangle_height));
            for (&i, c) in self.body_corners.iter().zip(corners) {
                self.nodes[i].pos = c;
            }
        }
        self.build_adjacency(map);
        trace!("{} graph refreshed: {} edges", self.mover, self.edge_count());
    }

    /// Whether the mover can go straight from node `i` to node `j`.
    #[inline]
    pub fn adjacent(&self, i: usize, j: usize) -> bool {
        let n = self.nodes.len();
        i < n && j < n && self.adjacency.get(i * n + j).copied().unwrap_or(false)
    }

    /// Nodes reachable in one straight move from node `i`, by index.
    pub fn neighbors(&self, i: usize) -> Vec<&Node> {
        (0..self.nodes.len())
            .filter(|&j| self.adjacent(i, j))
            .map(|j| &self.nodes[j])
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.iter().filter(|&&a| a).count()
    }

    #[inline]
    pub fn node(&self, i: usize) -> Option<&Node> {
        self.nodes.get(i)
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The mover this graph's adjacency was computed for.
    #[inline]
    pub fn mover(&self) -> MoverKind {
        self.mover
    }

    pub fn circle_node(&self) -> Option<&Node> {
        self.circle_node.map(|i| &self.nodes[i])
    }

    pub fn rectangle_node(&self) -> Option<&Node> {
        self.rectangle_node.map(|i| &self.nodes[i])
    }

    /// The node of the mover this graph belongs to.
    pub fn mover_node(&self) -> Option<&Node> {
        match self.mover {
            MoverKind::Circle => self.circle_node(),
            MoverKind::Rectangle => self.rectangle_node(),
        }
    }

    pub fn diamond_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.diamond_nodes.iter().map(|&i| &self.nodes[i])
    }

    /// Index of the node equal to `node` (same position and kind). Used for
    /// nodes that come from the other mover's graph.
    pub fn find(&self, node: &Node) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }

    /// Lowest-cost path from `start` to `goal`, or `None` if the goal is
    /// cut off.
    pub fn find_path(&self, arena: &mut SearchArena, start: usize, goal: usize) -> Option<Path> {
        let Some(route) = arena.astar_path(self, start, goal) else {
            debug!("{} graph: no path from {start} to {goal}", self.mover);
            return None;
        };
        let nodes = route.nodes.iter().map(|&i| self.nodes[i]).collect();
        let path = Path::new(nodes, route.cost)?;
        debug!("{} graph: found {path}", self.mover);
        Some(path)
    }

    // -----------------------------------------------------------------------
    // Known paths
    // -----------------------------------------------------------------------

    /// Search a path to every diamond the mover can reach on its own and
    /// register those found.
    ///
    /// Returns the diamonds that fail the individual reach test but are
    /// within reach of both movers working together.
    pub fn seed_from_all_targets(&mut self, arena: &mut SearchArena, reach: &ReachPolicy, map: &Map) -> Vec<Node> {
        let mut cooperative = Vec::new();
        let Some(start) = self.mover_node().copied() else {
            return cooperative;
        };
        let diamonds: Vec<Node> = self.diamond_nodes().copied().collect();
        for target in diamonds {
            if !reach.can_reach(&start, &target, map) {
                if reach.can_reach_together(&start, &target) {
                    cooperative.push(target);
                }
                debug!("{} cannot reach {} alone", self.mover, target.pos);
                continue;
            }
            if let Some(path) = self.find_path(arena, start.index, target.index) {
                self.known.insert(path);
            }
        }
        cooperative
    }

    /// The cheapest registered path.
    pub fn cheapest_known_path(&self) -> Option<&Path> {
        self.known.cheapest()
    }

    /// Forget the path to `target` and return the new cheapest path.
    pub fn remove_target(&mut self, target: &Node) -> Option<&Path> {
        self.known.remove_target(target)
    }

    /// Search again from the mover's current node to `target_index` and
    /// replace the registered path.
    ///
    /// Only targets still in the registry are updated. When no path exists
    /// right now the previous entry is kept and `None` is returned.
    pub fn recompute_for(&mut self, arena: &mut SearchArena, target_index: usize) -> Option<&Path> {
        let target = *self.nodes.get(target_index)?;
        if !self.known.contains(&target) {
            return None;
        }
        let start = self.mover_node()?.index;
        let path = self.find_path(arena, start, target_index)?;
        self.known.insert(path);
        self.known.get(&target)
    }

    /// All registered paths.
    #[inline]
    pub fn known_paths(&self) -> &PathRegistry {
        &self.known
    }
}

// ---------------------------------------------------------------------------
// Search traits
// ---------------------------------------------------------------------------

impl Pather for Graph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn neighbors(&self, node: usize, buf: &mut Vec<usize>) {
        let n = self.nodes.len();
        let Some(row) = self.adjacency.get(node * n..(node + 1) * n) else {
            return;
        };
        buf.extend(row.iter().enumerate().filter(|(_, a)| **a).map(|(j, _)| j));
    }

    fn same_node(&self, a: usize, b: usize) -> bool {
        self.nodes[a] == self.nodes[b]
    }
}

impl WeightedPather for Graph {
    fn cost(&self, from: usize, to: usize) -> f32 {
        euclidean(self.nodes[from].pos, self.nodes[to].pos)
    }
}

impl AstarPather for Graph {
    fn estimate(&self, from: usize, to: usize) -> f32 {
        euclidean(self.nodes[from].pos, self.nodes[to].pos)
    }
}
