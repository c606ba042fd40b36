/// Minimal search interface over a graph whose nodes are dense indices
/// `0..node_count()`.
pub trait Pather {
    /// Number of nodes. Valid indices are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Append the neighbours of `node` into `buf`, in ascending index order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, node: usize, buf: &mut Vec<usize>);

    /// Whether `a` and `b` denote the same node for the goal test.
    ///
    /// Defaults to index identity. Graphs whose nodes carry a structural
    /// identity may widen this.
    fn same_node(&self, a: usize, b: usize) -> bool {
        a == b
    }
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to the adjacent `to`. Must be > 0.
    fn cost(&self, from: usize, to: usize) -> f32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: usize, to: usize) -> f32;
}
