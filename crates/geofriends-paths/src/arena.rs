use std::cmp::Ordering;

/// The outcome of a successful search: node indices from start to goal and
/// the total traversal cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub nodes: Vec<usize>,
    pub cost: f32,
}

impl Route {
    /// First node of the route.
    pub fn start(&self) -> Option<usize> {
        self.nodes.first().copied()
    }

    /// Last node of the route.
    pub fn goal(&self) -> Option<usize> {
        self.nodes.last().copied()
    }
}

// ---------------------------------------------------------------------------
// Per-search scratch records
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Visit {
    Open,
    Closed,
}

/// Search state of one node. Only meaningful while `generation` matches
/// the arena's current generation.
#[derive(Clone, Debug)]
pub(crate) struct Scratch {
    pub(crate) g: f32,
    pub(crate) h: f32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) visit: Visit,
}

impl Default for Scratch {
    fn default() -> Self {
        Self {
            g: f32::INFINITY,
            h: 0.0,
            parent: usize::MAX,
            generation: 0,
            visit: Visit::Open,
        }
    }
}

/// Open-set entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest `f` first and, among equal `f`, the lowest index.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenRef {
    pub(crate) idx: usize,
    pub(crate) f: f32,
}

impl PartialEq for OpenRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenRef {}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchArena
// ---------------------------------------------------------------------------

/// Owner of all per-search scratch state.
///
/// Scratch records are indexed by node and stamped with a generation; each
/// search bumps the generation, which invalidates every record at once.
/// Nodes themselves never carry search state, so two searches can never
/// observe each other.
#[derive(Debug, Default)]
pub struct SearchArena {
    pub(crate) scratch: Vec<Scratch>,
    pub(crate) generation: u32,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<usize>,
}

impl SearchArena {
    /// Create an arena sized for `node_count` nodes. It grows on demand.
    pub fn new(node_count: usize) -> Self {
        Self {
            scratch: vec![Scratch::default(); node_count],
            generation: 0,
            nbuf: Vec::with_capacity(16),
        }
    }

    /// Number of scratch records currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.scratch.len()
    }

    /// Prepare for a search over `node_count` nodes and return the new
    /// generation.
    pub(crate) fn begin(&mut self, node_count: usize) -> u32 {
        if self.scratch.len() < node_count {
            self.scratch.resize(node_count, Scratch::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale records could alias the new generation.
            for s in self.scratch.iter_mut() {
                s.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }
}
