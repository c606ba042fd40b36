use std::collections::BinaryHeap;

use log::trace;

use crate::arena::{OpenRef, Route, SearchArena, Visit};
use crate::traits::AstarPather;

impl SearchArena {
    /// Compute the lowest-cost route from `from` to `to` using A*.
    ///
    /// Returns the full route (including both endpoints) or `None` if the
    /// goal is unreachable or either index is out of range. Identical inputs
    /// always produce the identical route: the open set breaks `f` ties by
    /// lowest node index and neighbours are expanded in index order.
    pub fn astar_path<P: AstarPather>(&mut self, pather: &P, from: usize, to: usize) -> Option<Route> {
        let n = pather.node_count();
        if from >= n || to >= n {
            return None;
        }

        if pather.same_node(from, to) {
            return Some(Route {
                nodes: vec![from],
                cost: 0.0,
            });
        }

        let cur_gen = self.begin(n);

        // Initialise the start node.
        {
            let s = &mut self.scratch[from];
            s.g = 0.0;
            s.h = pather.estimate(from, to);
            s.parent = usize::MAX;
            s.generation = cur_gen;
            s.visit = Visit::Open;
        }

        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        open.push(OpenRef {
            idx: from,
            f: self.scratch[from].h,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search None;
            };

            let ci = current.idx;
            let (current_g, current_h, visit) = {
                let s = &self.scratch[ci];
                (s.g, s.h, s.visit)
            };

            // Skip closed nodes and entries superseded by a cheaper push.
            if visit == Visit::Closed || current.f > current_g + current_h {
                continue;
            }

            if pather.same_node(ci, to) {
                break 'search Some(ci);
            }

            self.scratch[ci].visit = Visit::Closed;
            expanded += 1;

            nbuf.clear();
            pather.neighbors(ci, &mut nbuf);

            for &ni in nbuf.iter() {
                if ni >= n {
                    continue;
                }
                let tentative_g = current_g + pather.cost(ci, ni);

                let s = &mut self.scratch[ni];
                if s.generation == cur_gen {
                    if s.visit == Visit::Closed || tentative_g >= s.g {
                        continue;
                    }
                } else {
                    s.generation = cur_gen;
                    s.visit = Visit::Open;
                    s.h = pather.estimate(ni, to);
                }

                s.g = tentative_g;
                s.parent = ci;

                open.push(OpenRef {
                    idx: ni,
                    f: tentative_g + s.h,
                });
            }
        };

        self.nbuf = nbuf;

        let Some(goal) = found else {
            trace!("astar {from} -> {to}: no route after {expanded} expansions");
            return None;
        };

        // Reconstruct path.
        let mut nodes = Vec::new();
        let mut ci = goal;
        while ci != usize::MAX {
            nodes.push(ci);
            ci = self.scratch[ci].parent;
        }
        nodes.reverse();

        let cost = self.scratch[goal].g;
        trace!(
            "astar {from} -> {to}: {} nodes, cost {cost:.1}, {expanded} expansions",
            nodes.len()
        );
        Some(Route { nodes, cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Pather, WeightedPather};
    use geofriends_core::Point;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Points joined by an explicit symmetric edge list.
    struct TestGraph {
        pts: Vec<Point>,
        adj: Vec<Vec<bool>>,
    }

    impl TestGraph {
        fn new(pts: Vec<Point>) -> Self {
            let n = pts.len();
            Self {
                pts,
                adj: vec![vec![false; n]; n],
            }
        }

        fn link(&mut self, a: usize, b: usize) {
            self.adj[a][b] = true;
            self.adj[b][a] = true;
        }

        fn dist(&self, a: usize, b: usize) -> f32 {
            crate::euclidean(self.pts[a], self.pts[b])
        }
    }

    impl Pather for TestGraph {
        fn node_count(&self) -> usize {
            self.pts.len()
        }

        fn neighbors(&self, node: usize, buf: &mut Vec<usize>) {
            buf.extend((0..self.pts.len()).filter(|&j| self.adj[node][j]));
        }
    }

    impl WeightedPather for TestGraph {
        fn cost(&self, from: usize, to: usize) -> f32 {
            self.dist(from, to)
        }
    }

    impl AstarPather for TestGraph {
        fn estimate(&self, from: usize, to: usize) -> f32 {
            self.dist(from, to)
        }
    }

    /// Cheapest simple path cost by exhaustive DFS.
    fn brute_force(g: &TestGraph, from: usize, to: usize) -> Option<f32> {
        fn dfs(g: &TestGraph, at: usize, to: usize, seen: &mut Vec<bool>, acc: f32, best: &mut Option<f32>) {
            if at == to {
                if best.is_none_or(|b| acc < b) {
                    *best = Some(acc);
                }
                return;
            }
            for next in 0..g.pts.len() {
                if g.adj[at][next] && !seen[next] {
                    seen[next] = true;
                    dfs(g, next, to, seen, acc + g.dist(at, next), best);
                    seen[next] = false;
                }
            }
        }
        let mut seen = vec![false; g.pts.len()];
        seen[from] = true;
        let mut best = None;
        dfs(g, from, to, &mut seen, 0.0, &mut best);
        best
    }

    #[test]
    fn start_equals_goal() {
        let g = TestGraph::new(vec![Point::new(0, 0), Point::new(5, 5)]);
        let mut arena = SearchArena::default();
        let r = arena.astar_path(&g, 1, 1).unwrap();
        assert_eq!(r.nodes, vec![1]);
        assert_eq!(r.cost, 0.0);
    }

    #[test]
    fn out_of_range_is_none() {
        let g = TestGraph::new(vec![Point::new(0, 0)]);
        let mut arena = SearchArena::default();
        assert!(arena.astar_path(&g, 0, 3).is_none());
        assert!(arena.astar_path(&g, 7, 0).is_none());
    }

    #[test]
    fn disconnected_graph_has_no_route() {
        let mut g = TestGraph::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(50, 0),
            Point::new(60, 0),
        ]);
        g.link(0, 1);
        g.link(2, 3);
        let mut arena = SearchArena::new(4);
        assert!(arena.astar_path(&g, 0, 3).is_none());
        assert!(arena.astar_path(&g, 0, 1).is_some());
    }

    #[test]
    fn detour_around_missing_edge() {
        // 0 -- 1 -- 3 is short but 0 -> 3 direct is missing;
        // 0 -- 2 -- 3 is longer.
        let mut g = TestGraph::new(vec![
            Point::new(0, 0),
            Point::new(50, -20),
            Point::new(50, 60),
            Point::new(100, 0),
        ]);
        g.link(0, 1);
        g.link(1, 3);
        g.link(0, 2);
        g.link(2, 3);
        let mut arena = SearchArena::new(4);
        let r = arena.astar_path(&g, 0, 3).unwrap();
        assert_eq!(r.nodes, vec![0, 1, 3]);
        let expected = g.dist(0, 1) + g.dist(1, 3);
        assert!((r.cost - expected).abs() < 1e-4);
    }

    #[test]
    fn repeated_searches_are_identical() {
        // A square: both ways around have equal cost.
        let mut g = TestGraph::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(0, 10),
            Point::new(10, 10),
        ]);
        g.link(0, 1);
        g.link(0, 2);
        g.link(1, 3);
        g.link(2, 3);
        let mut arena = SearchArena::new(4);
        let first = arena.astar_path(&g, 0, 3).unwrap();
        for _ in 0..10 {
            assert_eq!(arena.astar_path(&g, 0, 3).unwrap(), first);
        }
        let mut fresh = SearchArena::default();
        assert_eq!(fresh.astar_path(&g, 0, 3).unwrap(), first);
    }

    #[test]
    fn optimal_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let n = rng.random_range(2..=10);
            let pts = (0..n)
                .map(|_| Point::new(rng.random_range(-100..100), rng.random_range(-100..100)))
                .collect();
            let mut g = TestGraph::new(pts);
            for a in 0..n {
                for b in (a + 1)..n {
                    if rng.random_bool(0.35) {
                        g.link(a, b);
                    }
                }
            }
            let from = rng.random_range(0..n);
            let to = rng.random_range(0..n);
            let mut arena = SearchArena::new(n);
            let route = arena.astar_path(&g, from, to);
            let best = if from == to { Some(0.0) } else { brute_force(&g, from, to) };
            match (route, best) {
                (None, None) => {}
                (Some(r), Some(b)) => {
                    assert!((r.cost - b).abs() < 1e-3, "astar {} vs brute {}", r.cost, b);
                    assert_eq!(r.start(), Some(from));
                    assert_eq!(r.goal(), Some(to));
                    let summed: f32 = r.nodes.windows(2).map(|w| g.dist(w[0], w[1])).sum();
                    assert!((summed - r.cost).abs() < 1e-3);
                    for w in r.nodes.windows(2) {
                        assert!(g.adj[w[0]][w[1]]);
                    }
                }
                (r, b) => panic!("astar {r:?} disagrees with brute force {b:?}"),
            }
        }
    }
}
