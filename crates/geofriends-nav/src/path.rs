use std::fmt;

use geofriends_paths::polyline_length;

use crate::node::Node;

/// A route through the navigation graph, from a mover's node to a target.
///
/// A path always holds at least one node; its goal identifies the diamond
/// it serves. Paths are immutable once built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPath"))]
pub struct Path {
    nodes: Vec<Node>,
    cost: f32,
}

impl Path {
    /// Build a path from its nodes and total cost. `None` when `nodes` is
    /// empty.
    pub fn new(nodes: Vec<Node>, cost: f32) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }
        Some(Self { nodes, cost })
    }

    /// First node (the mover's position when the path was found).
    #[inline]
    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    /// Last node (the target).
    #[inline]
    pub fn goal(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes, endpoints included.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The Euclidean length of the node sequence, recomputed from positions.
    pub fn edge_cost_sum(&self) -> f32 {
        let pts: Vec<_> = self.nodes.iter().map(|n| n.pos).collect();
        polyline_length(&pts)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path to {} (cost {:.1}):", self.goal().pos, self.cost)?;
        for n in &self.nodes {
            write!(f, " {}", n.pos)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPath {
    nodes: Vec<Node>,
    cost: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPath> for Path {
    type Error = String;

    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        Path::new(raw.nodes, raw.cost).ok_or_else(|| "path has no nodes".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofriends_core::{ObjectKind, Point};

    fn node(index: usize, x: i32, y: i32, kind: ObjectKind) -> Node {
        Node {
            index,
            pos: Point::new(x, y),
            kind,
        }
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(Path::new(Vec::new(), 0.0).is_none());
    }

    #[test]
    fn endpoints_and_edge_sum() {
        let p = Path::new(
            vec![
                node(0, 0, 0, ObjectKind::Circle),
                node(4, 30, 40, ObjectKind::Obstacle),
                node(7, 30, 100, ObjectKind::Diamond),
            ],
            110.0,
        )
        .unwrap();
        assert_eq!(p.start().index, 0);
        assert_eq!(p.goal().index, 7);
        assert_eq!(p.len(), 3);
        assert!((p.edge_cost_sum() - 110.0).abs() < 1e-4);
        assert!(p.to_string().starts_with("path to (30, 100)"));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use geofriends_core::{ObjectKind, Point};

    #[test]
    fn round_trip_and_reject_empty() {
        let p = Path::new(
            vec![Node {
                index: 2,
                pos: Point::new(5, 6),
                kind: ObjectKind::Diamond,
            }],
            0.0,
        )
        .unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<Path>(r#"{"nodes":[],"cost":1.0}"#).is_err());
    }
}
