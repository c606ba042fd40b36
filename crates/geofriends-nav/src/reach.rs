//! Physical reach filters, applied before a target enters the registry.

use geofriends_core::{ObjectKind, Point};

use crate::config::NavConfig;
use crate::map::Map;
use crate::node::Node;

/// Height limits deciding which diamonds a mover can get to at all,
/// independent of graph connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachPolicy {
    pub circle_jump_height: i32,
    pub rectangle_morph_height: i32,
    pub cooperative_launch_height: i32,
}

impl ReachPolicy {
    pub fn new(cfg: &NavConfig) -> Self {
        Self {
            circle_jump_height: cfg.circle_jump_height,
            rectangle_morph_height: cfg.rectangle_morph_height,
            cooperative_launch_height: cfg.cooperative_launch_height,
        }
    }

    /// Whether the mover at `mover_node` can reach `target` on its own.
    ///
    /// The circle may rise up to its jump height. The rectangle may rise up
    /// to its morph height, and no circle-only platform may lie on its row
    /// between it and the target. Nodes that are not movers reach nothing.
    pub fn can_reach(&self, mover_node: &Node, target: &Node, map: &Map) -> bool {
        let rise = rise(mover_node.pos, target.pos);
        match mover_node.kind {
            ObjectKind::Circle => rise <= self.circle_jump_height,
            ObjectKind::Rectangle => {
                rise <= self.rectangle_morph_height && !platform_on_row(map, mover_node.pos, target.pos.x)
            }
            _ => false,
        }
    }

    /// Whether `target` is within reach of the circle launched from the
    /// rectangle's top.
    pub fn can_reach_together(&self, mover_node: &Node, target: &Node) -> bool {
        rise(mover_node.pos, target.pos) <= self.cooperative_launch_height
    }
}

/// How far above `from` the point `to` lies. Negative when below.
#[inline]
fn rise(from: Point, to: Point) -> i32 {
    from.y - to.y
}

fn platform_on_row(map: &Map, from: Point, to_x: i32) -> bool {
    let (lo, hi) = (from.x.min(to_x), from.x.max(to_x));
    (lo..=hi).any(|x| map.kind_at(Point::new(x, from.y)) == Some(ObjectKind::CirclePlatform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofriends_core::Range;

    fn at(x: i32, y: i32, kind: ObjectKind) -> Node {
        Node {
            index: 0,
            pos: Point::new(x, y),
            kind,
        }
    }

    fn policy() -> ReachPolicy {
        ReachPolicy::new(&NavConfig::default())
    }

    #[test]
    fn circle_jump_limit() {
        let map = Map::new(Range::new(0, 0, 500, 500), 10_000).unwrap();
        let me = at(100, 400, ObjectKind::Circle);
        assert!(policy().can_reach(&me, &at(300, 160, ObjectKind::Diamond), &map));
        assert!(!policy().can_reach(&me, &at(300, 159, ObjectKind::Diamond), &map));
        // Anything below is fine.
        assert!(policy().can_reach(&me, &at(300, 480, ObjectKind::Diamond), &map));
    }

    #[test]
    fn rectangle_morph_limit_and_platforms() {
        let mut map = Map::new(Range::new(0, 0, 500, 500), 10_000).unwrap();
        let me = at(100, 400, ObjectKind::Rectangle);
        let target = at(300, 260, ObjectKind::Diamond);
        assert!(policy().can_reach(&me, &target, &map));
        assert!(!policy().can_reach(&me, &at(300, 249, ObjectKind::Diamond), &map));

        map.set(Point::new(200, 400), ObjectKind::CirclePlatform);
        assert!(!policy().can_reach(&me, &target, &map));
        // Other rows do not matter.
        assert!(policy().can_reach(&at(100, 390, ObjectKind::Rectangle), &target, &map));
    }

    #[test]
    fn off_map_row_cells_are_skipped() {
        let map = Map::new(Range::new(0, 0, 100, 100), 10_000).unwrap();
        let me = at(50, 50, ObjectKind::Rectangle);
        assert!(policy().can_reach(&me, &at(300, 40, ObjectKind::Diamond), &map));
    }

    #[test]
    fn cooperative_reach() {
        let me = at(100, 700, ObjectKind::Circle);
        let high = at(100, 100, ObjectKind::Diamond);
        let map = Map::new(Range::new(0, 0, 800, 800), 10_000).unwrap();
        assert!(!policy().can_reach(&me, &high, &map));
        assert!(policy().can_reach_together(&me, &high));
        assert!(!policy().can_reach_together(&me, &at(100, 49, ObjectKind::Diamond)));
    }

    #[test]
    fn non_mover_reaches_nothing() {
        let map = Map::new(Range::new(0, 0, 10, 10), 10_000).unwrap();
        let corner = at(1, 1, ObjectKind::Obstacle);
        assert!(!policy().can_reach(&corner, &at(2, 2, ObjectKind::Diamond), &map));
    }
}
