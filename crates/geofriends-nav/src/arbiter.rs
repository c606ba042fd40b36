//! Deciding which mover pursues a diamond both want.

use crate::path::Path;

/// Outcome of comparing the holder's cheapest path with a claim from the
/// other mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Different goals: each mover keeps its own.
    Split,
    /// Same goal and the claim is strictly cheaper: the claimant takes it.
    ClaimWins,
    /// Same goal and the claim is not cheaper: the holder keeps it.
    HolderWins,
}

/// Compare `holder`, the local cheapest path, with `claim`, the cheapest
/// path reported by the other mover. Equal costs go to the holder, so a
/// tie never makes both movers drop the diamond.
pub fn arbitrate(holder: &Path, claim: &Path) -> Decision {
    if holder.goal() != claim.goal() {
        Decision::Split
    } else if claim.cost() < holder.cost() {
        Decision::ClaimWins
    } else {
        Decision::HolderWins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use geofriends_core::{ObjectKind, Point};

    fn path(goal_x: i32, goal_index: usize, cost: f32) -> Path {
        let start = Node {
            index: 0,
            pos: Point::ZERO,
            kind: ObjectKind::Circle,
        };
        let goal = Node {
            index: goal_index,
            pos: Point::new(goal_x, 0),
            kind: ObjectKind::Diamond,
        };
        Path::new(vec![start, goal], cost).unwrap()
    }

    #[test]
    fn different_goals_split() {
        assert_eq!(arbitrate(&path(10, 5, 3.0), &path(20, 5, 1.0)), Decision::Split);
    }

    #[test]
    fn cheaper_claim_wins() {
        // Same diamond under different local indices.
        assert_eq!(arbitrate(&path(10, 5, 3.0), &path(10, 9, 1.0)), Decision::ClaimWins);
        assert_eq!(arbitrate(&path(10, 5, 1.0), &path(10, 9, 3.0)), Decision::HolderWins);
    }

    #[test]
    fn ties_go_to_the_holder() {
        assert_eq!(arbitrate(&path(10, 5, 2.0), &path(10, 5, 2.0)), Decision::HolderWins);
    }
}
