use std::fmt;

/// Errors raised while building a navigator's map and graph.
///
/// Queries never fail: an unreachable target or an empty registry is a
/// `None`, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The level area has no cells.
    EmptyArea,
    /// A node was added with an index the graph already holds.
    DuplicateNode { index: usize },
    /// A node was added out of sequence; indices must be dense.
    SparseNode { index: usize, expected: usize },
    /// A configuration field is out of range.
    InvalidConfig(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyArea => write!(f, "nav: level area is empty"),
            Self::DuplicateNode { index } => {
                write!(f, "nav: graph already has a node with index {index}")
            }
            Self::SparseNode { index, expected } => {
                write!(f, "nav: node index {index} out of sequence (expected {expected})")
            }
            Self::InvalidConfig(msg) => write!(f, "nav: invalid config: {msg}"),
        }
    }
}

impl std::error::Error for NavError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_index() {
        let e = NavError::SparseNode {
            index: 7,
            expected: 3,
        };
        assert_eq!(e.to_string(), "nav: node index 7 out of sequence (expected 3)");
        let e = NavError::DuplicateNode { index: 2 };
        assert!(e.to_string().contains('2'));
    }
}
