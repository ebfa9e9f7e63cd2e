//! Error types for the clustering core

use thiserror::Error;

/// Result alias for clustering operations
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Invalid input rejected before any optimization starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    /// The graph has no vertices
    #[error("graph has no vertices")]
    EmptyGraph,

    /// Random edge seeding was requested on a graph without edges
    #[error("graph has no edges, random edge seeding is undefined")]
    NoEdges,

    /// The consecutive-failure threshold must be at least one
    #[error("failure threshold must be at least 1, got {0}")]
    InvalidFailureThreshold(usize),

    /// A seed referenced a vertex the graph does not contain
    #[error("seed vertex {0} is not part of the graph")]
    UnknownVertex(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(ClusterError::EmptyGraph.to_string(), "graph has no vertices");
        assert_eq!(
            ClusterError::InvalidFailureThreshold(0).to_string(),
            "failure threshold must be at least 1, got 0"
        );
        assert_eq!(
            ClusterError::UnknownVertex("42".into()).to_string(),
            "seed vertex 42 is not part of the graph"
        );
    }
}
