//! Uniform random edge selection

use rand::Rng;
use crate::error::{ClusterError, Result};
use crate::graph::Graph;

/// Source of random seed edges
pub trait EdgeSampler<E> {
    /// Draw one edge
    fn sample(&mut self) -> E;
}

/// Draws edges uniformly from a snapshot of the graph's edge set
///
/// The edge list is materialized once; each draw is a single index into it.
pub struct UniformEdgeSampler<E, R> {
    edges: Vec<E>,
    rng: R,
}

impl<E: Copy, R: Rng> UniformEdgeSampler<E, R> {
    /// Snapshot the edges of `graph`; fails if there are none
    pub fn new<G>(graph: &G, rng: R) -> Result<Self>
    where
        G: Graph<Edge = E>,
    {
        let edges: Vec<E> = graph.edges().collect();
        if edges.is_empty() {
            return Err(ClusterError::NoEdges);
        }
        Ok(Self { edges, rng })
    }

    /// Number of edges in the snapshot
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<E: Copy, R: Rng> EdgeSampler<E> for UniformEdgeSampler<E, R> {
    fn sample(&mut self) -> E {
        let idx = self.rng.gen_range(0..self.edges.len());
        self.edges[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn edgeless_graph_is_rejected() {
        let g = GraphBuilder::from_edge_list(3, &[]);
        let rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(
            UniformEdgeSampler::new(&g, rng).err(),
            Some(ClusterError::NoEdges)
        );
    }

    #[test]
    fn every_edge_is_eventually_drawn() {
        let g = GraphBuilder::from_edge_list(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut sampler = UniformEdgeSampler::new(&g, ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(sampler.len(), 3);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let (u, v) = g.endpoints(sampler.sample());
            assert!(u < v);
            seen.insert((u, v));
        }
        assert_eq!(seen.len(), 3);
    }
}
