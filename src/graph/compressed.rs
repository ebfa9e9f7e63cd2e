//! Memory-efficient undirected graph representation

use std::mem;
use serde::{Serialize, Deserialize};
use crate::graph::{EdgeWeights, Graph};

/// Handle to one directed half of an undirected edge
///
/// `slot` indexes the concatenated adjacency array; `source` is the vertex
/// whose adjacency range contains that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    pub source: u32,
    pub slot: u32,
}

/// Compressed sparse row representation of an undirected, optionally weighted graph
///
/// Every undirected edge `{u, v}` is stored twice, once in each endpoint's
/// adjacency range, so a vertex's incident edges are one contiguous slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's edges begin
    /// offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<u32>,

    /// Edge array: concatenated, sorted lists of neighbour nodes
    pub targets: Vec<u32>,

    /// Optional per-slot weights, parallel to `targets`; `None` means unit weights
    pub weights: Option<Vec<f64>>,

    /// Optional mapping from internal node IDs to original string IDs
    pub node_ids: Option<Vec<String>>,
}

impl CompressedGraph {
    /// Create a new graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, slot_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            targets: Vec::with_capacity(slot_count),
            weights: None,
            node_ids: None,
        }
    }

    /// Neighbours of a node, sorted ascending
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.targets[start..end]
    }

    /// Number of neighbours of a node
    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Sum of incident edge weights of a node
    pub fn weighted_degree(&self, node: u32) -> f64 {
        self.out_edges(node).map(|e| self.weight(e)).sum()
    }

    /// Whether the graph carries explicit edge weights
    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Original string ID of a node, or its index when the graph is unlabelled
    pub fn label(&self, node: u32) -> String {
        self.node_ids
            .as_ref()
            .and_then(|ids| ids.get(node as usize))
            .cloned()
            .unwrap_or_else(|| node.to_string())
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let targets = self.targets.capacity() * mem::size_of::<u32>();
        let weights = self.weights.as_ref()
            .map(|w| w.capacity() * mem::size_of::<f64>())
            .unwrap_or(0);

        let ids = self.node_ids.as_ref()
            .map(|ids| ids.iter().map(|s| s.capacity()).sum::<usize>())
            .unwrap_or(0);

        base + offsets + targets + weights + ids
    }
}

impl Graph for CompressedGraph {
    type Vertex = u32;
    type Edge = EdgeRef;

    fn vertices(&self) -> impl Iterator<Item = u32> + '_ {
        0..self.node_count as u32
    }

    fn out_edges(&self, v: u32) -> impl Iterator<Item = EdgeRef> + '_ {
        let start = self.offsets[v as usize];
        let end = self.offsets[v as usize + 1];
        (start..end).map(move |slot| EdgeRef { source: v, slot })
    }

    #[inline]
    fn endpoints(&self, e: EdgeRef) -> (u32, u32) {
        (e.source, self.targets[e.slot as usize])
    }

    fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        // Keep the half whose source is the smaller endpoint
        self.vertices()
            .flat_map(move |v| self.out_edges(v))
            .filter(move |e| e.source < self.targets[e.slot as usize])
    }

    fn vertex_count(&self) -> usize {
        self.node_count
    }

    fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    fn contains(&self, v: u32) -> bool {
        (v as usize) < self.node_count
    }
}

impl EdgeWeights<EdgeRef> for CompressedGraph {
    #[inline]
    fn weight(&self, e: EdgeRef) -> f64 {
        self.weights
            .as_ref()
            .map_or(1.0, |w| w[e.slot as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn triangle_is_stored_symmetrically() {
        let g = GraphBuilder::from_edge_list(3, &[(0, 1), (0, 2), (1, 2)]);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.targets.len(), 6);
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert_eq!(g.degree(2), 2);
        assert_eq!(g.edges().count(), 3);
    }

    #[test]
    fn out_edges_start_at_the_queried_vertex() {
        let g = GraphBuilder::from_edge_list(4, &[(0, 1), (1, 2), (1, 3)]);
        for e in g.out_edges(1) {
            let (source, target) = g.endpoints(e);
            assert_eq!(source, 1);
            assert_eq!(g.opposite(e, 1), target);
        }
        assert_eq!(g.out_edges(1).count(), 3);
    }

    #[test]
    fn unweighted_edges_weigh_one() {
        let g = GraphBuilder::from_edge_list(2, &[(0, 1)]);
        assert!(!g.is_weighted());
        assert_eq!(g.weighted_degree(0), 1.0);
        assert!(g.contains(1));
        assert!(!g.contains(2));
        assert_eq!(g.label(1), "1");
    }
}
