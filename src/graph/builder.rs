//! Graph construction module

use crate::graph::CompressedGraph;
use std::collections::HashMap;

/// Builder for incrementally constructing an undirected CompressedGraph
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs
    node_ids: Vec<String>,

    /// Weighted adjacency lists for each node
    adjacency_lists: Vec<Vec<(u32, f64)>>,

    /// Whether any edge was given an explicit weight
    weighted: bool,

    /// Self-loops seen and discarded
    dropped_loops: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            weighted: false,
            dropped_loops: 0,
        }
    }

    /// Build an unlabelled, unweighted graph from 0-based index pairs
    ///
    /// # Panics
    ///
    /// If an endpoint is not below `node_count`.
    pub fn from_edge_list(node_count: usize, edges: &[(u32, u32)]) -> CompressedGraph {
        let mut builder = Self::with_capacity(node_count);
        builder.adjacency_lists = vec![Vec::new(); node_count];
        builder.node_count = node_count;
        for &(u, v) in edges {
            builder.link(u, v, 1.0);
        }
        let mut graph = builder.build();
        graph.node_ids = None;
        graph
    }

    /// Build an unlabelled graph from weighted 0-based index triples
    ///
    /// Negative or non-finite weights are clamped to zero.
    ///
    /// # Panics
    ///
    /// If an endpoint is not below `node_count`.
    pub fn from_weighted_edge_list(
        node_count: usize,
        edges: &[(u32, u32, f64)],
    ) -> CompressedGraph {
        let mut builder = Self::with_capacity(node_count);
        builder.adjacency_lists = vec![Vec::new(); node_count];
        builder.node_count = node_count;
        builder.weighted = true;
        for &(u, v, w) in edges {
            builder.link(u, v, clamp_weight(w));
        }
        let mut graph = builder.build();
        graph.node_ids = None;
        graph
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        // Create a new node
        let idx = self.node_count as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());
        self.node_count += 1;

        idx
    }

    /// Add an unweighted undirected edge between two labelled nodes
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.link(src_idx, dst_idx, 1.0);
    }

    /// Add a weighted undirected edge between two labelled nodes
    ///
    /// Negative or non-finite weights are clamped to zero.
    pub fn add_weighted_edge(&mut self, src_id: &str, dst_id: &str, weight: f64) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.weighted = true;
        self.link(src_idx, dst_idx, clamp_weight(weight));
    }

    /// Number of distinct nodes seen so far
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    fn link(&mut self, src: u32, dst: u32, weight: f64) {
        if src == dst {
            self.dropped_loops += 1;
            return;
        }
        self.adjacency_lists[src as usize].push((dst, weight));
        self.adjacency_lists[dst as usize].push((src, weight));
    }

    /// Build the compressed graph
    ///
    /// Adjacency lists are sorted and parallel edges merged into one edge
    /// carrying the summed weight. Weights are stored when any edge was added
    /// with an explicit weight or when a merge left an edge heavier than 1.0.
    pub fn build(mut self) -> CompressedGraph {
        if self.dropped_loops > 0 {
            log::debug!("Dropped {} self-loops", self.dropped_loops);
        }

        for list in &mut self.adjacency_lists {
            list.sort_unstable_by_key(|&(target, _)| target);
            list.dedup_by(|next, kept| {
                if next.0 == kept.0 {
                    kept.1 += next.1;
                    true
                } else {
                    false
                }
            });
        }

        let weighted = self.weighted
            || self.adjacency_lists.iter().flatten().any(|&(_, w)| w != 1.0);

        let slot_count: usize = self.adjacency_lists.iter()
            .map(|list| list.len())
            .sum();

        // Create offsets array
        let mut graph = CompressedGraph::with_capacity(self.node_count, slot_count);
        graph.offsets.push(0);

        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            graph.offsets.push(offset);
        }

        // Create targets and weights arrays
        let mut weights = Vec::with_capacity(if weighted { slot_count } else { 0 });
        for list in &self.adjacency_lists {
            for &(target, weight) in list {
                graph.targets.push(target);
                if weighted {
                    weights.push(weight);
                }
            }
        }

        graph.weights = weighted.then_some(weights);
        graph.node_ids = Some(self.node_ids);

        log::debug!(
            "Built graph with {} nodes and {} edges",
            graph.node_count,
            slot_count / 2
        );

        graph
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_finite() { weight.max(0.0) } else { 0.0 }
}
