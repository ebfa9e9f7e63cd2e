//! `petgraph` undirected graphs as clustering input
//!
//! Any `UnGraph<N, E>` whose edge payload converts to `f64` serves as both
//! structure and weights; otherwise pair it with [`UnitWeight`](crate::graph::UnitWeight).
//! Self-loops stay in the petgraph value but are invisible through [`Graph`].

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use crate::graph::{EdgeWeights, Graph};

impl<N, E> Graph for UnGraph<N, E> {
    type Vertex = NodeIndex;
    type Edge = (NodeIndex, EdgeIndex);

    fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.node_indices()
    }

    fn out_edges(&self, v: NodeIndex) -> impl Iterator<Item = Self::Edge> + '_ {
        petgraph::graph::Graph::edges(self, v)
            .filter(|e| e.source() != e.target())
            .map(move |e| (v, e.id()))
    }

    fn endpoints(&self, e: Self::Edge) -> (NodeIndex, NodeIndex) {
        let (from, id) = e;
        let raw = &self.raw_edges()[id.index()];
        if raw.source() == from {
            (raw.source(), raw.target())
        } else {
            (raw.target(), raw.source())
        }
    }

    fn edges(&self) -> impl Iterator<Item = Self::Edge> + '_ {
        self.raw_edges()
            .iter()
            .enumerate()
            .filter(|(_, raw)| raw.source() != raw.target())
            .map(|(idx, raw)| (raw.source(), EdgeIndex::new(idx)))
    }

    fn vertex_count(&self) -> usize {
        petgraph::graph::Graph::node_count(self)
    }

    fn edge_count(&self) -> usize {
        self.raw_edges()
            .iter()
            .filter(|raw| raw.source() != raw.target())
            .count()
    }

    fn contains(&self, v: NodeIndex) -> bool {
        v.index() < petgraph::graph::Graph::node_count(self)
    }
}

impl<N, E> EdgeWeights<(NodeIndex, EdgeIndex)> for UnGraph<N, E>
where
    E: Copy + Into<f64>,
{
    #[inline]
    fn weight(&self, e: (NodeIndex, EdgeIndex)) -> f64 {
        self[e.1].into()
    }
}
