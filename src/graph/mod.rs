//! Graph representation and the narrow interfaces the clustering core reads
//!
//! The optimization code never touches a concrete graph type. It only sees
//! [`Graph`] for structure and [`EdgeWeights`] for weights, so any backing
//! representation can be substituted.

pub mod adapters;
pub mod builder;
pub mod compressed;
pub mod sampler;

use std::fmt::Debug;
use std::hash::Hash;

pub use builder::GraphBuilder;
pub use compressed::{CompressedGraph, EdgeRef};
pub use sampler::{EdgeSampler, UniformEdgeSampler};

/// Read-only view of an undirected graph
pub trait Graph {
    /// Opaque, stable vertex identifier
    type Vertex: Copy + Eq + Ord + Hash + Debug;

    /// Opaque edge handle
    type Edge: Copy + Debug;

    /// All vertices, always in the same order
    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Edges incident to `v`; the first endpoint of each is `v`
    fn out_edges(&self, v: Self::Vertex) -> impl Iterator<Item = Self::Edge> + '_;

    /// Endpoints of `e` as `(source, target)`
    fn endpoints(&self, e: Self::Edge) -> (Self::Vertex, Self::Vertex);

    /// Every undirected edge exactly once
    fn edges(&self) -> impl Iterator<Item = Self::Edge> + '_;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Whether `v` names a vertex of this graph
    fn contains(&self, v: Self::Vertex) -> bool;

    /// The endpoint of `e` that is not `v`
    #[inline]
    fn opposite(&self, e: Self::Edge, v: Self::Vertex) -> Self::Vertex {
        let (source, target) = self.endpoints(e);
        if source == v {
            target
        } else {
            source
        }
    }
}

/// Non-negative weight per edge
pub trait EdgeWeights<E> {
    fn weight(&self, e: E) -> f64;
}

/// Every edge weighs 1.0 (unweighted graph)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitWeight;

impl<E> EdgeWeights<E> for UnitWeight {
    #[inline]
    fn weight(&self, _e: E) -> f64 {
        1.0
    }
}
