//! Dense cluster discovery in weighted graphs by iterative scan
//!
//! A cluster grows or shrinks one vertex at a time while that strictly raises
//! its density. [`ClusteringDriver`] restarts this from random edges until it
//! keeps finding clusters it already has; [`SeededClusteringDriver`] runs it
//! from caller-supplied seeds.

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod cluster;
pub mod storage;

pub use cluster::{
    AverageDegree, Cluster, ClusterCollection, ClusteringDriver, DensityMetric, DensityState,
    Discovery, LocalSearch, MetricKind, SeededClusteringDriver, WeightProbability, WeightRatio,
};
pub use cluster::scan::iterative_scan;
pub use config::Config;
pub use error::{ClusterError, Result};
pub use graph::{CompressedGraph, EdgeSampler, EdgeWeights, Graph, GraphBuilder, UniformEdgeSampler, UnitWeight};
