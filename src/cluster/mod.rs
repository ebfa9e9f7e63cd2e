//! Cluster discovery module

pub mod density;
pub mod driver;
pub mod scan;

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

pub use density::{
    AverageDegree, DensityMetric, DensityState, MetricKind, Toggle, WeightProbability, WeightRatio,
};
pub use driver::{ClusteringDriver, Discovery, SeededClusteringDriver};
pub use scan::{LocalSearch, Move, Phase};

/// Frozen result of one converged local search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster<V: Ord> {
    /// Members of this cluster, in vertex order
    pub members: BTreeSet<V>,

    /// Density under the metric that produced the cluster
    pub density: f64,

    /// Weight of edges with both endpoints inside
    pub weight_in: f64,

    /// Weight of edges crossing the boundary
    pub weight_out: f64,
}

impl<V: Ord> Cluster<V> {
    /// Number of members
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Exact set equality on members
    pub fn same_members(&self, other: &Self) -> bool {
        self.members == other.members
    }

    pub fn contains(&self, v: &V) -> bool {
        self.members.contains(v)
    }
}

/// Append-only, ordered sequence of discovered clusters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterCollection<V: Ord> {
    clusters: Vec<Cluster<V>>,
}

impl<V: Ord> Default for ClusterCollection<V> {
    fn default() -> Self {
        Self { clusters: Vec::new() }
    }
}

impl<V: Ord> ClusterCollection<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { clusters: Vec::with_capacity(capacity) }
    }

    /// Whether a cluster with exactly these members is already collected
    pub fn contains_members(&self, candidate: &Cluster<V>) -> bool {
        self.clusters.iter().any(|c| c.same_members(candidate))
    }

    pub fn push(&mut self, cluster: Cluster<V>) {
        self.clusters.push(cluster);
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Cluster<V>> {
        self.clusters.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster<V>> {
        self.clusters.iter()
    }

    pub fn as_slice(&self) -> &[Cluster<V>] {
        &self.clusters
    }

    pub fn into_vec(self) -> Vec<Cluster<V>> {
        self.clusters
    }
}

impl<V: Ord> FromIterator<Cluster<V>> for ClusterCollection<V> {
    fn from_iter<I: IntoIterator<Item = Cluster<V>>>(iter: I) -> Self {
        Self { clusters: iter.into_iter().collect() }
    }
}

impl<V: Ord> IntoIterator for ClusterCollection<V> {
    type Item = Cluster<V>;
    type IntoIter = std::vec::IntoIter<Cluster<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.into_iter()
    }
}

impl<'a, V: Ord> IntoIterator for &'a ClusterCollection<V> {
    type Item = &'a Cluster<V>;
    type IntoIter = std::slice::Iter<'a, Cluster<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}
