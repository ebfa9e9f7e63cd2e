//! Cluster density scoring
//!
//! A [`DensityMetric`] turns the internal weight, boundary weight and vertex
//! counts of a subset into one scalar. Every strategy shares the same
//! bookkeeping: [`DensityMetric::initialize`] computes the weights from
//! scratch once, and [`DensityMetric::evaluate_toggle`] predicts the effect
//! of flipping one vertex in time proportional to that vertex's degree.
//!
//! Degenerate denominators score negative infinity, never NaN, so the
//! optimizer can never prefer such a state.

use std::collections::HashSet;
use std::fmt;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use crate::graph::{EdgeWeights, Graph};

/// Cached density and edge weights of the current membership
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityState {
    pub density: f64,
    /// Weight of edges with both endpoints inside
    pub weight_in: f64,
    /// Weight of edges with exactly one endpoint inside
    pub weight_out: f64,
}

/// Predicted outcome of flipping one vertex's membership
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Toggle {
    pub density: f64,
    pub delta_in: f64,
    pub delta_out: f64,
    /// `true` if the vertex would be removed, `false` if added
    pub removes: bool,
}

impl DensityState {
    /// State after applying `toggle`
    pub fn apply(&self, toggle: &Toggle) -> Self {
        Self {
            density: toggle.density,
            weight_in: self.weight_in + toggle.delta_in,
            weight_out: self.weight_out + toggle.delta_out,
        }
    }
}

/// Scalar density of a vertex subset with from-scratch and incremental evaluation
pub trait DensityMetric {
    /// Density for the given weights and vertex counts
    fn score(&self, weight_in: f64, weight_out: f64, vert_in: usize, vert_out: usize) -> f64;

    /// Compute weights and density of `members` from scratch
    fn initialize<G, W>(&self, graph: &G, weights: &W, members: &HashSet<G::Vertex>) -> DensityState
    where
        G: Graph,
        W: EdgeWeights<G::Edge>,
    {
        let mut weight_in = 0.0;
        let mut weight_out = 0.0;
        for &v in members {
            for e in graph.out_edges(v) {
                if members.contains(&graph.opposite(e, v)) {
                    weight_in += weights.weight(e);
                } else {
                    weight_out += weights.weight(e);
                }
            }
        }
        // Every interior edge was seen from both ends
        weight_in /= 2.0;

        let vert_in = members.len();
        let vert_out = graph.vertex_count().saturating_sub(vert_in);
        DensityState {
            density: self.score(weight_in, weight_out, vert_in, vert_out),
            weight_in,
            weight_out,
        }
    }

    /// Predict the state after flipping `v`, without mutating anything
    fn evaluate_toggle<G, W>(
        &self,
        graph: &G,
        weights: &W,
        members: &HashSet<G::Vertex>,
        v: G::Vertex,
        state: &DensityState,
    ) -> Toggle
    where
        G: Graph,
        W: EdgeWeights<G::Edge>,
    {
        let (w_in, w_out) = incident_weights(graph, weights, members, v);
        let removes = members.contains(&v);
        let (delta_in, delta_out, vert_in) = if removes {
            (-w_in, -(w_out - w_in), members.len() - 1)
        } else {
            (w_in, w_out - w_in, members.len() + 1)
        };
        let vert_out = graph.vertex_count().saturating_sub(vert_in);
        Toggle {
            density: self.score(
                state.weight_in + delta_in,
                state.weight_out + delta_out,
                vert_in,
                vert_out,
            ),
            delta_in,
            delta_out,
            removes,
        }
    }
}

/// Weight of `v`'s edges landing inside and outside `members`
fn incident_weights<G, W>(
    graph: &G,
    weights: &W,
    members: &HashSet<G::Vertex>,
    v: G::Vertex,
) -> (f64, f64)
where
    G: Graph,
    W: EdgeWeights<G::Edge>,
{
    let mut w_in = 0.0;
    let mut w_out = 0.0;
    for e in graph.out_edges(v) {
        if members.contains(&graph.opposite(e, v)) {
            w_in += weights.weight(e);
        } else {
            w_out += weights.weight(e);
        }
    }
    (w_in, w_out)
}

/// Mean internal weighted degree of the members
///
/// Each interior edge contributes to the degree of both endpoints, so this is
/// `2 * weight_in / vert_in`; the constant factor leaves every comparison the
/// optimizer makes unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AverageDegree;

impl DensityMetric for AverageDegree {
    fn score(&self, weight_in: f64, _weight_out: f64, vert_in: usize, _vert_out: usize) -> f64 {
        if vert_in < 2 {
            return f64::NEG_INFINITY;
        }
        2.0 * weight_in / vert_in as f64
    }
}

/// Share of incident weight that stays inside
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightRatio;

impl DensityMetric for WeightRatio {
    fn score(&self, weight_in: f64, weight_out: f64, _vert_in: usize, _vert_out: usize) -> f64 {
        let total = weight_in + weight_out;
        if total <= 0.0 {
            return f64::NEG_INFINITY;
        }
        weight_in / total
    }
}

/// Internal weight relative to a complete subgraph on the same members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightProbability;

impl DensityMetric for WeightProbability {
    fn score(&self, weight_in: f64, _weight_out: f64, vert_in: usize, _vert_out: usize) -> f64 {
        if vert_in < 2 {
            return f64::NEG_INFINITY;
        }
        let n = vert_in as f64;
        weight_in / (n * (n - 1.0) / 2.0)
    }
}

/// Runtime choice among the density strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// `2 * weight_in / vert_in`, so a k-clique scores `k - 1`; twice the
    /// `weight_in / vert_in` ratio some tools report under the same name
    #[default]
    AverageDegree,
    /// `weight_in / (weight_in + weight_out)`
    WeightRatio,
    /// `weight_in` over the pair count `vert_in * (vert_in - 1) / 2`
    WeightProbability,
}

impl DensityMetric for MetricKind {
    #[inline]
    fn score(&self, weight_in: f64, weight_out: f64, vert_in: usize, vert_out: usize) -> f64 {
        match self {
            MetricKind::AverageDegree => AverageDegree.score(weight_in, weight_out, vert_in, vert_out),
            MetricKind::WeightRatio => WeightRatio.score(weight_in, weight_out, vert_in, vert_out),
            MetricKind::WeightProbability => {
                WeightProbability.score(weight_in, weight_out, vert_in, vert_out)
            }
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::AverageDegree => "average-degree",
            MetricKind::WeightRatio => "weight-ratio",
            MetricKind::WeightProbability => "weight-probability",
        };
        f.write_str(name)
    }
}
