//! Iterative scan: greedy single-vertex-toggle local search
//!
//! Starting from a seed, every pass visits each vertex of the graph in the
//! graph's own order and flips its membership whenever that strictly raises
//! density. A flip is applied on the spot, so vertices visited later in the
//! same pass already see it. A pass that flips nothing ends the search.
//!
//! Density strictly increases with every flip, so no membership repeats and
//! the search always terminates on a finite graph.

use std::collections::{BTreeSet, HashSet};
use crate::cluster::density::{DensityMetric, DensityState};
use crate::cluster::Cluster;
use crate::error::{ClusterError, Result};
use crate::graph::{EdgeWeights, Graph};

/// Search progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Passes are still finding improving flips
    Scanning,
    /// A full pass found nothing to improve
    Converged,
}

/// One applied membership flip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move<V> {
    pub vertex: V,
    /// `true` if the vertex left the cluster, `false` if it joined
    pub removed: bool,
    /// Density before the flip
    pub before: f64,
    /// Density after the flip, always strictly greater than `before`
    pub after: f64,
}

/// Local search over one exclusively owned cluster
pub struct LocalSearch<'a, G: Graph, W, M> {
    graph: &'a G,
    weights: &'a W,
    metric: &'a M,
    members: HashSet<G::Vertex>,
    state: DensityState,
    phase: Phase,
    passes: usize,
    toggles: usize,
}

impl<'a, G, W, M> LocalSearch<'a, G, W, M>
where
    G: Graph,
    W: EdgeWeights<G::Edge>,
    M: DensityMetric,
{
    /// Start a search from `seed`
    ///
    /// Fails on an empty graph or when the seed names a vertex outside it.
    pub fn new<I>(graph: &'a G, weights: &'a W, metric: &'a M, seed: I) -> Result<Self>
    where
        I: IntoIterator<Item = G::Vertex>,
    {
        if graph.vertex_count() == 0 {
            return Err(ClusterError::EmptyGraph);
        }

        let mut members = HashSet::new();
        for v in seed {
            if !graph.contains(v) {
                return Err(ClusterError::UnknownVertex(format!("{v:?}")));
            }
            members.insert(v);
        }

        let state = metric.initialize(graph, weights, &members);
        Ok(Self {
            graph,
            weights,
            metric,
            members,
            state,
            phase: Phase::Scanning,
            passes: 0,
            toggles: 0,
        })
    }

    /// Evaluate flipping `v` and apply it if density strictly improves
    pub fn visit(&mut self, v: G::Vertex) -> Option<Move<G::Vertex>> {
        let toggle = self.metric.evaluate_toggle(
            self.graph,
            self.weights,
            &self.members,
            v,
            &self.state,
        );
        if toggle.density <= self.state.density {
            return None;
        }

        if toggle.removes {
            self.members.remove(&v);
        } else {
            self.members.insert(v);
        }
        let before = self.state.density;
        self.state = self.state.apply(&toggle);
        self.toggles += 1;

        log::trace!(
            "{} {:?}: density {} -> {}",
            if toggle.removes { "removed" } else { "added" },
            v,
            before,
            self.state.density
        );

        Some(Move {
            vertex: v,
            removed: toggle.removes,
            before,
            after: self.state.density,
        })
    }

    /// Run one full pass over every vertex, reporting each applied flip
    ///
    /// Returns the number of flips; a pass with none converges the search.
    pub fn scan_pass_with<F>(&mut self, mut on_move: F) -> usize
    where
        F: FnMut(&Move<G::Vertex>),
    {
        if self.phase == Phase::Converged {
            return 0;
        }

        let graph = self.graph;
        let mut applied = 0;
        for v in graph.vertices() {
            if let Some(mv) = self.visit(v) {
                on_move(&mv);
                applied += 1;
            }
        }

        self.passes += 1;
        if applied == 0 {
            self.phase = Phase::Converged;
        }
        applied
    }

    /// Run one full pass over every vertex
    pub fn scan_pass(&mut self) -> usize {
        self.scan_pass_with(|_| ())
    }

    /// Pass until converged
    pub fn converge(&mut self) {
        while self.phase == Phase::Scanning {
            self.scan_pass();
        }
        log::debug!(
            "Converged after {} passes and {} flips: {} members, density {}",
            self.passes,
            self.toggles,
            self.members.len(),
            self.state.density
        );
    }

    /// Pass until converged and freeze the result
    pub fn run(mut self) -> Cluster<G::Vertex> {
        self.converge();
        self.snapshot()
    }

    /// Immutable copy of the current membership and state
    pub fn snapshot(&self) -> Cluster<G::Vertex> {
        Cluster {
            members: self.members.iter().copied().collect::<BTreeSet<_>>(),
            density: self.state.density,
            weight_in: self.state.weight_in,
            weight_out: self.state.weight_out,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &DensityState {
        &self.state
    }

    pub fn members(&self) -> &HashSet<G::Vertex> {
        &self.members
    }

    /// Completed passes, including the final non-improving one
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Flips applied so far
    pub fn toggles(&self) -> usize {
        self.toggles
    }
}

/// Run iterative scan from `seed` to convergence
pub fn iterative_scan<G, W, M, I>(
    graph: &G,
    weights: &W,
    metric: &M,
    seed: I,
) -> Result<Cluster<G::Vertex>>
where
    G: Graph,
    W: EdgeWeights<G::Edge>,
    M: DensityMetric,
    I: IntoIterator<Item = G::Vertex>,
{
    Ok(LocalSearch::new(graph, weights, metric, seed)?.run())
}
