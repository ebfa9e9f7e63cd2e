//! Drivers that turn single local searches into a set of clusters
//!
//! [`ClusteringDriver`] restarts the search from random edges and keeps every
//! cluster it has not seen before, stopping once `failure_threshold`
//! consecutive restarts produced only duplicates. [`SeededClusteringDriver`]
//! runs once per caller-supplied seed and keeps everything.

use rand::Rng;
use rayon::prelude::*;
use crate::cluster::density::DensityMetric;
use crate::cluster::scan::LocalSearch;
use crate::cluster::ClusterCollection;
use crate::error::{ClusterError, Result};
use crate::graph::{EdgeSampler, EdgeWeights, Graph, UniformEdgeSampler};

/// Consecutive duplicate discoveries tolerated before stopping
pub const DEFAULT_FAILURE_THRESHOLD: usize = 5;

/// Clusters found by random-restart discovery, with run statistics
#[derive(Debug, Clone)]
pub struct Discovery<V: Ord> {
    /// Distinct clusters in discovery order
    pub clusters: ClusterCollection<V>,

    /// Local searches run
    pub restarts: usize,

    /// Restarts whose result was already collected
    pub duplicates: usize,

    /// Consecutive duplicates at the end of the run
    pub final_streak: usize,
}

/// Random-edge restart discovery with a duplicate-count stopping rule
#[derive(Debug, Clone)]
pub struct ClusteringDriver<M> {
    metric: M,
    failure_threshold: usize,
}

impl<M: DensityMetric> ClusteringDriver<M> {
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        }
    }

    /// Set how many consecutive duplicates end the run
    pub fn with_failure_threshold(mut self, failure_threshold: usize) -> Self {
        self.failure_threshold = failure_threshold;
        self
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn failure_threshold(&self) -> usize {
        self.failure_threshold
    }

    /// Discover clusters, seeding from edges drawn uniformly with `rng`
    pub fn run<G, W, R>(&self, graph: &G, weights: &W, rng: R) -> Result<Discovery<G::Vertex>>
    where
        G: Graph,
        W: EdgeWeights<G::Edge>,
        R: Rng,
    {
        self.validate(graph)?;
        let mut sampler = UniformEdgeSampler::new(graph, rng)?;
        self.run_with_sampler(graph, weights, &mut sampler)
    }

    /// Discover clusters, seeding from edges produced by `sampler`
    pub fn run_with_sampler<G, W, S>(
        &self,
        graph: &G,
        weights: &W,
        sampler: &mut S,
    ) -> Result<Discovery<G::Vertex>>
    where
        G: Graph,
        W: EdgeWeights<G::Edge>,
        S: EdgeSampler<G::Edge>,
    {
        self.validate(graph)?;
        log::info!(
            "Discovering clusters on {} vertices and {} edges (failure threshold {})",
            graph.vertex_count(),
            graph.edge_count(),
            self.failure_threshold
        );

        let mut clusters = ClusterCollection::new();
        let mut restarts = 0;
        let mut duplicates = 0;
        let mut failures = 0;

        while failures < self.failure_threshold {
            let (u, v) = graph.endpoints(sampler.sample());
            let candidate = LocalSearch::new(graph, weights, &self.metric, [u, v])?.run();
            restarts += 1;

            if clusters.contains_members(&candidate) {
                failures += 1;
                duplicates += 1;
                log::debug!(
                    "Restart {} from ({:?}, {:?}) repeated a known cluster ({}/{})",
                    restarts,
                    u,
                    v,
                    failures,
                    self.failure_threshold
                );
            } else {
                log::debug!(
                    "Restart {} from ({:?}, {:?}) found cluster {} with {} members, density {}",
                    restarts,
                    u,
                    v,
                    clusters.len(),
                    candidate.size(),
                    candidate.density
                );
                clusters.push(candidate);
                failures = 0;
            }
        }

        log::info!(
            "Found {} distinct clusters in {} restarts ({} duplicates)",
            clusters.len(),
            restarts,
            duplicates
        );

        Ok(Discovery {
            clusters,
            restarts,
            duplicates,
            final_streak: failures,
        })
    }

    fn validate<G: Graph>(&self, graph: &G) -> Result<()> {
        if self.failure_threshold == 0 {
            return Err(ClusterError::InvalidFailureThreshold(self.failure_threshold));
        }
        if graph.vertex_count() == 0 {
            return Err(ClusterError::EmptyGraph);
        }
        if graph.edge_count() == 0 {
            return Err(ClusterError::NoEdges);
        }
        Ok(())
    }
}

/// One local search per supplied seed, results kept one-to-one
#[derive(Debug, Clone)]
pub struct SeededClusteringDriver<M> {
    metric: M,
}

impl<M: DensityMetric> SeededClusteringDriver<M> {
    pub fn new(metric: M) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Run every seed in order; the i-th cluster comes from the i-th seed
    pub fn run<G, W, I, S>(&self, graph: &G, weights: &W, seeds: I) -> Result<ClusterCollection<G::Vertex>>
    where
        G: Graph,
        W: EdgeWeights<G::Edge>,
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = G::Vertex>,
    {
        if graph.vertex_count() == 0 {
            return Err(ClusterError::EmptyGraph);
        }

        let seeds = seeds.into_iter();
        let mut clusters = ClusterCollection::with_capacity(seeds.size_hint().0);
        for seed in seeds {
            clusters.push(LocalSearch::new(graph, weights, &self.metric, seed)?.run());
        }

        log::info!("Clustered {} seeds", clusters.len());
        Ok(clusters)
    }

    /// Like [`run`](Self::run), but seeds are optimized concurrently on the
    /// rayon pool; each search owns its own cluster and output order still
    /// follows `seeds`
    pub fn run_parallel<G, W, S>(
        &self,
        graph: &G,
        weights: &W,
        seeds: &[S],
    ) -> Result<ClusterCollection<G::Vertex>>
    where
        G: Graph + Sync,
        G::Vertex: Send,
        W: EdgeWeights<G::Edge> + Sync,
        M: Sync,
        S: AsRef<[G::Vertex]> + Sync,
    {
        if graph.vertex_count() == 0 {
            return Err(ClusterError::EmptyGraph);
        }

        let clusters = seeds
            .par_iter()
            .map(|seed| {
                LocalSearch::new(graph, weights, &self.metric, seed.as_ref().iter().copied())
                    .map(|search| search.run())
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("Clustered {} seeds in parallel", clusters.len());
        Ok(clusters.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::density::{AverageDegree, MetricKind};
    use crate::graph::{CompressedGraph, EdgeRef, GraphBuilder, UnitWeight};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn cliques(sizes: &[u32], bridged: bool) -> CompressedGraph {
        let mut edges = Vec::new();
        let mut offset = 0;
        for &k in sizes {
            for u in 0..k {
                for v in (u + 1)..k {
                    edges.push((offset + u, offset + v));
                }
            }
            if bridged && offset > 0 {
                edges.push((offset - 1, offset));
            }
            offset += k;
        }
        GraphBuilder::from_edge_list(offset as usize, &edges)
    }

    /// Replays a fixed list of edges, in order
    struct Scripted {
        edges: Vec<EdgeRef>,
        next: usize,
    }

    impl EdgeSampler<EdgeRef> for Scripted {
        fn sample(&mut self) -> EdgeRef {
            let e = self.edges[self.next % self.edges.len()];
            self.next += 1;
            e
        }
    }

    fn edge(g: &CompressedGraph, u: u32, v: u32) -> EdgeRef {
        g.edges().find(|&e| g.endpoints(e) == (u, v)).unwrap()
    }

    #[test]
    fn single_cluster_stops_after_threshold_duplicates() {
        // One 5-clique plus two isolated vertices
        let k5 = cliques(&[5], false);
        let edges: Vec<(u32, u32)> = k5.edges().map(|e| k5.endpoints(e)).collect();
        let g = GraphBuilder::from_edge_list(7, &edges);

        let driver = ClusteringDriver::new(AverageDegree);
        let found = driver.run(&g, &UnitWeight, ChaCha8Rng::seed_from_u64(3)).unwrap();

        assert_eq!(found.clusters.len(), 1);
        assert_eq!(found.clusters.get(0).unwrap().members, (0..5).collect::<BTreeSet<u32>>());
        assert_eq!(found.restarts, 6);
        assert_eq!(found.duplicates, 5);
        assert_eq!(found.final_streak, 5);
    }

    #[test]
    fn novel_cluster_resets_the_failure_count() {
        let g = cliques(&[4, 4], true);
        let a = edge(&g, 0, 1);
        let b = edge(&g, 5, 6);
        let mut sampler = Scripted {
            edges: vec![a, a, b, a, a, a, a, a, a, a],
            next: 0,
        };

        let found = ClusteringDriver::new(AverageDegree)
            .run_with_sampler(&g, &UnitWeight, &mut sampler)
            .unwrap();

        // a (new), a (dup 1), b (new, reset), then five duplicates
        assert_eq!(found.restarts, 8);
        assert_eq!(found.duplicates, 6);
        assert_eq!(found.clusters.len(), 2);
        assert_eq!(found.clusters.get(1).unwrap().members, (4..8).collect::<BTreeSet<u32>>());
    }

    #[test]
    fn disjoint_cliques_are_all_discovered() {
        let g = cliques(&[4, 5, 6], false);
        let driver = ClusteringDriver::new(MetricKind::WeightRatio).with_failure_threshold(60);
        let found = driver.run(&g, &UnitWeight, ChaCha8Rng::seed_from_u64(17)).unwrap();

        let mut sizes: Vec<usize> = found.clusters.iter().map(|c| c.size()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![4, 5, 6]);
        assert_eq!(found.restarts, found.clusters.len() + found.duplicates);
        assert_eq!(found.final_streak, 60);
    }

    #[test]
    fn invalid_discovery_input_fails_before_searching() {
        let edgeless = GraphBuilder::from_edge_list(4, &[]);
        let driver = ClusteringDriver::new(AverageDegree);
        assert_eq!(
            driver.run(&edgeless, &UnitWeight, ChaCha8Rng::seed_from_u64(0)).err(),
            Some(ClusterError::NoEdges)
        );

        let empty = GraphBuilder::from_edge_list(0, &[]);
        assert_eq!(
            driver.run(&empty, &UnitWeight, ChaCha8Rng::seed_from_u64(0)).err(),
            Some(ClusterError::EmptyGraph)
        );

        let g = cliques(&[3], false);
        let zero = ClusteringDriver::new(AverageDegree).with_failure_threshold(0);
        assert_eq!(
            zero.run(&g, &UnitWeight, ChaCha8Rng::seed_from_u64(0)).err(),
            Some(ClusterError::InvalidFailureThreshold(0))
        );
    }

    #[test]
    fn seeded_runs_are_one_to_one_and_ordered() {
        let g = cliques(&[4, 4], true);
        let seeds = vec![vec![5, 6], vec![0, 1], vec![5, 6], vec![2, 3]];
        let driver = SeededClusteringDriver::new(AverageDegree);
        let clusters = driver.run(&g, &UnitWeight, seeds.clone()).unwrap();

        let first: BTreeSet<u32> = (0..4).collect();
        let second: BTreeSet<u32> = (4..8).collect();
        let members: Vec<_> = clusters.iter().map(|c| c.members.clone()).collect();
        assert_eq!(members, vec![second.clone(), first.clone(), second, first]);
    }

    #[test]
    fn parallel_seeding_matches_sequential() {
        let g = cliques(&[4, 5, 3], true);
        let seeds: Vec<Vec<u32>> = (0..11).map(|v| vec![v, v + 1]).collect();
        let driver = SeededClusteringDriver::new(MetricKind::AverageDegree);

        let sequential = driver.run(&g, &UnitWeight, seeds.clone()).unwrap();
        let parallel = driver.run_parallel(&g, &UnitWeight, &seeds).unwrap();
        assert_eq!(parallel.len(), seeds.len());
        for (s, p) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(s.members, p.members);
            assert_eq!(s.density, p.density);
        }
    }

    #[test]
    fn seeded_driver_rejects_bad_input() {
        let empty = GraphBuilder::from_edge_list(0, &[]);
        let driver = SeededClusteringDriver::new(AverageDegree);
        let no_seeds: Vec<Vec<u32>> = Vec::new();
        assert_eq!(
            driver.run(&empty, &UnitWeight, no_seeds).err(),
            Some(ClusterError::EmptyGraph)
        );

        let g = cliques(&[3], false);
        assert_eq!(
            driver.run(&g, &UnitWeight, vec![vec![0, 7]]).err(),
            Some(ClusterError::UnknownVertex("7".into()))
        );
    }
}
