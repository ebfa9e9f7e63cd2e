//! Results persistence module

use anyhow::Result;
use itertools::Itertools;
use crate::cluster::ClusterCollection;
use crate::config::Config;
use crate::graph::{CompressedGraph, Graph};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty};

/// How the clusters were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// Random-restart discovery
    Discovery { restarts: usize, duplicates: usize },
    /// One search per explicit seed
    Seeded { seeds: usize },
}

/// Save clustering results to the specified directory
pub fn save_results(
    clusters: &ClusterCollection<u32>,
    graph: &CompressedGraph,
    config: &Config,
    run: RunKind,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} clusters to {}", clusters.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(clusters, graph, config, run, output_dir)?;
    save_clusters(clusters, graph, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(
    clusters: &ClusterCollection<u32>,
    graph: &CompressedGraph,
    config: &Config,
    run: RunKind,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let run_stats = match run {
        RunKind::Discovery { restarts, duplicates } => json!({
            "mode": "discovery",
            "restarts": restarts,
            "duplicates": duplicates,
        }),
        RunKind::Seeded { seeds } => json!({
            "mode": "seeded",
            "seeds": seeds,
        }),
    };

    let (smallest, largest) = clusters.iter()
        .map(|c| c.size())
        .minmax()
        .into_option()
        .unwrap_or((0, 0));
    let count = if clusters.is_empty() { 1.0 } else { clusters.len() as f64 };
    let finite_densities = clusters.iter()
        .map(|c| c.density)
        .filter(|d| d.is_finite())
        .collect_vec();

    let max_degree = graph.vertices()
        .map(|v| graph.degree(v as usize))
        .max()
        .unwrap_or(0);
    let total_weight = graph.vertices()
        .map(|v| graph.weighted_degree(v))
        .sum::<f64>() / 2.0;

    let summary = json!({
        "graph_stats": {
            "node_count": graph.vertex_count(),
            "edge_count": graph.edge_count(),
            "weighted": graph.is_weighted(),
            "avg_degree": 2.0 * graph.edge_count() as f64 / graph.vertex_count().max(1) as f64,
            "max_degree": max_degree,
            "total_weight": total_weight,
        },
        "config": config,
        "run": run_stats,
        "cluster_stats": {
            "cluster_count": clusters.len(),
            "total_clustered_nodes": clusters.iter().map(|c| c.size()).sum::<usize>(),
            "distinct_clustered_nodes": clusters.iter().flat_map(|c| c.members.iter()).unique().count(),
            "largest_cluster_size": largest,
            "smallest_cluster_size": smallest,
            "avg_cluster_size": clusters.iter().map(|c| c.size()).sum::<usize>() as f64 / count,
            "avg_density": finite_densities.iter().sum::<f64>()
                / finite_densities.len().max(1) as f64,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save every cluster with its members resolved to labels
fn save_clusters(
    clusters: &ClusterCollection<u32>,
    graph: &CompressedGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving individual cluster information");

    let path = Path::new(output_dir).join("clusters.json");
    let mut file = File::create(path)?;

    let clusters_json = json!({
        "clusters": clusters.iter().enumerate().map(|(id, c)| {
            json!({
                "id": id,
                "size": c.size(),
                "density": c.density,
                "weight_in": c.weight_in,
                "weight_out": c.weight_out,
                "members": c.members.iter().map(|&v| graph.label(v)).collect_vec(),
            })
        }).collect_vec()
    });

    file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Cluster;
    use crate::graph::GraphBuilder;

    #[test]
    fn results_round_trip_through_json_files() {
        let mut builder = GraphBuilder::with_capacity(3);
        builder.add_edge("a", "b");
        builder.add_edge("b", "c");
        let graph = builder.build();

        let mut clusters = ClusterCollection::new();
        clusters.push(Cluster {
            members: [0, 1].into_iter().collect(),
            density: 1.0,
            weight_in: 1.0,
            weight_out: 1.0,
        });

        let dir = std::env::temp_dir().join(format!("iterscan-storage-{}", std::process::id()));
        let dir = dir.to_str().unwrap().to_string();
        save_results(
            &clusters,
            &graph,
            &Config::default(),
            RunKind::Discovery { restarts: 6, duplicates: 5 },
            &dir,
        )
        .unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(Path::new(&dir).join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["run"]["restarts"], 6);
        assert_eq!(summary["graph_stats"]["max_degree"], 2);
        assert_eq!(summary["graph_stats"]["total_weight"], 2.0);
        assert_eq!(summary["cluster_stats"]["cluster_count"], 1);
        assert_eq!(summary["config"]["metric"], "average-degree");

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(Path::new(&dir).join("clusters.json")).unwrap()).unwrap();
        assert_eq!(saved["clusters"][0]["members"], json!(["a", "b"]));

        fs::remove_dir_all(&dir).unwrap();
    }
}
