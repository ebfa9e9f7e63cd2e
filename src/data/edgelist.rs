//! Plain-text edge list reader
//!
//! One edge per line: `source target [weight]`, separated by whitespace.
//! Blank lines and lines starting with `#` or `%` are skipped. Vertex labels
//! are arbitrary tokens; the graph is weighted as soon as one line carries a
//! third column, and edges without one then weigh 1.0. A repeated pair is
//! one edge weighing the sum of its lines.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use anyhow::{anyhow, Context, Result};
use crate::graph::{CompressedGraph, GraphBuilder};

/// Read an edge list file
pub fn load_edge_list(path: &str) -> Result<CompressedGraph> {
    log::info!("Reading edge list: {}", path);
    let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
    parse_edge_list(file).with_context(|| format!("cannot parse {path}"))
}

/// Parse an edge list from any reader
pub fn parse_edge_list<R: Read>(reader: R) -> Result<CompressedGraph> {
    let mut edges: Vec<(String, String, Option<f64>)> = Vec::new();

    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let (src, dst, weight) = match parts.as_slice() {
            [src, dst] => (*src, *dst, None),
            [src, dst, weight] => {
                let weight: f64 = weight
                    .parse()
                    .with_context(|| format!("line {}: bad weight {weight:?}", idx + 1))?;
                (*src, *dst, Some(weight))
            }
            _ => {
                return Err(anyhow!(
                    "line {}: expected `source target [weight]`, got {line:?}",
                    idx + 1
                ))
            }
        };
        edges.push((src.to_string(), dst.to_string(), weight));
    }

    let weighted = edges.iter().any(|(_, _, w)| w.is_some());
    let mut builder = GraphBuilder::with_capacity(edges.len());
    for (src, dst, weight) in &edges {
        if weighted {
            builder.add_weighted_edge(src, dst, weight.unwrap_or(1.0));
        } else {
            builder.add_edge(src, dst);
        }
    }

    let graph = builder.build();
    log::info!(
        "Loaded {} vertices and {} edges{}",
        graph.node_count,
        graph.targets.len() / 2,
        if graph.is_weighted() { " (weighted)" } else { "" }
    );
    Ok(graph)
}
