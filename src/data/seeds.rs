//! Seed set files: one seed per line, whitespace-separated vertex labels

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use anyhow::{anyhow, Context, Result};
use crate::graph::CompressedGraph;

/// Read seed sets and resolve their labels against `graph`
pub fn load_seed_sets(path: &str, graph: &CompressedGraph) -> Result<Vec<Vec<u32>>> {
    log::info!("Reading seed sets: {}", path);
    let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
    parse_seed_sets(file, graph).with_context(|| format!("cannot parse {path}"))
}

/// Parse seed sets from any reader
///
/// Lines starting with `#` are comments. Every non-comment line, even a
/// blank one, is one seed, so the output lines up with the file.
pub fn parse_seed_sets<R: Read>(reader: R, graph: &CompressedGraph) -> Result<Vec<Vec<u32>>> {
    let index: HashMap<String, u32> = match &graph.node_ids {
        Some(ids) => ids.iter().cloned().zip(0u32..).collect(),
        None => (0..graph.node_count as u32).map(|v| (v.to_string(), v)).collect(),
    };

    let mut seeds = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim_start().starts_with('#') {
            continue;
        }
        let seed = line
            .split_whitespace()
            .map(|label| {
                index
                    .get(label)
                    .copied()
                    .ok_or_else(|| anyhow!("line {}: unknown vertex {label:?}", idx + 1))
            })
            .collect::<Result<Vec<u32>>>()?;
        seeds.push(seed);
    }

    log::info!("Loaded {} seed sets", seeds.len());
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use std::io::Cursor;

    fn labelled() -> CompressedGraph {
        let mut builder = GraphBuilder::with_capacity(3);
        builder.add_edge("x", "y");
        builder.add_edge("y", "z");
        builder.build()
    }

    #[test]
    fn labels_resolve_to_indices() {
        let g = labelled();
        let seeds = parse_seed_sets(Cursor::new("# seeds\nx y\n\nz\n"), &g).unwrap();
        assert_eq!(seeds, vec![vec![0, 1], vec![], vec![2]]);
    }

    #[test]
    fn unlabelled_graphs_use_indices() {
        let g = GraphBuilder::from_edge_list(3, &[(0, 1), (1, 2)]);
        let seeds = parse_seed_sets(Cursor::new("2 0\n"), &g).unwrap();
        assert_eq!(seeds, vec![vec![2, 0]]);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let g = labelled();
        let err = parse_seed_sets(Cursor::new("x w\n"), &g).unwrap_err();
        assert!(err.to_string().contains("unknown vertex \"w\""));
    }
}
