//! Graph and seed loading

pub mod edgelist;
pub mod parquet;
pub mod seeds;

use std::path::Path;
use anyhow::Result;
use crate::graph::CompressedGraph;

/// Load a graph, choosing the reader by file extension
///
/// `.parquet` files go through the columnar reader; anything else is read as
/// a whitespace-separated edge list.
pub fn load_graph(path: &str) -> Result<CompressedGraph> {
    let is_parquet = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        parquet::load_edge_table(path)
    } else {
        edgelist::load_edge_list(path)
    }
}
