//! Parquet file handling for graph data

use anyhow::Result;
use polars::prelude::*;
use crate::graph::{CompressedGraph, GraphBuilder};

/// Column holding the first endpoint of each edge
pub const SOURCE_COLUMN: &str = "source";
/// Column holding the second endpoint of each edge
pub const TARGET_COLUMN: &str = "target";
/// Optional numeric weight column
pub const WEIGHT_COLUMN: &str = "weight";

/// Load an undirected edge table from a Parquet file
///
/// Endpoint columns of any type are cast to strings and used as labels.
pub fn load_edge_table(path: &str) -> Result<CompressedGraph> {
    log::info!("Reading parquet file: {}", path);

    // Check if the file exists
    if !std::path::Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?
        .collect()?;

    log::info!("File schema: {:?}", df.schema());
    build_from_frame(&df)
}

/// Build a graph from an in-memory edge table
pub fn build_from_frame(df: &DataFrame) -> Result<CompressedGraph> {
    let row_count = df.height();
    log::info!("Processing {} edges", row_count);

    let sources = df.column(SOURCE_COLUMN)?.cast(&DataType::String)?;
    let sources = sources.str()?;
    let targets = df.column(TARGET_COLUMN)?.cast(&DataType::String)?;
    let targets = targets.str()?;

    let weights = match df.column(WEIGHT_COLUMN) {
        Ok(column) => Some(column.cast(&DataType::Float64)?),
        Err(_) => None,
    };
    let weights = match &weights {
        Some(column) => Some(column.f64()?),
        None => None,
    };

    let mut builder = GraphBuilder::with_capacity(row_count);
    let mut skipped = 0usize;

    for i in 0..row_count {
        let (Some(src), Some(dst)) = (sources.get(i), targets.get(i)) else {
            skipped += 1;
            continue;
        };
        match weights {
            Some(w) => builder.add_weighted_edge(src, dst, w.get(i).unwrap_or(1.0)),
            None => builder.add_edge(src, dst),
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with a missing endpoint", skipped);
    }

    Ok(builder.build())
}
