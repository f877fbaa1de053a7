use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use graph_rank_core::{parse_edge_list, Graph, MAX_CAPACITY};
use tracing::{info, warn};

/// A graph built from one edge-list file.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub source: PathBuf,
    pub load_time_ms: f64,
}

/// Read `path` and build a graph of the given capacity, or of exactly the
/// distinct label count when `capacity` is `None`.
pub fn load_graph(path: &Path, capacity: Option<usize>) -> Result<LoadedGraph> {
    let start = Instant::now();

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let edges = parse_edge_list(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let distinct = edges.distinct_vertices();
    match capacity {
        Some(cap) if cap < distinct => warn!(
            path = %path.display(),
            capacity = cap,
            distinct,
            "capacity is below the distinct vertex count, loading will fail"
        ),
        None if distinct > MAX_CAPACITY => bail!(
            "{} has {} distinct vertices, more than the supported maximum of {}",
            path.display(),
            distinct,
            MAX_CAPACITY
        ),
        _ => {}
    }

    let graph = edges
        .build_graph(capacity)
        .with_context(|| format!("failed to build graph from {}", path.display()))?;

    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        load_time_ms,
        "graph loaded"
    );

    Ok(LoadedGraph {
        graph,
        source: path.to_path_buf(),
        load_time_ms,
    })
}
