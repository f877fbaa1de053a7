//! Whitespace-delimited edge lists.
//!
//! Any whitespace separates labels; line breaks carry no meaning beyond that.
//! Labels are consumed pairwise as `source destination`. This is the format of
//! the SNAP-style social network dumps (`0 1\n0 2\n…`).

use std::collections::HashSet;
use std::io::BufRead;

use tracing::debug;

use crate::error::{GraphError, LoadError};
use crate::graph::Graph;

/// Edge pairs read from a text source, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    pairs: Vec<(String, String)>,
}

impl EdgeList {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    /// Number of distinct labels across all pairs.
    pub fn distinct_vertices(&self) -> usize {
        self.pairs
            .iter()
            .flat_map(|(s, d)| [s.as_str(), d.as_str()])
            .collect::<HashSet<_>>()
            .len()
    }

    /// Build a graph from every pair.
    ///
    /// With `capacity: None` the graph is sized to exactly the distinct label
    /// count, which fails with `InvalidCapacity` for an empty list or one with
    /// more than [`MAX_CAPACITY`](crate::MAX_CAPACITY) labels.
    pub fn build_graph(&self, capacity: Option<usize>) -> Result<Graph, GraphError> {
        let capacity = capacity.unwrap_or_else(|| self.distinct_vertices());
        let mut graph = Graph::new(capacity)?;
        graph.load_edges(self.iter())?;
        Ok(graph)
    }
}

impl FromIterator<(String, String)> for EdgeList {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Read label pairs from `reader`.
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<EdgeList, LoadError> {
    let mut pairs = Vec::new();
    // pending source label and the line it was read on
    let mut pending: Option<(String, usize)> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            match pending.take() {
                Some((source, _)) => pairs.push((source, token.to_string())),
                None => pending = Some((token.to_string(), line_no + 1)),
            }
        }
    }

    if let Some((label, line)) = pending {
        return Err(LoadError::DanglingVertex { line, label });
    }

    debug!(pairs = pairs.len(), "parsed edge list");
    Ok(EdgeList { pairs })
}
