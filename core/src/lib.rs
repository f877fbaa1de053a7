//! graph-rank-core: structural ranking of small undirected graphs.
//!
//! A fixed-capacity graph backed by a symmetric adjacency matrix, BFS
//! shortest routes between labelled vertices, and closeness / betweenness
//! centrality rankings with top-k extraction.
//! No I/O beyond reading an already-open `BufRead` edge list.

mod centrality;
mod error;
mod graph;
mod load;
mod report;
mod traversal;

pub use centrality::{
    betweenness_centrality, closeness_centrality, Metric, RankedEntry, RankedScores,
};
pub use error::{GraphError, LoadError};
pub use graph::{Graph, VertexIndex, MAX_CAPACITY};
pub use load::{parse_edge_list, EdgeList};
pub use report::{centrality_report, highest, top_n, CentralityReport, VertexScore};
pub use traversal::{
    shortest_path, shortest_path_indices, single_source_distances, single_source_predecessors,
    Route,
};
