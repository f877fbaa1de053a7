use serde::Serialize;

use crate::centrality::{Metric, RankedScores};
use crate::graph::{Graph, VertexIndex};

/// A ranked vertex resolved back to its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexScore {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub index: VertexIndex,
    pub label: String,
    pub score: f64,
}

/// Top entries of one metric over one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    pub metric: Metric,
    pub vertex_count: usize,
    /// Vertices that received a score; the rest were excluded by the metric.
    pub ranked: usize,
    pub entries: Vec<VertexScore>,
}

/// The best-scoring vertex, or `None` for an empty table.
pub fn highest(graph: &Graph, table: &RankedScores) -> Option<VertexScore> {
    top_n(graph, table, 1).into_iter().next()
}

/// The best `n` vertices, highest score first.
///
/// A table with fewer than `n` entries yields all of them; this never fails.
pub fn top_n(graph: &Graph, table: &RankedScores, n: usize) -> Vec<VertexScore> {
    table
        .top(n)
        .iter()
        .enumerate()
        .map(|(i, entry)| VertexScore {
            rank: i + 1,
            index: entry.index,
            label: graph.label(entry.index).unwrap_or_default().to_string(),
            score: entry.score,
        })
        .collect()
}

/// Run `metric` over `graph` and keep the best `n` vertices.
pub fn centrality_report(graph: &Graph, metric: Metric, n: usize) -> CentralityReport {
    let table = metric.rank(graph);
    CentralityReport {
        metric,
        vertex_count: graph.vertex_count(),
        ranked: table.len(),
        entries: top_n(graph, &table, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::{betweenness_centrality, closeness_centrality};

    fn make_star(leaves: usize) -> Graph {
        let mut g = Graph::new(leaves + 1).unwrap();
        for i in 1..=leaves {
            g.add_edge("hub", &format!("leaf{}", i)).unwrap();
        }
        g
    }

    #[test]
    fn test_highest_resolves_label() {
        let g = make_star(4);
        let best = highest(&g, &betweenness_centrality(&g)).unwrap();
        assert_eq!(best.label, "hub");
        assert_eq!(best.rank, 1);
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_highest_empty_table() {
        let g = make_star(1);
        assert_eq!(highest(&g, &RankedScores::default()), None);
    }

    #[test]
    fn test_top_n_exact() {
        let g = make_star(12);
        let top = top_n(&g, &closeness_centrality(&g), 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].label, "hub");
        assert_eq!(top[1].label, "leaf1");
        assert_eq!(top[9].rank, 10);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_top_n_fewer_entries_than_requested() {
        let g = make_star(3);
        let top = top_n(&g, &closeness_centrality(&g), 10);
        assert_eq!(top.len(), 4);
        assert_eq!(top.last().map(|v| v.rank), Some(4));
    }

    #[test]
    fn test_top_n_zero() {
        let g = make_star(3);
        assert!(top_n(&g, &closeness_centrality(&g), 0).is_empty());
    }

    #[test]
    fn test_centrality_report_counts() {
        let mut g = Graph::new(5).unwrap();
        g.load_edges([("hub", "a"), ("hub", "b"), ("hub", "c"), ("loner", "loner")])
            .unwrap();
        let report = centrality_report(&g, Metric::Closeness, 2);
        assert_eq!(report.metric, Metric::Closeness);
        assert_eq!(report.vertex_count, 5);
        assert_eq!(report.ranked, 4);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].label, "hub");
    }
}
