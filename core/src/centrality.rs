//! Closeness and betweenness centrality over the whole graph.
//!
//! Both metrics run one BFS per vertex through the traversal engine and
//! produce a [`RankedScores`] table, best vertex first.
//!
//! # Closeness
//!
//! A vertex's score is `1 / Σ d(v, u)` over every *reached* vertex `u ≠ v`.
//! Unreached vertices contribute nothing. A vertex that reaches no other
//! vertex has no meaningful score and is left out of the table.
//!
//! # Betweenness
//!
//! This is single-tree accumulation, not Brandes' path counting. For each
//! source `i` (all but the last index), one BFS predecessor tree is built.
//! Every reached `k > i` gets one point, and so does every ancestor on the
//! chain `prev[k], prev[prev[k]], …` up to and including the source. Only the
//! first shortest path discovered per pair is credited. Vertices that never
//! receive a point are left out of the table.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::{Graph, VertexIndex};
use crate::traversal::{single_source_distances, single_source_predecessors};

/// One row of a ranked table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedEntry {
    pub index: VertexIndex,
    pub score: f64,
}

/// Vertices ordered by score, highest first; equal scores are ordered by
/// ascending vertex index. Ties are kept, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedScores {
    entries: Vec<RankedEntry>,
}

impl RankedScores {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (VertexIndex, f64)>,
    {
        let mut entries: Vec<RankedEntry> = scores
            .into_iter()
            .map(|(index, score)| RankedEntry { index, score })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }

    pub fn highest(&self) -> Option<RankedEntry> {
        self.entries.first().copied()
    }

    /// The best `n` entries, or all of them if there are fewer than `n`.
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Remove and return the best entry.
    pub fn pop_highest(&mut self) -> Option<RankedEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn score_of(&self, index: VertexIndex) -> Option<f64> {
        self.entries.iter().find(|e| e.index == index).map(|e| e.score)
    }
}

/// Rank every vertex by closeness centrality.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn closeness_centrality(graph: &Graph) -> RankedScores {
    let n = graph.vertex_count();
    let mut scores = Vec::with_capacity(n);

    for v in 0..n {
        let total: u64 = single_source_distances(graph, v)
            .into_iter()
            .flatten()
            .map(u64::from)
            .sum();
        if total > 0 {
            scores.push((v, 1.0 / total as f64));
        }
    }

    debug!(ranked = scores.len(), excluded = n - scores.len(), "closeness done");
    RankedScores::from_scores(scores)
}

/// Rank vertices by single-tree betweenness accumulation.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn betweenness_centrality(graph: &Graph) -> RankedScores {
    let n = graph.vertex_count();
    let mut acc: Vec<u64> = vec![0; n];

    for source in 0..n.saturating_sub(1) {
        let prev = single_source_predecessors(graph, source);
        for k in (source + 1)..n {
            // Only reached vertices have a parent; the source itself is < k.
            let Some(mut parent) = prev[k] else {
                continue;
            };
            acc[k] += 1;
            loop {
                acc[parent] += 1;
                match prev[parent] {
                    Some(p) => parent = p,
                    None => break,
                }
            }
        }
    }

    let scores: Vec<(VertexIndex, f64)> = acc
        .into_iter()
        .enumerate()
        .filter(|&(_, count)| count > 0)
        .map(|(i, count)| (i, count as f64))
        .collect();

    debug!(ranked = scores.len(), excluded = n - scores.len(), "betweenness done");
    RankedScores::from_scores(scores)
}

/// Centrality metric selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Closeness,
    Betweenness,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Betweenness, Metric::Closeness];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Closeness => "closeness",
            Metric::Betweenness => "betweenness",
        }
    }

    pub fn rank(self, graph: &Graph) -> RankedScores {
        match self {
            Metric::Closeness => closeness_centrality(graph),
            Metric::Betweenness => betweenness_centrality(graph),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "closeness" | "c" => Ok(Metric::Closeness),
            "betweenness" | "b" => Ok(Metric::Betweenness),
            other => Err(format!(
                "invalid metric '{}', use 'closeness' or 'betweenness'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new(edges.len() * 2).unwrap();
        g.load_edges(edges.iter().copied()).unwrap();
        g
    }

    fn make_star(leaves: usize) -> Graph {
        let mut g = Graph::new(leaves + 1).unwrap();
        for i in 1..=leaves {
            g.add_edge("C", &format!("L{}", i)).unwrap();
        }
        g
    }

    // --- RankedScores ---

    #[test]
    fn test_ranked_scores_order_and_ties() {
        let t = RankedScores::from_scores([(0, 1.0), (1, 3.0), (2, 1.0), (3, 2.0)]);
        let order: Vec<VertexIndex> = t.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_ranked_scores_top_and_highest() {
        let t = RankedScores::from_scores([(0, 0.5), (1, 0.25)]);
        assert_eq!(t.highest(), Some(RankedEntry { index: 0, score: 0.5 }));
        assert_eq!(t.top(1).len(), 1);
        assert_eq!(t.top(10).len(), 2);
        assert!(t.top(0).is_empty());
        assert_eq!(t.score_of(1), Some(0.25));
        assert_eq!(t.score_of(7), None);
    }

    #[test]
    fn test_ranked_scores_pop_highest() {
        let mut t = RankedScores::from_scores([(0, 1.0), (1, 2.0)]);
        assert_eq!(t.pop_highest().map(|e| e.index), Some(1));
        assert_eq!(t.pop_highest().map(|e| e.index), Some(0));
        assert_eq!(t.pop_highest(), None);
        assert!(t.is_empty());
    }

    #[test]
    fn test_ranked_scores_empty() {
        let t = RankedScores::default();
        assert_eq!(t.highest(), None);
        assert!(t.top(3).is_empty());
    }

    // --- Closeness ---

    #[test]
    fn test_closeness_chain() {
        let g = make_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let t = closeness_centrality(&g);
        assert_eq!(t.len(), 4);
        assert_eq!(t.score_of(0), Some(1.0 / 6.0));
        assert_eq!(t.score_of(1), Some(0.25));
        let order: Vec<VertexIndex> = t.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_closeness_cycle_all_equal() {
        let g = make_graph(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        let t = closeness_centrality(&g);
        assert_eq!(t.len(), 4);
        assert!(t.iter().all(|e| e.score == 0.25));
    }

    #[test]
    fn test_closeness_star() {
        let g = make_star(5);
        let t = closeness_centrality(&g);
        assert_eq!(t.highest(), Some(RankedEntry { index: 0, score: 0.2 }));
        assert_eq!(t.score_of(3), Some(1.0 / 9.0));
    }

    #[test]
    fn test_closeness_excludes_isolated() {
        // Z only has a self-loop and reaches nobody
        let g = make_graph(&[("A", "B"), ("Z", "Z")]);
        let t = closeness_centrality(&g);
        assert_eq!(t.len(), 2);
        assert_eq!(t.score_of(2), None);
    }

    #[test]
    fn test_closeness_keeps_distance_sum_of_one() {
        let g = make_graph(&[("A", "B")]);
        let t = closeness_centrality(&g);
        assert_eq!(t.score_of(0), Some(1.0));
        assert_eq!(t.score_of(1), Some(1.0));
    }

    #[test]
    fn test_closeness_disconnected_uses_own_component() {
        let g = make_graph(&[("A", "B"), ("B", "C"), ("X", "Y")]);
        let t = closeness_centrality(&g);
        assert_eq!(t.score_of(1), Some(0.5));
        assert_eq!(t.score_of(3), Some(1.0));
    }

    // --- Betweenness ---

    #[test]
    fn test_betweenness_star_center_highest() {
        let g = make_star(5);
        let t = betweenness_centrality(&g);
        assert_eq!(t.highest(), Some(RankedEntry { index: 0, score: 15.0 }));
        assert!(t.iter().skip(1).all(|e| e.score == 5.0));
        assert_eq!(t.len(), 6);
    }

    #[test]
    fn test_betweenness_star_center_inserted_last() {
        let mut g = Graph::new(6).unwrap();
        for i in 1..=5 {
            g.add_edge(&format!("L{}", i), "C").unwrap();
        }
        let t = betweenness_centrality(&g);
        let best = t.highest().unwrap();
        assert_eq!(g.label(best.index), Some("C"));
        assert!(t.iter().skip(1).all(|e| e.score < best.score));
    }

    #[test]
    fn test_betweenness_chain() {
        let g = make_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let t = betweenness_centrality(&g);
        assert_eq!(t.score_of(0), Some(3.0));
        assert_eq!(t.score_of(1), Some(5.0));
        assert_eq!(t.score_of(2), Some(5.0));
        assert_eq!(t.score_of(3), Some(3.0));
        assert_eq!(t.highest().map(|e| e.index), Some(1));
    }

    #[test]
    fn test_betweenness_skips_unreached_pairs() {
        let g = make_graph(&[("A", "B"), ("C", "D")]);
        let t = betweenness_centrality(&g);
        assert_eq!(t.len(), 4);
        assert!(t.iter().all(|e| e.score == 1.0));
    }

    #[test]
    fn test_betweenness_excludes_untouched() {
        let g = make_graph(&[("A", "B"), ("Z", "Z")]);
        let t = betweenness_centrality(&g);
        assert_eq!(t.score_of(2), None);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_betweenness_single_vertex() {
        let g = make_graph(&[("A", "A")]);
        assert!(betweenness_centrality(&g).is_empty());
        assert!(closeness_centrality(&g).is_empty());
    }

    // --- Metric ---

    #[test]
    fn test_metric_parse() {
        assert_eq!("Closeness".parse::<Metric>(), Ok(Metric::Closeness));
        assert_eq!("b".parse::<Metric>(), Ok(Metric::Betweenness));
        assert!("pagerank".parse::<Metric>().is_err());
        assert_eq!(Metric::Betweenness.to_string(), "betweenness");
    }

    #[test]
    fn test_metric_rank_dispatch() {
        let g = make_star(3);
        assert_eq!(Metric::Closeness.rank(&g), closeness_centrality(&g));
        assert_eq!(Metric::Betweenness.rank(&g), betweenness_centrality(&g));
    }
}
