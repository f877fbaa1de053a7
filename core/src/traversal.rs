use std::collections::VecDeque;
use std::ops::ControlFlow;

use crate::error::GraphError;
use crate::graph::{Graph, VertexIndex};

/// Labels from source to destination, both inclusive.
pub type Route = Vec<String>;

/// Breadth-first sweep from `source`, calling `on_discover(parent, child)` the
/// moment each vertex is first reached. A vertex is marked visited when it is
/// enqueued and never enqueued twice. Neighbors are scanned in ascending
/// index order, so discovery order is deterministic for a given graph.
///
/// Returning `ControlFlow::Break` from the callback abandons the rest of the
/// sweep, including work already queued.
fn sweep<F>(graph: &Graph, source: VertexIndex, mut on_discover: F)
where
    F: FnMut(VertexIndex, VertexIndex) -> ControlFlow<()>,
{
    let n = graph.vertex_count();
    if source >= n {
        return;
    }

    let mut visited = vec![false; n];
    let mut queue: VecDeque<VertexIndex> = VecDeque::with_capacity(n);
    visited[source] = true;
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbors(current) {
            if visited[next] {
                continue;
            }
            visited[next] = true;
            if on_discover(current, next).is_break() {
                return;
            }
            queue.push_back(next);
        }
    }
}

/// Shortest route between two labelled vertices.
///
/// Returns `Ok(None)` when `to` is not reachable from `from`, and
/// `UnknownVertex` when either label was never inserted. When several
/// shortest routes exist, the one through the lowest-indexed vertices at each
/// BFS level is returned.
pub fn shortest_path(graph: &Graph, from: &str, to: &str) -> Result<Option<Route>, GraphError> {
    let start = graph.index_of(from)?;
    let target = graph.index_of(to)?;

    Ok(shortest_path_indices(graph, start, target).map(|indices| {
        indices
            .into_iter()
            .filter_map(|i| graph.label(i).map(str::to_string))
            .collect()
    }))
}

/// Index-level shortest route. `None` if unreachable or either index is not
/// registered.
pub fn shortest_path_indices(
    graph: &Graph,
    start: VertexIndex,
    target: VertexIndex,
) -> Option<Vec<VertexIndex>> {
    let n = graph.vertex_count();
    if start >= n || target >= n {
        return None;
    }
    if start == target {
        return Some(vec![start]);
    }

    let mut prev: Vec<Option<VertexIndex>> = vec![None; n];
    let mut found = false;
    sweep(graph, start, |parent, child| {
        prev[child] = Some(parent);
        if child == target {
            found = true;
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    if !found {
        return None;
    }

    let mut route = vec![target];
    let mut current = target;
    while let Some(parent) = prev[current] {
        route.push(parent);
        current = parent;
    }
    route.reverse();
    Some(route)
}

/// Hop count from `source` to every vertex, indexed by vertex.
///
/// The source is `Some(0)`; vertices the sweep never reaches are `None`.
/// An unregistered source yields all `None`.
pub fn single_source_distances(graph: &Graph, source: VertexIndex) -> Vec<Option<u32>> {
    let mut dist: Vec<Option<u32>> = vec![None; graph.vertex_count()];
    if let Some(d) = dist.get_mut(source) {
        *d = Some(0);
    }
    sweep(graph, source, |parent, child| {
        dist[child] = dist[parent].map(|d| d + 1);
        ControlFlow::Continue(())
    });
    dist
}

/// BFS parent of every vertex reached from `source`.
///
/// `None` for the source itself and for unreached vertices.
pub fn single_source_predecessors(graph: &Graph, source: VertexIndex) -> Vec<Option<VertexIndex>> {
    let mut prev: Vec<Option<VertexIndex>> = vec![None; graph.vertex_count()];
    sweep(graph, source, |parent, child| {
        prev[child] = Some(parent);
        ControlFlow::Continue(())
    });
    prev
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new(edges.len() * 2).unwrap();
        g.load_edges(edges.iter().copied()).unwrap();
        g
    }

    fn make_chain(n: usize) -> Graph {
        let labels: Vec<String> = (0..n).map(|i| format!("v{}", i)).collect();
        let mut g = Graph::new(n).unwrap();
        for pair in labels.windows(2) {
            g.add_edge(&pair[0], &pair[1]).unwrap();
        }
        g
    }

    fn make_cycle(n: usize) -> Graph {
        let mut g = Graph::new(n).unwrap();
        for i in 0..n {
            g.add_edge(&format!("v{}", i), &format!("v{}", (i + 1) % n))
                .unwrap();
        }
        g
    }

    // --- Shortest path tests ---

    #[test]
    fn test_shortest_path_chain() {
        let g = make_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let route = shortest_path(&g, "A", "D").unwrap().unwrap();
        assert_eq!(route, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_shortest_path_reverse_direction() {
        let g = make_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let route = shortest_path(&g, "D", "A").unwrap().unwrap();
        assert_eq!(route, vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn test_shortest_path_self() {
        let g = make_graph(&[("A", "B")]);
        assert_eq!(shortest_path(&g, "B", "B").unwrap(), Some(vec!["B".to_string()]));
    }

    #[test]
    fn test_shortest_path_unreachable() {
        let g = make_graph(&[("A", "B"), ("C", "D")]);
        assert_eq!(shortest_path(&g, "A", "D").unwrap(), None);
    }

    #[test]
    fn test_shortest_path_unknown_vertex() {
        let g = make_graph(&[("A", "B")]);
        assert_eq!(
            shortest_path(&g, "A", "Z").unwrap_err(),
            GraphError::UnknownVertex("Z".into())
        );
        assert_eq!(
            shortest_path(&g, "Y", "A").unwrap_err(),
            GraphError::UnknownVertex("Y".into())
        );
    }

    #[test]
    fn test_shortest_path_cycle_prefers_low_index() {
        // Both v0-v1-v2-v3 and v0-v5-v4-v3 are shortest; v1 is scanned first
        let g = make_cycle(6);
        let route = shortest_path(&g, "v0", "v3").unwrap().unwrap();
        assert_eq!(route, vec!["v0", "v1", "v2", "v3"]);
    }

    #[test]
    fn test_shortest_path_takes_shortcut() {
        let g = make_graph(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("A", "E")]);
        let route = shortest_path(&g, "B", "E").unwrap().unwrap();
        assert_eq!(route, vec!["B", "A", "E"]);
    }

    #[test]
    fn test_shortest_path_self_loop_ignored() {
        let g = make_graph(&[("A", "A"), ("A", "B")]);
        let route = shortest_path(&g, "A", "B").unwrap().unwrap();
        assert_eq!(route, vec!["A", "B"]);
    }

    #[test]
    fn test_shortest_path_indices_out_of_range() {
        let g = make_chain(3);
        assert_eq!(shortest_path_indices(&g, 0, 7), None);
        assert_eq!(shortest_path_indices(&g, 7, 0), None);
    }

    // --- Distance sweep tests ---

    #[test]
    fn test_distances_chain() {
        let g = make_chain(5);
        let dist = single_source_distances(&g, 0);
        assert_eq!(dist, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
        let dist = single_source_distances(&g, 2);
        assert_eq!(dist, vec![Some(2), Some(1), Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_distances_unreached_are_none() {
        let g = make_graph(&[("A", "B"), ("C", "D")]);
        let dist = single_source_distances(&g, 0);
        assert_eq!(dist, vec![Some(0), Some(1), None, None]);
    }

    #[test]
    fn test_distances_cycle() {
        let g = make_cycle(5);
        let dist = single_source_distances(&g, 0);
        assert_eq!(dist, vec![Some(0), Some(1), Some(2), Some(2), Some(1)]);
    }

    #[test]
    fn test_distances_out_of_range_source() {
        let g = make_chain(3);
        assert_eq!(single_source_distances(&g, 9), vec![None, None, None]);
    }

    // --- Predecessor sweep tests ---

    #[test]
    fn test_predecessors_chain() {
        let g = make_chain(4);
        assert_eq!(
            single_source_predecessors(&g, 0),
            vec![None, Some(0), Some(1), Some(2)]
        );
        assert_eq!(
            single_source_predecessors(&g, 3),
            vec![Some(1), Some(2), Some(3), None]
        );
    }

    #[test]
    fn test_predecessors_first_discovery_wins() {
        // 0-1, 0-2, 1-3, 2-3: vertex 3 is discovered from 1 before 2
        let g = make_graph(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        assert_eq!(
            single_source_predecessors(&g, 0),
            vec![None, Some(0), Some(0), Some(1)]
        );
    }

    #[test]
    fn test_predecessors_unreached() {
        let g = make_graph(&[("A", "B"), ("C", "C")]);
        assert_eq!(single_source_predecessors(&g, 2), vec![None, None, None]);
    }
}
