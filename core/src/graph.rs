use std::collections::HashMap;

use tracing::debug;

use crate::error::GraphError;

/// Position of a vertex in the registry. Stable once assigned.
pub type VertexIndex = usize;

/// Largest accepted capacity. The adjacency matrix takes capacity² bytes,
/// so this ceiling keeps it at or below 400MB.
pub const MAX_CAPACITY: usize = 20_000;

/// Undirected, unweighted graph with a vertex capacity fixed at construction.
///
/// Vertices are string labels registered in insertion order. Edges live in a
/// `capacity × capacity` boolean matrix stored row-major; both `[a][b]` and
/// `[b][a]` are set on every insertion, so the matrix is always symmetric.
#[derive(Debug, Clone)]
pub struct Graph {
    capacity: usize,
    vertices: Vec<String>,
    index: HashMap<String, VertexIndex>,
    adjacency: Vec<bool>,
}

impl Graph {
    /// Allocate an empty graph able to hold `capacity` distinct vertices.
    ///
    /// Fails with `InvalidCapacity` for 0 or anything above [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> Result<Self, GraphError> {
        let cells = match capacity.checked_mul(capacity) {
            Some(cells) if capacity > 0 && capacity <= MAX_CAPACITY => cells,
            _ => return Err(GraphError::InvalidCapacity(capacity)),
        };
        Ok(Self {
            capacity,
            vertices: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            adjacency: vec![false; cells],
        })
    }

    /// Insert an undirected edge, registering unseen labels first.
    ///
    /// Registration is all-or-nothing: if the new labels do not all fit, the
    /// call fails with `CapacityExceeded` naming the first label that does not
    /// fit and the registry is left untouched. Re-adding an edge is a no-op.
    pub fn add_edge(&mut self, source: &str, destination: &str) -> Result<(), GraphError> {
        let source_new = !self.index.contains_key(source);
        let destination_new = destination != source && !self.index.contains_key(destination);

        let needed = usize::from(source_new) + usize::from(destination_new);
        if self.vertices.len() + needed > self.capacity {
            let label = if source_new && self.vertices.len() == self.capacity {
                source
            } else {
                destination
            };
            return Err(GraphError::CapacityExceeded {
                label: label.to_string(),
                capacity: self.capacity,
            });
        }

        let s = self.register(source);
        let d = self.register(destination);
        self.adjacency[s * self.capacity + d] = true;
        self.adjacency[d * self.capacity + s] = true;
        Ok(())
    }

    /// Bulk insert from any iterable of label pairs.
    ///
    /// Stops at the first failing pair; pairs before it stay inserted.
    /// Returns the number of pairs inserted.
    pub fn load_edges<I, S>(&mut self, edges: I) -> Result<usize, GraphError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut inserted = 0;
        for (source, destination) in edges {
            self.add_edge(source.as_ref(), destination.as_ref())?;
            inserted += 1;
        }
        debug!(
            inserted,
            vertices = self.vertices.len(),
            capacity = self.capacity,
            "loaded edge pairs"
        );
        Ok(inserted)
    }

    fn register(&mut self, label: &str) -> VertexIndex {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.vertices.len();
        self.vertices.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        idx
    }

    /// Resolve a label to its index.
    pub fn index_of(&self, label: &str) -> Result<VertexIndex, GraphError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(label.to_string()))
    }

    pub fn label(&self, index: VertexIndex) -> Option<&str> {
        self.vertices.get(index).map(String::as_str)
    }

    /// Registered labels in index order.
    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_edge(&self, a: VertexIndex, b: VertexIndex) -> bool {
        a < self.capacity && b < self.capacity && self.adjacency[a * self.capacity + b]
    }

    /// Indices adjacent to `index`, ascending. Empty for an unregistered index.
    pub fn neighbors(&self, index: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        self.row(index)
            .iter()
            .enumerate()
            .filter_map(|(j, &linked)| linked.then_some(j))
    }

    /// The live part of a matrix row: columns `0..vertex_count`.
    fn row(&self, index: VertexIndex) -> &[bool] {
        if index >= self.vertices.len() {
            return &[];
        }
        let start = index * self.capacity;
        &self.adjacency[start..start + self.vertices.len()]
    }

    /// Every undirected edge once, as `(low, high)` in row-major order.
    /// Self-loops appear as `(i, i)`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        (0..self.vertices.len())
            .flat_map(move |i| self.neighbors(i).filter(move |&j| j >= i).map(move |j| (i, j)))
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let matrix = self.adjacency.len() * size_of::<bool>();
        let text: usize = self.vertices.iter().map(String::len).sum();
        let registry = self.vertices.len() * size_of::<String>() + text;
        // index keys hold a second copy of the label text
        let entry = size_of::<String>() + size_of::<VertexIndex>() + 8;
        let index_mem = self.index.len() * entry + text;

        matrix + registry + index_mem
    }
}
