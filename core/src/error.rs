use thiserror::Error;

/// Failures raised by graph construction, insertion and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error(
        "graph capacity must be between 1 and {max}, got {0}",
        max = crate::graph::MAX_CAPACITY
    )]
    InvalidCapacity(usize),

    /// The vertex registry is full. Nothing was registered by the failing call.
    #[error("vertex '{label}' would exceed graph capacity of {capacity}")]
    CapacityExceeded { label: String, capacity: usize },

    #[error("vertex '{0}' not found")]
    UnknownVertex(String),
}

/// Failures raised while reading an edge list.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read edge list: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: vertex '{label}' has no destination")]
    DanglingVertex { line: usize, label: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
