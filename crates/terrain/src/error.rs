/// Errors from mesh construction: the attribute arrays and triangle list must stay in lockstep.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("attribute {name:?} has {actual} entries, mesh has {expected} vertices")]
    AttributeLength {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("attribute {name:?} must have {expected} components, got {actual}")]
    AttributeKind {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("triangle {triangle} references vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// Errors from terrain generation and queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error("grid resolution must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("grid resolution {0} exceeds the 32-bit index range")]
    GridTooLarge(usize),
    #[error("vertex {vertex} has no usable normal (no incident triangle area)")]
    DegenerateNormal { vertex: usize },
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
