/// Errors from math operations whose preconditions can only be checked at runtime.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
    #[error("empty product: multiply needs at least one operand")]
    EmptyProduct,
    #[error("vector times vector is not a matrix product")]
    VectorTimesVector,
    #[error("bezier evaluation needs at least one control point")]
    EmptyControlPolygon,
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport { width: f32, height: f32 },
}
