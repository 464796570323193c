//! Error types for point and labeled-set validation.

/// Errors from point construction and labeled-set assembly.
#[derive(Debug, thiserror::Error)]
pub enum GeomError {
    /// Returned when an empty vector is provided as a point.
    #[error("point must have at least one coordinate")]
    EmptyPoint,

    /// Returned when a point contains NaN, infinity, or negative infinity.
    #[error("point contains non-finite value at coordinate {index}")]
    NonFiniteValue {
        /// Position of the first non-finite coordinate found.
        index: usize,
    },

    /// Returned when a point's dimensionality differs from the rest of the set.
    #[error("point {index} has {got} coordinates, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending point.
        index: usize,
        /// Dimensionality established by the first point.
        expected: usize,
        /// Dimensionality of the offending point.
        got: usize,
    },

    /// Returned when the point and label columns have different lengths.
    #[error("labeled set requires one label per point: {points} points, {labels} labels")]
    LengthMismatch {
        /// Number of points provided.
        points: usize,
        /// Number of labels provided.
        labels: usize,
    },

    /// Returned when a labeled set would contain zero points.
    #[error("labeled set must contain at least one point")]
    EmptySet,

    /// Returned when a table row is too short to hold features plus a label.
    #[error("table row {row} must have at least two columns (features plus label), got {got}")]
    RowTooShort {
        /// Zero-based row index.
        row: usize,
        /// Number of columns in the offending row.
        got: usize,
    },
}
