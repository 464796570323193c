//! Precondition rejections from the linkage validator.

/// Reasons the validator refuses to cluster.
///
/// All rejections are non-fatal: they are raised before any mutation, so the
/// caller's labeled set is returned exactly as it was passed in.
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    /// Returned when the label column contains a non-integral value.
    #[error("label column contains non-integral value {value} at row {index}")]
    InvalidLabelType {
        /// Row index of the first non-integral label found.
        index: usize,
        /// The offending label value.
        value: f64,
    },

    /// Returned when the minimum label is below 1.
    #[error("cluster labels must start from 1, found minimum {min}")]
    InvalidLabelRange {
        /// The smallest label value in the column.
        min: f64,
    },

    /// Returned when fewer clusters exist than the requested final count.
    #[error("current cluster count {current} is less than the requested final count {requested}")]
    InsufficientClusters {
        /// Number of distinct labels currently in use.
        current: usize,
        /// Requested final cluster count.
        requested: usize,
    },

    /// Returned when the requested final cluster count is below 1.
    #[error("final cluster count must be at least 1, got {requested}")]
    InvalidTargetCount {
        /// Requested final cluster count.
        requested: usize,
    },
}
