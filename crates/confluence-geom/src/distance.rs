//! Euclidean distance newtype and computation.

use std::cmp::Ordering;
use std::fmt;

/// A non-negative Euclidean distance value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    /// Create a new distance from a raw non-negative value.
    #[must_use]
    pub fn new(value: f64) -> Self {
        debug_assert!(value >= 0.0, "distance must be non-negative, got {value}");
        Self(value)
    }

    /// Return the raw distance value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Compute the Euclidean (L2) distance between two coordinate slices.
///
/// Both slices must have the same length; this is guaranteed when the
/// coordinates come from a [`LabeledSet`](crate::LabeledSet), which enforces
/// uniform dimensionality at construction.
#[must_use]
pub fn euclidean(a: &[f64], b: &[f64]) -> Distance {
    debug_assert_eq!(a.len(), b.len(), "dimension mismatch in euclidean()");
    let sum_sq: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    Distance(sum_sq.sqrt())
}
