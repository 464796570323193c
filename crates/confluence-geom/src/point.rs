//! Validated feature-space points.

use std::ops::Index;

use crate::error::GeomError;

/// Owned, validated point in feature space. Guaranteed non-empty with all
/// finite coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Point(Vec<f64>);

impl Point {
    /// Create a new point, validating that it is non-empty and all coordinates
    /// are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`GeomError::EmptyPoint`] | `coords` is empty |
    /// | [`GeomError::NonFiniteValue`] | Any coordinate is NaN or infinite |
    pub fn new(coords: Vec<f64>) -> Result<Self, GeomError> {
        if coords.is_empty() {
            return Err(GeomError::EmptyPoint);
        }
        if let Some(index) = coords.iter().position(|v| !v.is_finite()) {
            return Err(GeomError::NonFiniteValue { index });
        }
        Ok(Self(coords))
    }

    /// Return the dimensionality of the point.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Return the coordinates as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consume and return the inner coordinate vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for Point {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = GeomError;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(coords)
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
