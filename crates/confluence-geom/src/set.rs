//! The labeled point set mutated in place by the linkage engine.

use crate::error::GeomError;
use crate::point::Point;

/// An ordered sequence of points paired with a mutable cluster-label column.
///
/// The points are immutable after construction and share a uniform
/// dimensionality. The label column is the sole mutable state in the system:
/// clusters are never materialized, only derived from shared label values,
/// and merging happens purely through label reassignment.
///
/// Labels are stored as raw `f64` because the external input contract is a
/// numeric table whose last column must *contain* integral values ≥ 1.
/// Integrality is a validated property checked before clustering, not a
/// type-level guarantee, so rejected inputs can be handed back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSet {
    points: Vec<Point>,
    labels: Vec<f64>,
}

impl LabeledSet {
    /// Create a labeled set from parallel point and label columns.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`GeomError::EmptySet`] | `points` is empty |
    /// | [`GeomError::LengthMismatch`] | `points` and `labels` differ in length |
    /// | [`GeomError::DimensionMismatch`] | A point's dimensionality differs from the first point's |
    pub fn new(points: Vec<Point>, labels: Vec<f64>) -> Result<Self, GeomError> {
        if points.is_empty() {
            return Err(GeomError::EmptySet);
        }
        if points.len() != labels.len() {
            return Err(GeomError::LengthMismatch {
                points: points.len(),
                labels: labels.len(),
            });
        }
        let expected = points[0].dim();
        for (index, p) in points.iter().enumerate() {
            if p.dim() != expected {
                return Err(GeomError::DimensionMismatch {
                    index,
                    expected,
                    got: p.dim(),
                });
            }
        }
        Ok(Self { points, labels })
    }

    /// Create a labeled set from table rows where every row holds the feature
    /// coordinates followed by the cluster label in the last column.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`GeomError::EmptySet`] | `rows` is empty |
    /// | [`GeomError::RowTooShort`] | A row has fewer than two columns |
    /// | [`GeomError::NonFiniteValue`] | A feature coordinate is NaN or infinite |
    /// | [`GeomError::DimensionMismatch`] | Rows differ in width |
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GeomError> {
        let mut points = Vec::with_capacity(rows.len());
        let mut labels = Vec::with_capacity(rows.len());
        for (row, mut values) in rows.into_iter().enumerate() {
            if values.len() < 2 {
                return Err(GeomError::RowTooShort {
                    row,
                    got: values.len(),
                });
            }
            let label = values.pop().expect("row has at least two columns");
            points.push(Point::new(values)?);
            labels.push(label);
        }
        Self::new(points, labels)
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return true if the set has no points.
    ///
    /// A [`LabeledSet`] constructed via [`LabeledSet::new`] is always
    /// non-empty, so this always returns `false` for valid instances.
    /// Provided to satisfy the `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return the dimensionality shared by all points.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.points[0].dim()
    }

    /// Return the point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    pub fn point(&self, index: usize) -> &Point {
        &self.points[index]
    }

    /// Return all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Return the label column.
    #[must_use]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Return the sorted, deduplicated set of labels currently in use.
    #[must_use]
    pub fn distinct_labels(&self) -> Vec<f64> {
        let mut distinct = self.labels.clone();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        distinct
    }

    /// Return the indices of all points currently bearing `label`.
    #[must_use]
    pub fn members(&self, label: f64) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(i, &l)| if l == label { Some(i) } else { None })
            .collect()
    }

    /// Reassign every point labeled `from` to `to`, returning the number of
    /// points moved.
    ///
    /// Comparison is exact: validated labels are integral, and integral `f64`
    /// values compare exactly.
    pub fn reassign(&mut self, from: f64, to: f64) -> usize {
        let mut moved = 0;
        for l in &mut self.labels {
            if *l == from {
                *l = to;
                moved += 1;
            }
        }
        moved
    }

    /// Return `(label, member count)` pairs sorted by ascending label.
    #[must_use]
    pub fn label_histogram(&self) -> Vec<(f64, usize)> {
        self.distinct_labels()
            .into_iter()
            .map(|label| {
                let count = self.labels.iter().filter(|&&l| l == label).count();
                (label, count)
            })
            .collect()
    }

    /// Consume the set and rebuild the table rows: feature coordinates
    /// followed by the label in the last column.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.points
            .into_iter()
            .zip(self.labels)
            .map(|(p, label)| {
                let mut row = p.into_inner();
                row.push(label);
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_set() -> LabeledSet {
        LabeledSet::from_rows(vec![
            vec![1.0, 2.0, 1.0],
            vec![1.0, 4.0, 1.0],
            vec![1.0, 0.0, 3.0],
            vec![4.0, 3.0, 2.0],
            vec![4.0, 4.0, 2.0],
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_empty() {
        let result = LabeledSet::new(vec![], vec![]);
        assert!(matches!(result, Err(GeomError::EmptySet)));
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let points = vec![Point::new(vec![1.0]).unwrap()];
        let result = LabeledSet::new(points, vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(GeomError::LengthMismatch { points: 1, labels: 2 })
        ));
    }

    #[test]
    fn new_rejects_mixed_dimensionality() {
        let points = vec![
            Point::new(vec![1.0, 2.0]).unwrap(),
            Point::new(vec![1.0]).unwrap(),
        ];
        let result = LabeledSet::new(points, vec![1.0, 1.0]);
        assert!(matches!(
            result,
            Err(GeomError::DimensionMismatch { index: 1, expected: 2, got: 1 })
        ));
    }

    #[test]
    fn from_rows_splits_label_column() {
        let set = make_set();
        assert_eq!(set.len(), 5);
        assert_eq!(set.dim(), 2);
        assert_eq!(set.labels(), &[1.0, 1.0, 3.0, 2.0, 2.0]);
        assert_eq!(set.point(3).as_slice(), &[4.0, 3.0]);
    }

    #[test]
    fn from_rows_rejects_short_row() {
        let result = LabeledSet::from_rows(vec![vec![1.0]]);
        assert!(matches!(result, Err(GeomError::RowTooShort { row: 0, got: 1 })));
    }

    #[test]
    fn from_rows_rejects_non_finite_feature() {
        let result = LabeledSet::from_rows(vec![vec![f64::NAN, 1.0, 1.0]]);
        assert!(matches!(result, Err(GeomError::NonFiniteValue { index: 0 })));
    }

    #[test]
    fn distinct_labels_sorted() {
        let set = make_set();
        assert_eq!(set.distinct_labels(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn members_by_label() {
        let set = make_set();
        assert_eq!(set.members(1.0), vec![0, 1]);
        assert_eq!(set.members(2.0), vec![3, 4]);
        assert_eq!(set.members(3.0), vec![2]);
        assert!(set.members(9.0).is_empty());
    }

    #[test]
    fn reassign_moves_all_matching() {
        let mut set = make_set();
        let moved = set.reassign(2.0, 1.0);
        assert_eq!(moved, 2);
        assert_eq!(set.labels(), &[1.0, 1.0, 3.0, 1.0, 1.0]);
        assert_eq!(set.distinct_labels(), vec![1.0, 3.0]);
    }

    #[test]
    fn label_histogram_counts() {
        let set = make_set();
        assert_eq!(
            set.label_histogram(),
            vec![(1.0, 2), (2.0, 2), (3.0, 1)]
        );
    }

    #[test]
    fn into_rows_roundtrip() {
        let rows = vec![vec![1.0, 2.0, 1.0], vec![3.0, 4.0, 2.0]];
        let set = LabeledSet::from_rows(rows.clone()).unwrap();
        assert_eq!(set.into_rows(), rows);
    }
}
