//! Dense renumbering of surviving cluster labels.

use confluence_geom::LabeledSet;
use tracing::debug;

/// Renumber the surviving labels into the contiguous range `1..=n`.
///
/// Walks the distinct labels in ascending order and reassigns the i-th
/// (0-indexed) to `i + 1`. Safe in place: labels are distinct integers ≥ 1,
/// so the i-th distinct label is at least `i + 1` and downward reassignment
/// never collides with a not-yet-processed label.
///
/// Returns the final cluster count.
pub(crate) fn relabel(set: &mut LabeledSet) -> usize {
    let survivors = set.distinct_labels();
    for (i, &old) in survivors.iter().enumerate() {
        let new = (i + 1) as f64;
        if old != new {
            let moved = set.reassign(old, new);
            debug!(old, new, moved, "renumbered cluster");
        }
    }
    survivors.len()
}

#[cfg(test)]
mod tests {
    use confluence_geom::{LabeledSet, Point};

    use super::relabel;

    fn set_with_labels(labels: Vec<f64>) -> LabeledSet {
        let points = labels
            .iter()
            .enumerate()
            .map(|(i, _)| Point::new(vec![i as f64]).unwrap())
            .collect();
        LabeledSet::new(points, labels).unwrap()
    }

    #[test]
    fn fills_gaps() {
        let mut set = set_with_labels(vec![2.0, 5.0, 9.0, 5.0]);
        let n = relabel(&mut set);
        assert_eq!(n, 3);
        assert_eq!(set.labels(), &[1.0, 2.0, 3.0, 2.0]);
    }

    #[test]
    fn contiguous_labels_are_untouched() {
        let mut set = set_with_labels(vec![1.0, 2.0, 3.0, 1.0]);
        let n = relabel(&mut set);
        assert_eq!(n, 3);
        assert_eq!(set.labels(), &[1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn single_cluster() {
        let mut set = set_with_labels(vec![7.0, 7.0, 7.0]);
        let n = relabel(&mut set);
        assert_eq!(n, 1);
        assert_eq!(set.labels(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn preserves_group_structure() {
        let mut set = set_with_labels(vec![8.0, 3.0, 8.0, 3.0, 11.0]);
        relabel(&mut set);
        // Ascending survivors 3, 8, 11 become 1, 2, 3.
        assert_eq!(set.labels(), &[2.0, 1.0, 2.0, 1.0, 3.0]);
    }
}
