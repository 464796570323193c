//! Linkage strategies: inter-cluster distance reductions and merge-pair
//! selection direction.

use confluence_geom::{Distance, LabeledSet, euclidean};

use crate::error::Rejection;
use crate::report::MergeReport;

/// Rule for computing the distance between two clusters from their member
/// points, and for choosing which candidate pair to merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// Distance between the closest pair of cross-cluster points; the pair
    /// with the smallest such distance is merged.
    Single,
    /// Distance between the farthest pair of cross-cluster points; the pair
    /// with the *largest* such distance is merged.
    Complete,
    /// Mean distance over all cross-cluster point pairs; the pair with the
    /// smallest mean is merged.
    Average,
    /// Distance between the per-dimension mean points of the two clusters;
    /// the pair with the smallest centroid distance is merged.
    Centroid,
}

impl Linkage {
    /// All strategies, in documentation order.
    pub const ALL: [Linkage; 4] = [
        Linkage::Single,
        Linkage::Complete,
        Linkage::Average,
        Linkage::Centroid,
    ];

    /// Return the strategy's lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
            Linkage::Centroid => "centroid",
        }
    }

    /// Compute the inter-cluster distance between the clusters whose member
    /// indices are `a` and `b`.
    ///
    /// Single, complete, and average reduce the full cross-cluster pairwise
    /// point-distance matrix (min, max, mean). Centroid compares mean points
    /// directly. Both member slices must be non-empty.
    pub(crate) fn between(self, set: &LabeledSet, a: &[usize], b: &[usize]) -> Distance {
        debug_assert!(!a.is_empty() && !b.is_empty(), "clusters are never empty");
        match self {
            Linkage::Single => {
                let min = cross_distances(set, a, b).fold(f64::INFINITY, f64::min);
                Distance::new(min)
            }
            Linkage::Complete => {
                let max = cross_distances(set, a, b).fold(f64::NEG_INFINITY, f64::max);
                Distance::new(max)
            }
            Linkage::Average => {
                let sum: f64 = cross_distances(set, a, b).sum();
                Distance::new(sum / (a.len() * b.len()) as f64)
            }
            Linkage::Centroid => euclidean(&centroid(set, a), &centroid(set, b)),
        }
    }

    /// Merge `set` down to exactly `final_clusters` clusters under this
    /// strategy, then renumber the survivors into `1..=final_clusters`.
    ///
    /// The label column is mutated in place; the points are never touched.
    /// On rejection the set is returned to the caller exactly as passed in
    /// (the exclusive borrow guarantees no copy was made).
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Rejection::InvalidLabelType`] | A label is non-finite or non-integral |
    /// | [`Rejection::InvalidLabelRange`] | Minimum label < 1 |
    /// | [`Rejection::InsufficientClusters`] | Current cluster count < `final_clusters` |
    /// | [`Rejection::InvalidTargetCount`] | `final_clusters` < 1 |
    pub fn fit(
        self,
        set: &mut LabeledSet,
        final_clusters: usize,
    ) -> Result<MergeReport, Rejection> {
        crate::engine::merge(set, self, final_clusters)
    }

    /// Return true when `candidate` should replace `incumbent` as the merge
    /// pair. Strict comparison ensures ties keep the first pair encountered
    /// in enumeration order.
    pub(crate) fn prefers(self, candidate: Distance, incumbent: Distance) -> bool {
        match self {
            Linkage::Complete => candidate.value() > incumbent.value(),
            Linkage::Single | Linkage::Average | Linkage::Centroid => {
                candidate.value() < incumbent.value()
            }
        }
    }
}

/// Iterate the Euclidean distances between every cross-cluster point pair.
fn cross_distances<'a>(
    set: &'a LabeledSet,
    a: &'a [usize],
    b: &'a [usize],
) -> impl Iterator<Item = f64> + 'a {
    a.iter().flat_map(move |&i| {
        b.iter()
            .map(move |&j| euclidean(set.point(i).as_slice(), set.point(j).as_slice()).value())
    })
}

/// Compute the per-dimension mean point of the cluster with member indices
/// `members`.
fn centroid(set: &LabeledSet, members: &[usize]) -> Vec<f64> {
    let mut mean = vec![0.0; set.dim()];
    for &idx in members {
        for (m, v) in mean.iter_mut().zip(set.point(idx).as_slice()) {
            *m += v;
        }
    }
    let n = members.len() as f64;
    for m in &mut mean {
        *m /= n;
    }
    mean
}
