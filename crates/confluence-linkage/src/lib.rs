//! Agglomerative many-to-one cluster merging.
//!
//! Reduces a labeled point set from its current cluster count to a requested
//! target by repeatedly merging the two closest clusters under a pluggable
//! linkage strategy (single, complete, average, centroid), then renumbers the
//! surviving labels into the dense range `1..=final_clusters`.

mod engine;
mod error;
mod method;
mod relabel;
mod report;
mod validate;

pub use error::Rejection;
pub use method::Linkage;
pub use report::{MergeReport, MergeStep};

use confluence_geom::LabeledSet;

/// Merge clusters under single linkage: the distance between two clusters is
/// the distance between their closest pair of points.
///
/// # Errors
///
/// See [`Linkage::fit`].
pub fn single_linkage(
    set: &mut LabeledSet,
    final_clusters: usize,
) -> Result<MergeReport, Rejection> {
    Linkage::Single.fit(set, final_clusters)
}

/// Merge clusters under complete linkage: the distance between two clusters
/// is the distance between their farthest pair of points, and the pair with
/// the largest such distance is merged.
///
/// # Errors
///
/// See [`Linkage::fit`].
pub fn complete_linkage(
    set: &mut LabeledSet,
    final_clusters: usize,
) -> Result<MergeReport, Rejection> {
    Linkage::Complete.fit(set, final_clusters)
}

/// Merge clusters under average linkage: the distance between two clusters is
/// the mean distance over all cross-cluster point pairs.
///
/// # Errors
///
/// See [`Linkage::fit`].
pub fn average_linkage(
    set: &mut LabeledSet,
    final_clusters: usize,
) -> Result<MergeReport, Rejection> {
    Linkage::Average.fit(set, final_clusters)
}

/// Merge clusters under centroid linkage: the distance between two clusters
/// is the distance between their per-dimension mean points.
///
/// # Errors
///
/// See [`Linkage::fit`].
pub fn centroid_linkage(
    set: &mut LabeledSet,
    final_clusters: usize,
) -> Result<MergeReport, Rejection> {
    Linkage::Centroid.fit(set, final_clusters)
}
