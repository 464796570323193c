//! The iterative greedy merge loop shared by all linkage strategies.

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use confluence_geom::{Distance, LabeledSet};

use crate::error::Rejection;
use crate::method::Linkage;
use crate::relabel::relabel;
use crate::report::{MergeReport, MergeStep};
use crate::validate::{Validated, validate};

// ── merge loop ────────────────────────────────────────────────────────────────

/// Reduce `set` to exactly `final_clusters` clusters under `method`, then
/// renumber the survivors into `1..=final_clusters`.
///
/// Inter-cluster distances are recomputed from scratch every iteration; the
/// candidate evaluations run in parallel, but the selection pass is
/// sequential in ascending `(i, j)` label order so that ties always resolve
/// to the first pair encountered.
///
/// # Errors
///
/// Propagates [`Rejection`] from the validator; `set` is untouched on error.
#[instrument(skip(set), fields(method = method.name(), n_points = set.len(), final_clusters))]
pub(crate) fn merge(
    set: &mut LabeledSet,
    method: Linkage,
    final_clusters: usize,
) -> Result<MergeReport, Rejection> {
    let mut clusters = match validate(set, final_clusters) {
        Ok(Validated::Proceed { clusters }) => clusters,
        Ok(Validated::AlreadySatisfied { n_clusters }) => {
            info!(n_clusters, "already at the requested cluster count, nothing to merge");
            return Ok(MergeReport {
                initial_clusters: n_clusters,
                final_clusters: n_clusters,
                steps: Vec::new(),
            });
        }
        Err(rejection) => {
            warn!(%rejection, "input rejected, labeled set returned unchanged");
            return Err(rejection);
        }
    };

    let initial_clusters = clusters.len();
    let mut steps = Vec::with_capacity(initial_clusters - final_clusters);

    while clusters.len() > final_clusters {
        let members: Vec<Vec<usize>> =
            clusters.iter().map(|&label| set.members(label)).collect();

        // Candidate pairs in ascending (i, j) enumeration order.
        let pairs: Vec<(usize, usize)> = (0..clusters.len())
            .flat_map(|i| ((i + 1)..clusters.len()).map(move |j| (i, j)))
            .collect();

        let distances: Vec<Distance> = pairs
            .par_iter()
            .map(|&(i, j)| method.between(set, &members[i], &members[j]))
            .collect();

        // Sequential selection preserves the canonical tie-break.
        let mut best: Option<(usize, Distance)> = None;
        for (idx, &d) in distances.iter().enumerate() {
            best = match best {
                None => Some((idx, d)),
                Some((_, incumbent)) if method.prefers(d, incumbent) => Some((idx, d)),
                other => other,
            };
        }
        let (best_idx, distance) =
            best.expect("a validated run always has at least one cluster pair");

        let (i, j) = pairs[best_idx];
        let (kept, absorbed) = (clusters[i], clusters[j]);
        let points_moved = set.reassign(absorbed, kept);
        debug!(
            kept,
            absorbed,
            distance = distance.value(),
            points_moved,
            n_clusters = clusters.len() - 1,
            "merged cluster pair"
        );
        steps.push(MergeStep { kept, absorbed, distance, points_moved });

        clusters = set.distinct_labels();
    }

    let final_count = relabel(set);

    info!(
        initial_clusters,
        final_clusters = final_count,
        merges = steps.len(),
        "merge loop complete"
    );

    Ok(MergeReport {
        initial_clusters,
        final_clusters: final_count,
        steps,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
