//! Precondition checks on the label column and target cluster count.

use confluence_geom::LabeledSet;

use crate::error::Rejection;

/// Validator verdict for inputs that pass all checks.
#[derive(Debug)]
pub(crate) enum Validated {
    /// Clustering should proceed; carries the sorted distinct labels.
    Proceed { clusters: Vec<f64> },
    /// The set already has exactly the requested number of clusters.
    AlreadySatisfied { n_clusters: usize },
}

/// Gate a linkage call before any mutation.
///
/// Checks run in a fixed order: label integrality, label range, current
/// count versus requested count, then the requested count itself.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`Rejection::InvalidLabelType`] | Any label is non-finite or has a fractional part |
/// | [`Rejection::InvalidLabelRange`] | Minimum label < 1 |
/// | [`Rejection::InsufficientClusters`] | Distinct label count < `final_clusters` |
/// | [`Rejection::InvalidTargetCount`] | `final_clusters` < 1 |
pub(crate) fn validate(
    set: &LabeledSet,
    final_clusters: usize,
) -> Result<Validated, Rejection> {
    let labels = set.labels();

    if let Some(index) = labels
        .iter()
        .position(|l| !l.is_finite() || l.fract() != 0.0)
    {
        return Err(Rejection::InvalidLabelType {
            index,
            value: labels[index],
        });
    }

    let min = labels.iter().copied().fold(f64::INFINITY, f64::min);
    if min < 1.0 {
        return Err(Rejection::InvalidLabelRange { min });
    }

    let clusters = set.distinct_labels();
    let current = clusters.len();

    if current < final_clusters {
        return Err(Rejection::InsufficientClusters {
            current,
            requested: final_clusters,
        });
    }
    if current == final_clusters {
        return Ok(Validated::AlreadySatisfied { n_clusters: current });
    }
    if final_clusters < 1 {
        return Err(Rejection::InvalidTargetCount {
            requested: final_clusters,
        });
    }

    Ok(Validated::Proceed { clusters })
}
