//! Result types describing a completed merge run.

use confluence_geom::Distance;

/// A single greedy merge performed by the engine.
#[derive(Debug, Clone)]
pub struct MergeStep {
    /// Label of the absorbing cluster (the lower-enumerated of the pair).
    pub kept: f64,
    /// Label of the absorbed cluster; no point bears it after this step.
    pub absorbed: f64,
    /// Inter-cluster distance of the selected pair under the active strategy.
    pub distance: Distance,
    /// Number of points relabeled from `absorbed` to `kept`.
    pub points_moved: usize,
}

/// Summary of a completed linkage run.
///
/// For a successful run, `steps.len()` equals
/// `initial_clusters - final_clusters`; an already-satisfied call yields an
/// empty step list.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Distinct cluster count before any merging.
    pub initial_clusters: usize,
    /// Distinct cluster count after merging and relabeling.
    pub final_clusters: usize,
    /// The merges performed, in execution order. Labels recorded here are the
    /// pre-relabeling values.
    pub steps: Vec<MergeStep>,
}

impl MergeReport {
    /// Return the number of merges performed.
    #[must_use]
    pub fn merges(&self) -> usize {
        self.steps.len()
    }
}
