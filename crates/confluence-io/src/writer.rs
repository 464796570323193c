//! CSV and JSON result writers for linkage runs.

use std::fs;
use std::path::{Path, PathBuf};

use confluence_geom::LabeledSet;
use confluence_linkage::MergeReport;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::RunName;

/// Writes linkage results to JSON and CSV files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{run}_linkage.json` and `{run}_labeled.csv`.
pub struct ResultWriter {
    output_dir: PathBuf,
    run: RunName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and run name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), run = %run))]
    pub fn new(output_dir: &Path, run: RunName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            run,
        })
    }

    /// Write a merge report to `{run}_linkage.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_linkage(
        &self,
        method: &str,
        set: &LabeledSet,
        report: &MergeReport,
    ) -> Result<(), IoError> {
        let path = self
            .output_dir
            .join(format!("{}_linkage.json", self.run.as_str()));

        let steps: Vec<StepArtifact> = report
            .steps
            .iter()
            .map(|s| StepArtifact {
                kept: s.kept,
                absorbed: s.absorbed,
                distance: s.distance.value(),
                points_moved: s.points_moved,
            })
            .collect();

        let cluster_sizes: Vec<ClusterSize> = set
            .label_histogram()
            .into_iter()
            .map(|(label, size)| ClusterSize { label, size })
            .collect();

        let artifact = LinkageArtifact {
            run: self.run.as_str(),
            method,
            n_points: set.len(),
            dims: set.dim(),
            initial_clusters: report.initial_clusters,
            final_clusters: report.final_clusters,
            merges: report.merges(),
            steps,
            cluster_sizes,
            labels: set.labels(),
        };

        let json = serde_json::to_string_pretty(&artifact).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e.into(),
        })?;
        fs::write(&path, json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "linkage artifact written");
        Ok(())
    }

    /// Write the labeled set to `{run}_labeled.csv`: same table shape as the
    /// input, label column in the last position.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_labeled(&self, set: &LabeledSet) -> Result<(), IoError> {
        let path = self
            .output_dir
            .join(format!("{}_labeled.csv", self.run.as_str()));
        write_labeled_csv(&path, set)?;
        info!(path = %path.display(), "labeled CSV written");
        Ok(())
    }
}

/// Write a labeled set as a CSV table: header `f0,...,f{d-1},cluster`, one
/// row per point, feature coordinates followed by the label.
///
/// # Errors
///
/// Returns [`IoError::WriteFile`] if the file cannot be written.
pub fn write_labeled_csv(path: &Path, set: &LabeledSet) -> Result<(), IoError> {
    let write_err = |e: csv::Error| IoError::WriteFile {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    };

    let mut wtr = csv::Writer::from_path(path).map_err(write_err)?;

    let mut header: Vec<String> = (0..set.dim()).map(|i| format!("f{i}")).collect();
    header.push("cluster".to_string());
    wtr.write_record(&header).map_err(write_err)?;

    for (point, label) in set.points().iter().zip(set.labels()) {
        let mut record: Vec<String> =
            point.as_slice().iter().map(|v| format!("{v}")).collect();
        record.push(format!("{label}"));
        wtr.write_record(&record).map_err(write_err)?;
    }

    wtr.flush().map_err(|e| IoError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

// --- JSON artifact structs ---

#[derive(Serialize)]
struct LinkageArtifact<'a> {
    run: &'a str,
    method: &'a str,
    n_points: usize,
    dims: usize,
    initial_clusters: usize,
    final_clusters: usize,
    merges: usize,
    steps: Vec<StepArtifact>,
    cluster_sizes: Vec<ClusterSize>,
    labels: &'a [f64],
}

#[derive(Serialize)]
struct StepArtifact {
    kept: f64,
    absorbed: f64,
    distance: f64,
    points_moved: usize,
}

#[derive(Serialize)]
struct ClusterSize {
    label: f64,
    size: usize,
}

#[cfg(test)]
mod tests {
    use confluence_geom::LabeledSet;
    use confluence_linkage::single_linkage;
    use tempfile::TempDir;

    use super::{ResultWriter, write_labeled_csv};
    use crate::domain::RunName;

    fn example_set() -> LabeledSet {
        LabeledSet::from_rows(vec![
            vec![1.0, 2.0, 1.0],
            vec![1.0, 4.0, 1.0],
            vec![1.0, 0.0, 3.0],
            vec![4.0, 3.0, 2.0],
            vec![4.0, 4.0, 4.0],
        ])
        .unwrap()
    }

    #[test]
    fn writes_linkage_artifact() {
        let mut set = example_set();
        let report = single_linkage(&mut set, 3).unwrap();

        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path(), RunName::new("demo".into()).unwrap()).unwrap();
        writer.write_linkage("single", &set, &report).unwrap();

        let content: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("demo_linkage.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(content["method"], "single");
        assert_eq!(content["initial_clusters"].as_u64().unwrap(), 4);
        assert_eq!(content["final_clusters"].as_u64().unwrap(), 3);
        assert_eq!(content["merges"].as_u64().unwrap(), 1);
        assert_eq!(content["labels"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn labeled_csv_round_trips() {
        let set = example_set();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_labeled_csv(&path, &set).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next().unwrap(), "f0,f1,cluster");
        assert_eq!(lines.next().unwrap(), "1,2,1");
        assert_eq!(written.lines().count(), 6);
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let writer =
            ResultWriter::new(&nested, RunName::new("run".into()).unwrap()).unwrap();
        writer.write_labeled(&example_set()).unwrap();
        assert!(nested.join("run_labeled.csv").exists());
    }
}
