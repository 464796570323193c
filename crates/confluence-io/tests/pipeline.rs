//! End-to-end integration tests: CSV -> linkage -> JSON/CSV -> re-read.

use std::fs;
use std::path::Path;

use confluence_io::{ResultWriter, RunName, TableReader};
use confluence_linkage::single_linkage;
use tempfile::TempDir;

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn linkage_round_trip() {
    // 1. Read CSV
    let mut set = TableReader::new(&fixture_path("valid_5x2.csv"))
        .read()
        .expect("fixture should parse");
    assert_eq!(set.len(), 5);
    assert_eq!(set.dim(), 2);
    assert_eq!(set.distinct_labels().len(), 4);

    // 2. Merge down to 3 clusters: the closest pair is 2={(4,3)} and
    //    4={(4,4)} at distance 1.0.
    let report = single_linkage(&mut set, 3).unwrap();
    assert_eq!(report.merges(), 1);
    assert_eq!(set.labels(), &[1.0, 1.0, 3.0, 2.0, 2.0]);

    // 3. Write both artifacts
    let dir = TempDir::new().unwrap();
    let run = RunName::new("pipeline_rt".into()).unwrap();
    let writer = ResultWriter::new(dir.path(), run).unwrap();
    writer.write_linkage("single", &set, &report).unwrap();
    writer.write_labeled(&set).unwrap();

    // 4. Deserialize the JSON artifact and verify
    let json_path = dir.path().join("pipeline_rt_linkage.json");
    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();

    assert_eq!(content["run"], "pipeline_rt");
    assert_eq!(content["method"], "single");
    assert_eq!(content["n_points"].as_u64().unwrap(), 5);
    assert_eq!(content["initial_clusters"].as_u64().unwrap(), 4);
    assert_eq!(content["final_clusters"].as_u64().unwrap(), 3);

    let steps = content["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["kept"].as_f64().unwrap(), 2.0);
    assert_eq!(steps[0]["absorbed"].as_f64().unwrap(), 4.0);
    assert!((steps[0]["distance"].as_f64().unwrap() - 1.0).abs() < 1e-12);

    let sizes = content["cluster_sizes"].as_array().unwrap();
    assert_eq!(sizes.len(), 3);

    // 5. Re-read the labeled CSV and verify the output contract: same table
    //    shape, feature columns unchanged, label column mutated.
    let reread = TableReader::new(&dir.path().join("pipeline_rt_labeled.csv"))
        .read()
        .unwrap();
    assert_eq!(reread, set);
}

#[test]
fn rejected_input_survives_round_trip_unchanged() {
    let mut set = TableReader::new(&fixture_path("valid_5x2.csv"))
        .read()
        .unwrap();
    let before = set.clone();

    // 4 clusters exist; asking for 9 is rejected and nothing is mutated.
    assert!(single_linkage(&mut set, 9).is_err());
    assert_eq!(set, before);

    let dir = TempDir::new().unwrap();
    let run = RunName::new("rejected".into()).unwrap();
    let writer = ResultWriter::new(dir.path(), run).unwrap();
    writer.write_labeled(&set).unwrap();

    let reread = TableReader::new(&dir.path().join("rejected_labeled.csv"))
        .read()
        .unwrap();
    assert_eq!(reread, before);
}
