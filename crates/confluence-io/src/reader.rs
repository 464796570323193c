//! CSV table reader with full input validation.

use std::path::{Path, PathBuf};

use confluence_geom::LabeledSet;
use tracing::{debug, info, instrument};

use crate::IoError;

/// Reads a labeled point table from a CSV file.
///
/// Expected CSV format:
/// - Header row required; column names are free-form.
/// - Every column is numeric; all columns except the last are feature
///   coordinates, the last column is the cluster label.
/// - One row per point, all rows with the same number of columns.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::TooFewColumns`] | Header has fewer than two columns |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonNumericValue`] | Cell is NaN, Inf, or unparseable float |
pub struct TableReader {
    path: PathBuf,
}

impl TableReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`LabeledSet`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<LabeledSet, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) allows rows with varying column counts so that our
        // own InconsistentRowLength check fires instead of a low-level
        // CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        let expected_cols = header.len();
        debug!(expected_cols, "read CSV header");

        if expected_cols < 2 {
            return Err(IoError::TooFewColumns {
                path: self.path.clone(),
                got: expected_cols,
            });
        }

        let mut rows: Vec<Vec<f64>> = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let mut row = Vec::with_capacity(expected_cols);
            for (col_index, raw) in record.iter().enumerate() {
                let value: f64 = raw.parse().map_err(|_| IoError::NonNumericValue {
                    path: self.path.clone(),
                    row_index,
                    col_index,
                    raw: raw.to_string(),
                })?;
                if !value.is_finite() {
                    return Err(IoError::NonNumericValue {
                        path: self.path.clone(),
                        row_index,
                        col_index,
                        raw: raw.to_string(),
                    });
                }
                row.push(value);
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        // Row widths and finiteness are already validated above, so this
        // should not fail, but handle gracefully.
        let set = LabeledSet::from_rows(rows).map_err(|_| IoError::EmptyDataset {
            path: self.path.clone(),
        })?;

        info!(
            n_points = set.len(),
            dims = set.dim(),
            n_clusters = set.distinct_labels().len(),
            "table loaded"
        );

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::TableReader;
    use crate::IoError;

    fn reader_for(contents: &str) -> (NamedTempFile, TableReader) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let reader = TableReader::new(file.path());
        (file, reader)
    }

    #[test]
    fn reads_valid_table() {
        let (_file, reader) = reader_for("x0,x1,cluster\n1,2,1\n1,4,1\n1,0,3\n4,3,2\n4,4,4\n");
        let set = reader.read().unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(set.dim(), 2);
        assert_eq!(set.labels(), &[1.0, 1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn missing_file() {
        let reader = TableReader::new(std::path::Path::new("/nonexistent/table.csv"));
        assert!(matches!(reader.read(), Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn header_only_is_empty() {
        let (_file, reader) = reader_for("x0,cluster\n");
        assert!(matches!(reader.read(), Err(IoError::EmptyDataset { .. })));
    }

    #[test]
    fn single_column_rejected() {
        let (_file, reader) = reader_for("cluster\n1\n2\n");
        assert!(matches!(
            reader.read(),
            Err(IoError::TooFewColumns { got: 1, .. })
        ));
    }

    #[test]
    fn ragged_row_rejected() {
        let (_file, reader) = reader_for("x0,x1,cluster\n1,2,1\n3,4\n");
        assert!(matches!(
            reader.read(),
            Err(IoError::InconsistentRowLength { row_index: 1, expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn non_numeric_cell_rejected() {
        let (_file, reader) = reader_for("x0,x1,cluster\n1,abc,1\n");
        assert!(matches!(
            reader.read(),
            Err(IoError::NonNumericValue { row_index: 0, col_index: 1, .. })
        ));
    }

    #[test]
    fn non_finite_cell_rejected() {
        let (_file, reader) = reader_for("x0,x1,cluster\n1,inf,1\n");
        assert!(matches!(
            reader.read(),
            Err(IoError::NonNumericValue { row_index: 0, col_index: 1, .. })
        ));
    }

    #[test]
    fn fractional_labels_pass_through() {
        // Label integrality is the clustering validator's concern, not the
        // reader's: a parseable fractional label must survive the round trip.
        let (_file, reader) = reader_for("x0,cluster\n1,1.5\n2,2\n");
        let set = reader.read().unwrap();
        assert_eq!(set.labels(), &[1.5, 2.0]);
    }
}
