// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Loads a CSV file into a RawTable using the csv crate.
//
// The csv crate handles quoting, escaping, and header parsing;
// this module only maps its records into owned string rows and
// reports problems with enough context to fix them.
//
// Rows whose cell count differs from the header are skipped
// with a warning rather than aborting the whole load — a single
// ragged line should not take down a training run over
// thousands of good rows.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::table::RawTable;
use crate::domain::traits::RowSource;

/// Loads one CSV file from disk.
/// Implements the RowSource trait from Layer 3.
pub struct CsvLoader {
    /// Path to the .csv file
    path: String,
}

impl CsvLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for CsvLoader {
    fn load(&self) -> Result<RawTable> {
        let path = Path::new(&self.path);
        let file = File::open(path)
            .with_context(|| format!("cannot open CSV file '{}'", self.path))?;

        // flexible(true): ragged rows reach the length check below
        // instead of aborting the whole read
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("cannot read header row of '{}'", self.path))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("malformed CSV record {} in '{}'", i + 2, self.path))?;

            if record.len() != headers.len() {
                tracing::warn!(
                    "skipping row {} of '{}': {} cells, expected {}",
                    i + 2,
                    self.path,
                    record.len(),
                    headers.len()
                );
                continue;
            }

            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        tracing::info!("Loaded {} rows x {} columns from '{}'", rows.len(), headers.len(), self.path);
        Ok(RawTable::new(headers, rows))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_csv(name: &str, content: &str) -> String {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_loads_headers_and_rows() {
        let path = write_temp_csv(
            "tip_predictor_loader_basic.csv",
            "total_bill,tip,smoker\n16.99,1.01,No\n10.34,1.66,Yes\n",
        );
        let table = CsvLoader::new(&path).load().unwrap();
        assert_eq!(table.headers, vec!["total_bill", "tip", "smoker"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1], vec!["10.34", "1.66", "Yes"]);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = CsvLoader::new("/no/such/file.csv").load().unwrap_err();
        assert!(err.to_string().contains("/no/such/file.csv"));
    }
}
