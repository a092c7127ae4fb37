// ============================================================
// Layer 4 — Table Encoder
// ============================================================
// Turns a RawTable of strings into the numeric matrices the
// trainer fits on:
//
//   1. Assert every required column (features + target) exists
//      — all missing names are reported in one error.
//   2. Drop rows with a missing (blank) value in any required
//      column, counting what was dropped.
//   3. Encode every surviving cell through the domain encoding
//      table. An unencodable categorical token here is an error:
//      training data is supposed to be clean, and silently
//      skipping bad rows would hide a data problem.
//
// Post-condition: every cell of the returned feature matrix and
// target vector is a finite f64 in the schema's feature order.
//
// Reference: Rust Book §9 (Error Handling)
//            ndarray crate documentation

use anyhow::{bail, Result};
use ndarray::{Array1, Array2};

use crate::domain::schema::{encode_value, FeatureSchema};
use crate::domain::table::RawTable;

/// The fully numeric training data produced from a RawTable.
#[derive(Debug)]
pub struct EncodedTable {
    /// One row per surviving table row, columns in schema order
    pub features: Array2<f64>,
    /// Target value per surviving row
    pub target: Array1<f64>,
    /// Rows removed by the missing-value filter
    pub dropped_rows: usize,
}

/// Encode a raw table against the schema.
///
/// Fails on missing columns and on unencodable values in
/// surviving rows — the trainer treats both as fatal.
pub fn encode_table(table: &RawTable, schema: &FeatureSchema) -> Result<EncodedTable> {
    // ── Step 1: Required columns ──────────────────────────────────────────────
    let required = schema.required_columns();
    let missing = table.missing_columns(&required);
    if !missing.is_empty() {
        bail!("missing columns in CSV: {}", missing.join(", "));
    }

    // Column index per required column, in feature order + target last.
    // Lookup cannot fail after the check above.
    let feature_idx: Vec<usize> = schema
        .features
        .iter()
        .map(|f| table.column_index(f).unwrap())
        .collect();
    let target_idx = table.column_index(&schema.target).unwrap();

    // ── Step 2 + 3: Filter and encode ─────────────────────────────────────────
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(table.row_count());
    let mut target: Vec<f64> = Vec::with_capacity(table.row_count());
    let mut dropped_rows = 0usize;

    for (row_no, row) in table.rows.iter().enumerate() {
        // Missing value in any required column → drop the row
        let has_blank = feature_idx
            .iter()
            .chain(std::iter::once(&target_idx))
            .any(|&i| row[i].trim().is_empty());
        if has_blank {
            dropped_rows += 1;
            continue;
        }

        let mut encoded = Vec::with_capacity(feature_idx.len());
        for (&col, name) in feature_idx.iter().zip(schema.features.iter()) {
            let value = encode_value(name, &row[col])
                .map_err(|e| anyhow::anyhow!("row {}: {}", row_no + 2, e))?;
            encoded.push(value);
        }
        let y = encode_value(&schema.target, &row[target_idx])
            .map_err(|e| anyhow::anyhow!("row {}: {}", row_no + 2, e))?;

        rows.push(encoded);
        target.push(y);
    }

    if dropped_rows > 0 {
        tracing::warn!("Dropped {} rows with missing values", dropped_rows);
    }
    if rows.is_empty() {
        bail!("no usable rows left after dropping rows with missing values");
    }

    // ── Assemble matrices ─────────────────────────────────────────────────────
    let n_rows = rows.len();
    let n_cols = schema.features.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let features = Array2::from_shape_vec((n_rows, n_cols), flat)?;
    let target = Array1::from_vec(target);

    Ok(EncodedTable { features, target, dropped_rows })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema {
            features: vec!["total_bill".into(), "smoker".into()],
            target:   "tip".into(),
        }
    }

    fn table(rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::new(
            vec!["total_bill".into(), "smoker".into(), "tip".into()],
            rows.into_iter()
                .map(|r| r.into_iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_encodes_in_schema_order() {
        let t = table(vec![vec!["10.0", "Yes", "2.0"], vec!["20.0", "no", "3.5"]]);
        let enc = encode_table(&t, &schema()).unwrap();
        assert_eq!(enc.features.shape(), &[2, 2]);
        assert_eq!(enc.features[[0, 0]], 10.0);
        assert_eq!(enc.features[[0, 1]], 1.0); // Yes → 1.0
        assert_eq!(enc.features[[1, 1]], 0.0); // no → 0.0
        assert_eq!(enc.target.to_vec(), vec![2.0, 3.5]);
        assert_eq!(enc.dropped_rows, 0);
    }

    #[test]
    fn test_every_cell_numeric_and_finite() {
        let t = table(vec![vec!["10.0", "Y", "2.0"], vec!["20.0", "N", "3.5"]]);
        let enc = encode_table(&t, &schema()).unwrap();
        assert!(enc.features.iter().all(|v| v.is_finite()));
        assert!(enc.target.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_drops_rows_with_missing_values() {
        let t = table(vec![
            vec!["10.0", "Yes", "2.0"],
            vec!["", "No", "3.0"],      // blank feature
            vec!["12.0", "Yes", "  "],  // blank target
        ]);
        let enc = encode_table(&t, &schema()).unwrap();
        assert_eq!(enc.features.nrows(), 1);
        assert_eq!(enc.dropped_rows, 2);
    }

    #[test]
    fn test_missing_columns_listed_together() {
        let t = RawTable::new(vec!["total_bill".into()], vec![]);
        let err = encode_table(&t, &schema()).unwrap_err().to_string();
        assert!(err.contains("smoker"));
        assert!(err.contains("tip"));
    }

    #[test]
    fn test_unencodable_token_is_fatal() {
        let t = table(vec![vec!["10.0", "Maybe", "2.0"]]);
        let err = encode_table(&t, &schema()).unwrap_err().to_string();
        assert!(err.contains("smoker"));
        assert!(err.contains("Maybe"));
    }

    #[test]
    fn test_all_rows_missing_is_an_error() {
        let t = table(vec![vec!["", "Yes", "2.0"]]);
        assert!(encode_table(&t, &schema()).is_err());
    }
}
