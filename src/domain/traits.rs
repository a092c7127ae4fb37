// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - CsvLoader implements RowSource
//   - A future ParquetLoader could also implement RowSource
//   - The application layer only sees RowSource
//     and works with both without any changes
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::table::RawTable;

// ─── RowSource ────────────────────────────────────────────────────────────────
/// Any component that can load a raw table of training rows.
///
/// Implementations:
///   - CsvLoader → loads from a CSV file on disk
pub trait RowSource {
    /// Load the full table from this source.
    fn load(&self) -> Result<RawTable>;
}

// ─── Predictor ────────────────────────────────────────────────────────────────
/// Any component that can turn an ordered numeric feature row
/// into a scalar prediction.
///
/// Implementations:
///   - RegressionPipeline → scale + ordinary least squares
pub trait Predictor {
    fn predict_row(&self, row: &[f64]) -> f64;
}

impl Predictor for crate::domain::bundle::RegressionPipeline {
    fn predict_row(&self, row: &[f64]) -> f64 {
        self.predict(row)
    }
}
