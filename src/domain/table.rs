// ============================================================
// Layer 3 — Raw Table Domain Type
// ============================================================
// Represents a tabular dataset exactly as loaded from disk:
// a header row plus rows of string cells. Nothing has been
// validated or encoded yet — that happens in the data layer.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A raw table of string cells.
/// By the time a RawTable exists, the CSV quoting/escaping has
/// already been dealt with by the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    /// Column names, in file order
    pub headers: Vec<String>,
    /// One Vec<String> per data row, same length as `headers`
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by header name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Which of the given columns are absent from this table.
    /// Returns all of them at once so the trainer can report the
    /// complete list in a single error.
    pub fn missing_columns(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|c| self.column_index(c).is_none())
            .cloned()
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        RawTable::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()]],
        )
    }

    #[test]
    fn test_column_index() {
        let t = sample();
        assert_eq!(t.column_index("b"), Some(1));
        assert_eq!(t.column_index("c"), None);
    }

    #[test]
    fn test_missing_columns_reports_all() {
        let t = sample();
        let required = vec!["a".to_string(), "x".to_string(), "y".to_string()];
        assert_eq!(t.missing_columns(&required), vec!["x", "y"]);
    }
}
