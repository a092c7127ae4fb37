// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw CSV file all the
// way to the numeric matrices the trainer fits on.
//
// The pipeline flows in this order:
//
//   tips.csv
//       │
//       ▼
//   CsvLoader         → reads the file, yields RawTable
//       │
//       ▼
//   encoder           → checks required columns, drops rows
//                       with missing values, encodes
//                       categoricals via the domain table
//       │
//       ▼
//   splitter          → deterministic train/test index split
//       │
//       ▼
//   ml::trainer       → fits the scale+regress pipeline
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads CSV files into RawTable using the csv crate
pub mod loader;

/// Turns a RawTable into numeric feature/target matrices
pub mod encoder;

/// Seeded train/test index splitting
pub mod splitter;
