// ============================================================
// Layer 5 — ML Layer (linfa)
// ============================================================
// This layer contains ALL linfa / ndarray fitting code.
// No other layer imports from linfa directly — only this one.
//
// Why isolate the fitting code here?
//   - If linfa's API changes, we only update this layer
//   - The fitted pipeline is exported as plain parameter
//     structs (Layer 3), so the server and its tests never
//     need a fitting backend at all
//
// What's in this layer:
//
//   trainer.rs — Fits the standardize-then-OLS pipeline,
//                computes held-out R² and seeded k-fold
//                cross-validated R², extracts the fitted
//                parameters into domain structs
//
//   metrics.rs — The R² (coefficient of determination) score
//
// Reference: linfa / linfa-linear crate documentation

/// Pipeline fitting and cross-validation
pub mod trainer;

/// Regression evaluation metrics
pub mod metrics;
