// ============================================================
// Layer 1 — Web / Presentation Layer
// ============================================================
// The browser-facing half of the presentation layer (the CLI
// is the other half). Built on axum:
//
//   GET  /         → the input form, one field per bundle
//                    feature (dropdowns for categoricals)
//   POST /predict  → encodes the posted fields and renders
//                    the prediction + stored metrics
//
// All business logic is delegated to Layer 2 (application);
// handlers only translate between HTTP and the use case.
//
// A failed validation re-renders the form with the message and
// the user's values intact — bad input never takes the
// process down.
//
// Reference: axum crate documentation

/// Read-only shared state (the loaded bundle)
pub mod state;

/// Request handlers and HTML rendering
pub mod handlers;

/// Router construction and listener bootstrap
pub mod server;
