// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   bundle_store.rs — Saving and loading the model bundle.
//                     Serializes the whole ModelBundle
//                     (pipeline parameters, feature order,
//                     target name, metrics) to one pretty-
//                     printed JSON file, and loads it back
//                     with a consistency check.
//
// Why is this a separate layer?
//   The trainer writes the bundle and the server reads it;
//   keeping the file format in one place guarantees the two
//   sides never drift apart.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            serde_json documentation

/// Model bundle saving and loading
pub mod bundle_store;
