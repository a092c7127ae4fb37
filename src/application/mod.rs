// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training a model or serving predictions).
//
// Rules for this layer:
//   - No fitting math here (that's Layer 5)
//   - No HTML or HTTP here (that's Layer 1 / the web layer)
//   - No direct file parsing (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// The form-to-prediction workflow
pub mod predict_use_case;
