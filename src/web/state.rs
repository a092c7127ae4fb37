// ============================================================
// Layer 1 — Server State
// ============================================================
// The bundle is loaded exactly once at startup and shared
// read-only with every request handler. There is no other
// cross-request state — axum clones this struct per handler,
// which is just an Arc bump.
//
// Reference: axum documentation (State extractor)

use std::sync::Arc;

use crate::application::predict_use_case::PredictUseCase;

#[derive(Clone)]
pub struct AppState {
    /// The loaded bundle wrapped in the predict use case.
    /// Immutable for the process lifetime.
    pub predictor: Arc<PredictUseCase>,
}

impl AppState {
    pub fn new(predictor: PredictUseCase) -> Self {
        Self { predictor: Arc::new(predictor) }
    }
}
