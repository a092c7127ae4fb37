// ============================================================
// Layer 1 — Server Bootstrap
// ============================================================
// Builds the router and runs the listener. The bundle has
// already been loaded by the CLI layer — by the time we get
// here, a missing or corrupt bundle has already failed the
// process, so every request can assume a valid model.
//
// Reference: axum documentation (Router, serve)

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;

use crate::application::predict_use_case::PredictUseCase;
use crate::domain::bundle::ModelBundle;
use crate::web::handlers::{form_page, predict_page};
use crate::web::state::AppState;

/// Build the application router over the loaded bundle.
pub fn router(bundle: ModelBundle) -> Router {
    let state = AppState::new(PredictUseCase::new(bundle));
    Router::new()
        .route("/", get(form_page))
        .route("/predict", post(predict_page))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(addr: SocketAddr, bundle: ModelBundle) -> Result<()> {
    let app = router(bundle);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind to {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;
    Ok(())
}
