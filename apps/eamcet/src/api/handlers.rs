use super::{ApiError, AppState};
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::{Form, Json};
use eamcet_core::{catalog, Catalog, CutoffRow, PredictForm};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Health check payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

pub(super) async fn predict(
    State(state): State<AppState>,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Result<Json<Vec<CutoffRow>>, ApiError> {
    let Form(form) = form.inspect_err(|e| {
        debug!(status = %e.status(), reason = %e.body_text(), "unreadable predict form");
    })?;
    let query = form.validate().inspect_err(|e| {
        debug!(field = e.field(), reason = %e, "rejected predict form");
    })?;

    let rows = state.store.fetch(&query).await?;
    info!(
        phase = %query.phase,
        category = %query.category,
        branch = %query.branch,
        rows = rows.len(),
        "predict served"
    );
    Ok(Json(rows))
}

pub(super) async fn options() -> Json<Catalog> {
    Json(catalog())
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store.kind().to_string(),
    })
}
