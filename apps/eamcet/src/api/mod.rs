//! # HTTP API
//!
//! ```text
//! POST /predict   form fields -> JSON rows | 400 text
//! GET  /options   allow-lists with labels
//! GET  /health    liveness + store kind
//! ```

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::HealthResponse;

use crate::store::Store;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(store: impl Into<Store>) -> Self {
        Self {
            store: Arc::new(store.into()),
            cors_origins: Vec::new(),
        }
    }

    /// Allow browser calls from these origins (`*` allows any).
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    let router = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/options", get(handlers::options))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);
    if origins.iter().any(|o| o == "*") {
        return Some(layer.allow_origin(Any).allow_headers(Any));
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if values.is_empty() {
        return None;
    }
    Some(layer.allow_origin(AllowOrigin::list(values)))
}
