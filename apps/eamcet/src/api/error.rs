use crate::store::StoreError;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eamcet_core::ValidationError;
use thiserror::Error;
use tracing::error;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected input; the message goes to the client as-is.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body could not be read as a urlencoded form.
    #[error(transparent)]
    Form(#[from] FormRejection),

    /// Store failure; details are logged, not returned.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            Self::Form(e) => (StatusCode::BAD_REQUEST, e.body_text()).into_response(),
            Self::Store(e) => {
                error!(error = %e, "cutoff query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Query Failed").into_response()
            }
        }
    }
}
