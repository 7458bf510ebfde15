use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use forum_db::StoreError;
use serde_json::json;
use thiserror::Error;

use crate::validation::ErroDeFormularioDto;

/// Every failure a handler can return; converted into the wire format at the handler boundary
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<ErroDeFormularioDto>),
    #[error("Resource not found")]
    NotFound,
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(erros) => (StatusCode::BAD_REQUEST, Json(erros)).into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::BadRequest(message) => {
                tracing::debug!("Rejected request body: {message}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
            Self::Store(e) => {
                // Storage details stay in the logs
                tracing::error!("Store failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
