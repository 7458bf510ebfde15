use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};

use crate::{state::ApiState, topico};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(topico::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Ready once the store answers
async fn readiness(State(state): State<ApiState>) -> StatusCode {
    match state.topicos.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
