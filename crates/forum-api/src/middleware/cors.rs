use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::request_id::REQUEST_ID_HEADER;

/// Creates the CORS layer for browser clients of the forum API
///
/// Allows the verbs the topic routes answer to, lets callers send
/// `Accept-Language` for localized validation messages and exposes `Location`
/// so a client can follow the URI of a newly created topic. No cookies are used,
/// so credentials stay disabled.
pub fn create_cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let origins = allowed_origins
        .into_iter()
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
        ])
        .expose_headers([
            header::LOCATION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}
