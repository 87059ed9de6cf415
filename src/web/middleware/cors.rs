//! CORS middleware configuration.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Parse a configured origin. `*` is not a valid list entry.
pub fn parse_origin(origin: &str) -> Option<HeaderValue> {
    if origin.trim() == "*" {
        return None;
    }
    origin.parse().ok()
}

/// Create a CORS layer from configuration.
///
/// An empty origin list allows any origin. Invalid entries are skipped; if
/// none is left, no cross-origin request is allowed.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match parse_origin(o) {
            Some(origin) => Some(origin),
            None => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any)
    } else if parsed_origins.is_empty() {
        tracing::error!(
            configured = origins.len(),
            "No valid CORS origin configured, denying cross-origin requests"
        );
        CorsLayer::new().allow_methods(methods)
    } else {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE, ACCEPT])
            .allow_origin(parsed_origins)
    }
}
