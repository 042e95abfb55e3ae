//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors and transactions)
//! 2. CORS
//! 3. `TraceLayer` (request span with an empty `request_id` field)
//! 4. Request ID (fills the span field, echoes the header)

pub mod request_id;

use axum::http::{Method, header::CONTENT_TYPE};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

use crate::config::ServerConfig;

/// Build the CORS layer; an empty origin list allows any origin.
#[must_use]
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = if config.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.allowed_origins.clone())
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}
