//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Data directory is writable
//!
//! # Public API
//! GET  /api/menu                 - Menu items
//! POST /api/signup               - Customer signup
//! POST /api/orders               - Place an order
//! POST /api/reservations         - Make a reservation
//!
//! # Admin API
//! POST /api/update-menu          - Replace the menu ({password, menu})
//! GET  /api/customers            - Customer list
//! GET  /api/export-orders        - Orders as CSV
//! GET  /api/export-reservations  - Reservations as CSV
//! GET  /api/export-customers     - Customers as CSV
//! ```

pub mod customers;
pub mod export;
pub mod health;
pub mod menu;
pub mod submissions;

use axum::{
    Router,
    body::Body,
    extract::FromRequest,
    http::Request,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::{cors_layer, request_id_middleware};
use crate::state::AppState;

/// JSON body extractor whose rejections become [`AppError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Body of responses that only carry a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/menu", get(menu::index))
        .route("/update-menu", post(menu::update))
        .route("/signup", post(customers::signup))
        .route("/customers", get(customers::index))
        .route("/orders", post(submissions::create_order))
        .route("/reservations", post(submissions::create_reservation))
        .route("/export-orders", get(export::orders))
        .route("/export-reservations", get(export::reservations))
        .route("/export-customers", get(export::customers))
}

/// Build the full application with middleware and state applied.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .nest("/health", health::routes())
        .nest("/api", api_routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(cors)
        .with_state(state)
}
