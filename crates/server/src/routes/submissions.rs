//! Order and reservation route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

use super::AppJson;
use crate::error::Result;
use crate::services::SubmissionService;
use crate::state::AppState;

/// Response for a placed order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub message: &'static str,
    pub order: Value,
}

/// Response for a made reservation.
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub message: &'static str,
    pub reservation: Value,
}

/// Place an order. Any JSON object is accepted.
///
/// POST /api/orders
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(fields): AppJson<Map<String, Value>>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let order = SubmissionService::orders(state.store()).submit(fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            message: "Order placed successfully",
            order,
        }),
    ))
}

/// Make a reservation. Any JSON object is accepted.
///
/// POST /api/reservations
#[instrument(skip_all)]
pub async fn create_reservation(
    State(state): State<AppState>,
    AppJson(fields): AppJson<Map<String, Value>>,
) -> Result<(StatusCode, Json<ReservationResponse>)> {
    let reservation = SubmissionService::reservations(state.store())
        .submit(fields)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse {
            message: "Reservation made successfully",
            reservation,
        }),
    ))
}
