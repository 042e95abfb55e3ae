//! CSV export route handlers.
//!
//! Empty collections answer `200 text/plain` with a "No ... to export."
//! sentence instead of an empty CSV.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tiffin_core::Collection;
use tracing::instrument;

use crate::error::Result;
use crate::export::{Export, export_collection, file_name};
use crate::services::{CustomerService, SubmissionService};
use crate::state::AppState;

/// Export orders.
///
/// GET /api/export-orders
#[instrument(skip(state))]
pub async fn orders(State(state): State<AppState>) -> Result<Response> {
    let records = SubmissionService::orders(state.store()).get_all().await?;
    respond(Collection::Orders, &records)
}

/// Export reservations.
///
/// GET /api/export-reservations
#[instrument(skip(state))]
pub async fn reservations(State(state): State<AppState>) -> Result<Response> {
    let records = SubmissionService::reservations(state.store())
        .get_all()
        .await?;
    respond(Collection::Reservations, &records)
}

/// Export customers.
///
/// GET /api/export-customers
#[instrument(skip(state))]
pub async fn customers(State(state): State<AppState>) -> Result<Response> {
    let records = CustomerService::new(state.store()).get_all().await?;
    respond(Collection::Customers, &records)
}

fn respond<T: Serialize>(collection: Collection, records: &[T]) -> Result<Response> {
    let response = match export_collection(collection, records)? {
        Export::Csv(csv) => {
            tracing::info!(%collection, rows = records.len(), "Exported collection");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name(collection)),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Export::Empty(message) => (StatusCode::OK, message).into_response(),
    };
    Ok(response)
}
