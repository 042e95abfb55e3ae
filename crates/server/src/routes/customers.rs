//! Customer route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tiffin_core::{Customer, NewCustomer};
use tracing::instrument;

use super::AppJson;
use crate::error::Result;
use crate::services::CustomerService;
use crate::state::AppState;

/// Response for a successful signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub customer: Customer,
}

/// Sign up a new customer.
///
/// POST /api/signup
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(new): AppJson<NewCustomer>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let customer = CustomerService::new(state.store()).sign_up(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Signup successful",
            customer,
        }),
    ))
}

/// List every customer as stored.
///
/// GET /api/customers
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Value>>> {
    let customers = CustomerService::new(state.store()).get_all().await?;
    Ok(Json(customers))
}
