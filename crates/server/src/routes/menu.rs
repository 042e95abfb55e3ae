//! Menu route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::{AppJson, MessageResponse};
use crate::error::Result;
use crate::services::MenuService;
use crate::state::AppState;

/// Menu replacement request.
///
/// A missing password is treated as a wrong one. `menu` is only validated
/// once the password matches.
#[derive(Deserialize)]
pub struct UpdateMenuRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub menu: Value,
}

/// List the menu.
///
/// GET /api/menu
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Value>>> {
    let menu = MenuService::new(state.store(), &state.config().admin_password)
        .get_all()
        .await?;
    Ok(Json(menu))
}

/// Replace the whole menu.
///
/// POST /api/update-menu
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    AppJson(request): AppJson<UpdateMenuRequest>,
) -> Result<Json<MessageResponse>> {
    MenuService::new(state.store(), &state.config().admin_password)
        .replace_all(request.menu, &request.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Menu updated successfully",
    }))
}
