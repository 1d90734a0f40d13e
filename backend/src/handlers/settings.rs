//! HTTP handlers for system settings endpoints (admin only)

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::{require_role, CurrentUser};
use crate::services::settings::{SystemSettings, UpdateSettingsInput};
use crate::services::SettingsService;
use crate::AppState;
use shared::types::UserRole;

/// Read the system settings
pub async fn get_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<SystemSettings>> {
    require_role(&current_user.0, &[UserRole::Admin])?;

    let service = SettingsService::new(state.db);
    let settings = service.get().await?;
    Ok(Json(settings))
}

/// Update the system settings
pub async fn update_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UpdateSettingsInput>,
) -> AppResult<Json<SystemSettings>> {
    require_role(&current_user.0, &[UserRole::Admin])?;

    let service = SettingsService::new(state.db);
    let settings = service.update(input).await?;
    Ok(Json(settings))
}
