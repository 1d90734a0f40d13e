//! Authentication handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::services::auth::LoginOutcome;
use crate::services::AuthService;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginOutcome>> {
    body.validate()?;

    let service = AuthService::new(state.db.clone(), &state.config);
    let outcome = service.login(&body.username, &body.password).await?;

    Ok(Json(outcome))
}
