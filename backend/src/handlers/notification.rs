//! HTTP handlers for stock notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::notification::{NotificationFeed, NotificationStats};
use crate::services::NotificationService;
use crate::AppState;

/// Current notifications for the logged-in user
pub async fn get_notifications(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<NotificationFeed>> {
    let service = NotificationService::new(state.db);
    let feed = service.feed(current_user.0.user_id).await?;
    Ok(Json(feed))
}

/// Notification counters for the badge
pub async fn get_notification_count(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<NotificationStats>> {
    let service = NotificationService::new(state.db);
    let stats = service.counts(current_user.0.user_id).await?;
    Ok(Json(stats))
}

/// Mark one notification as read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(notification_key): Path<String>,
) -> AppResult<Json<()>> {
    let service = NotificationService::new(state.db);
    service
        .mark_read(current_user.0.user_id, &notification_key)
        .await?;
    Ok(Json(()))
}

/// Mark-all-read response
#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_count: u64,
}

/// Mark every current notification as read
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.db);
    let marked_count = service.mark_all_read(current_user.0.user_id).await?;
    Ok(Json(MarkAllReadResponse { marked_count }))
}
