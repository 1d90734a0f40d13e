//! HTTP handler for the dashboard statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::dashboard::DashboardStats;
use crate::services::{DashboardService, NotificationService};
use crate::AppState;

/// Dashboard payload: stock counters plus the caller's unread badge
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub unread_notifications: u64,
}

/// Collect dashboard statistics
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<DashboardResponse>> {
    let stats = DashboardService::new(state.db.clone()).stats().await?;
    let notification_stats = NotificationService::new(state.db)
        .counts(current_user.0.user_id)
        .await?;

    Ok(Json(DashboardResponse {
        stats,
        unread_notifications: notification_stats.unread,
    }))
}
