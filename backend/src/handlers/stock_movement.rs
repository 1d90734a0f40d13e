//! HTTP handlers for stock-movement endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::{require_role, CurrentUser};
use crate::services::stock_movement::{
    MovementListFilter, MovementReason, MovementType, RecordMovementInput, StockMovementDetail,
    StockMovementService,
};
use crate::AppState;
use shared::types::{PaginatedResponse, Pagination, UserRole};

/// Query parameters for the movement history listing
#[derive(Debug, Deserialize)]
pub struct ListMovementsQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub movement_type: Option<String>,
    pub reason: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListMovementsQuery {
    fn filter(&self) -> MovementListFilter {
        MovementListFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            movement_type: self.movement_type.as_deref().and_then(MovementType::parse),
            reason: self.reason.as_deref().and_then(MovementReason::parse),
            date_from: self.date_from,
            date_to: self.date_to,
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page.unwrap_or(1).max(1),
            per_page: self.limit.unwrap_or(50).clamp(1, 200),
        }
    }
}

/// List movements, newest first
pub async fn list_stock_movements(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListMovementsQuery>,
) -> AppResult<Json<PaginatedResponse<StockMovementDetail>>> {
    let service = StockMovementService::new(state.db);
    let page = service.list(&query.filter(), &query.pagination()).await?;
    Ok(Json(page))
}

/// Record a movement (admin and warehouse staff)
pub async fn record_stock_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<(StatusCode, Json<StockMovementDetail>)> {
    require_role(&current_user.0, &[UserRole::Admin, UserRole::Gudang])?;

    let service = StockMovementService::new(state.db);
    let movement = service.record(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}
