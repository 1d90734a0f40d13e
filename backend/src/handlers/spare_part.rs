//! HTTP handlers for spare-part catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require_role, CurrentUser};
use crate::services::spare_part::{
    DeleteOutcome, PartListFilter, SparePart, SparePartInput, SparePartService,
    SparePartWithStatus, StatusFilter,
};
use crate::AppState;
use shared::types::{PaginatedResponse, Pagination, UserRole};

/// Query parameters for the part listing
#[derive(Debug, Deserialize)]
pub struct ListPartsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListPartsQuery {
    fn filter(&self) -> PartListFilter {
        PartListFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            category: self
                .category
                .clone()
                .filter(|c| !c.is_empty() && c != "all"),
            status: self.status.as_deref().and_then(StatusFilter::parse),
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page.unwrap_or(1).max(1),
            per_page: self.limit.unwrap_or(50).clamp(1, 200),
        }
    }
}

/// List active parts with their stock status
pub async fn list_spare_parts(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListPartsQuery>,
) -> AppResult<Json<PaginatedResponse<SparePartWithStatus>>> {
    let service = SparePartService::new(state.db);
    let page = service.list(&query.filter(), &query.pagination()).await?;
    Ok(Json(page))
}

/// Get a single part
pub async fn get_spare_part(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(part_id): Path<Uuid>,
) -> AppResult<Json<SparePartWithStatus>> {
    let service = SparePartService::new(state.db);
    let part = service.get(part_id).await?;
    Ok(Json(SparePartWithStatus::from(part)))
}

/// Create a part (admin and warehouse staff)
pub async fn create_spare_part(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<SparePartInput>,
) -> AppResult<(StatusCode, Json<SparePart>)> {
    require_role(&current_user.0, &[UserRole::Admin, UserRole::Gudang])?;

    let service = SparePartService::new(state.db);
    let part = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(part)))
}

/// Update a part (admin and warehouse staff)
pub async fn update_spare_part(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(part_id): Path<Uuid>,
    Json(input): Json<SparePartInput>,
) -> AppResult<Json<SparePart>> {
    require_role(&current_user.0, &[UserRole::Admin, UserRole::Gudang])?;

    let service = SparePartService::new(state.db);
    let part = service.update(part_id, input).await?;
    Ok(Json(part))
}

/// Response for a delete request
#[derive(Debug, Serialize)]
pub struct DeletePartResponse {
    pub deleted: bool,
    /// True when the part had movement history and was only deactivated.
    pub soft_deleted: bool,
}

/// Delete a part (admin only)
pub async fn delete_spare_part(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(part_id): Path<Uuid>,
) -> AppResult<Json<DeletePartResponse>> {
    require_role(&current_user.0, &[UserRole::Admin])?;

    let service = SparePartService::new(state.db);
    let outcome = service.delete(part_id).await?;
    Ok(Json(DeletePartResponse {
        deleted: true,
        soft_deleted: outcome == DeleteOutcome::SoftDeleted,
    }))
}
