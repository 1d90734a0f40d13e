//! Public read-only stock endpoint
//!
//! No authentication: this backs the stock board customers can see.

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::spare_part::PublicStock;
use crate::services::SparePartService;
use crate::AppState;

/// Public stock listing with low-stock counters
pub async fn get_public_stock(State(state): State<AppState>) -> AppResult<Json<PublicStock>> {
    let service = SparePartService::new(state.db);
    let stock = service.public_stock().await?;
    Ok(Json(stock))
}
