//! HTTP handler for the purchasing need-analysis report

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::NeedAnalysisService;
use crate::AppState;
use shared::stock::{NeedAnalysis, NeedFilters, PurchasePriority};

/// Query parameters for the need-analysis report
#[derive(Debug, Deserialize)]
pub struct NeedAnalysisQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

impl NeedAnalysisQuery {
    fn filters(&self) -> NeedFilters {
        NeedFilters {
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
            priority: self.priority.as_deref().and_then(PurchasePriority::parse),
        }
    }
}

/// Build the need-analysis report for the purchasing view
pub async fn get_need_analysis(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<NeedAnalysisQuery>,
) -> AppResult<Json<NeedAnalysis>> {
    let service = NeedAnalysisService::new(state.db);
    let report = service.report(&query.filters()).await?;
    Ok(Json(report))
}
