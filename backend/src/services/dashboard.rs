//! Dashboard statistics service

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::spare_part::{SparePart, SparePartWithStatus};

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// Stock and movement counters for the dashboard cards
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_parts: i64,
    pub critical_stock: i64,
    pub reorder_point: i64,
    /// Total inventory value: sum of `current_stock * price`.
    pub total_value: Decimal,
    pub today_in: i64,
    pub today_out: i64,
    /// The five lowest-stock parts at or below their reorder point.
    pub low_stock_items: Vec<SparePartWithStatus>,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Collect the dashboard counters from the current stock state
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let total_parts = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spare_parts WHERE is_active = TRUE",
        )
        .fetch_one(&self.db)
        .await?;

        let critical_stock = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spare_parts WHERE current_stock <= minimum_stock AND is_active = TRUE",
        )
        .fetch_one(&self.db)
        .await?;

        let reorder_point = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spare_parts WHERE current_stock <= rop AND is_active = TRUE",
        )
        .fetch_one(&self.db)
        .await?;

        let total_value = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(current_stock * price), 0) FROM spare_parts WHERE is_active = TRUE",
        )
        .fetch_one(&self.db)
        .await?;

        let today_in = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stock_movements WHERE movement_type = 'in' AND created_at::date = CURRENT_DATE",
        )
        .fetch_one(&self.db)
        .await?;

        let today_out = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stock_movements WHERE movement_type = 'out' AND created_at::date = CURRENT_DATE",
        )
        .fetch_one(&self.db)
        .await?;

        let low_stock_items = sqlx::query_as::<_, SparePart>(
            r#"
            SELECT id, code, name, category, brand, price, current_stock,
                   minimum_stock, lead_time, daily_demand, rop, location,
                   description, is_active, created_at, updated_at
            FROM spare_parts
            WHERE current_stock <= rop AND is_active = TRUE
            ORDER BY current_stock ASC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(DashboardStats {
            total_parts,
            critical_stock,
            reorder_point,
            total_value,
            today_in,
            today_out,
            low_stock_items: low_stock_items
                .into_iter()
                .map(SparePartWithStatus::from)
                .collect(),
        })
    }
}
