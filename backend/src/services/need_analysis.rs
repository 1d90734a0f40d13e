//! Purchasing need-analysis service
//!
//! Loads one snapshot of the active parts (with their trailing-30-day
//! demand averages) and hands it to the shared engine. All formulas live
//! in `shared::stock`; this service only fetches.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use shared::stock::{self, NeedAnalysis, NeedFilters, PartSnapshot};

/// Need-analysis service
#[derive(Clone)]
pub struct NeedAnalysisService {
    db: PgPool,
}

/// One part row with its demand-log average attached
#[derive(Debug, FromRow)]
struct SnapshotRow {
    id: Uuid,
    code: String,
    name: String,
    category: String,
    brand: Option<String>,
    current_stock: i32,
    minimum_stock: i32,
    rop: i32,
    price: Decimal,
    location: Option<String>,
    daily_demand: Decimal,
    lead_time: i32,
    recent_avg_demand: Option<Decimal>,
}

impl From<SnapshotRow> for PartSnapshot {
    fn from(row: SnapshotRow) -> Self {
        PartSnapshot {
            id: row.id,
            code: row.code,
            name: row.name,
            category: row.category,
            brand: row.brand,
            current_stock: row.current_stock,
            minimum_stock: row.minimum_stock,
            rop: row.rop,
            price: row.price,
            location: row.location,
            daily_demand: row.daily_demand,
            lead_time: row.lead_time,
            recent_avg_demand: row.recent_avg_demand,
        }
    }
}

impl NeedAnalysisService {
    /// Create a new NeedAnalysisService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build the need-analysis report for the current stock snapshot
    pub async fn report(&self, filters: &NeedFilters) -> AppResult<NeedAnalysis> {
        let rows = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT sp.id, sp.code, sp.name, sp.category, sp.brand,
                   sp.current_stock, sp.minimum_stock, sp.rop, sp.price,
                   sp.location, sp.daily_demand, sp.lead_time,
                   (SELECT AVG(ddl.quantity)
                    FROM daily_demand_logs ddl
                    WHERE ddl.spare_part_id = sp.id
                      AND ddl.log_date >= CURRENT_DATE - INTERVAL '30 days'
                   ) AS recent_avg_demand
            FROM spare_parts sp
            WHERE sp.is_active = TRUE
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let parts: Vec<PartSnapshot> = rows.into_iter().map(PartSnapshot::from).collect();

        Ok(stock::compute_need_analysis(&parts, filters))
    }
}
