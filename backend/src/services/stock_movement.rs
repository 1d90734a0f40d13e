//! Stock-movement service for recording inbound/outbound stock
//!
//! Recording is the only write path for `current_stock`: the movement row
//! and the stock adjustment happen in one transaction with the part row
//! locked, so a concurrent movement cannot base its availability check on
//! a stale count.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation;

/// Stock-movement service
#[derive(Clone)]
pub struct StockMovementService {
    db: PgPool,
}

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "movement_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
}

impl MovementType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in" => Some(MovementType::In),
            "out" => Some(MovementType::Out),
            _ => None,
        }
    }
}

/// Why stock moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "movement_reason", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementReason {
    Purchase,
    Service,
    Correction,
    Damaged,
    Lost,
    Return,
}

impl MovementReason {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "purchase" => Some(MovementReason::Purchase),
            "service" => Some(MovementReason::Service),
            "correction" => Some(MovementReason::Correction),
            "damaged" => Some(MovementReason::Damaged),
            "lost" => Some(MovementReason::Lost),
            "return" => Some(MovementReason::Return),
            _ => None,
        }
    }
}

/// Movement joined with part and user details, as history listings show it
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StockMovementDetail {
    pub id: Uuid,
    pub spare_part_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reason: MovementReason,
    pub reference_number: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub part_code: String,
    pub part_name: String,
    pub category: String,
    pub brand: Option<String>,
    pub created_by_name: Option<String>,
}

/// Input for recording a movement
#[derive(Debug, Deserialize, Validate)]
pub struct RecordMovementInput {
    pub spare_part_id: Uuid,
    pub movement_type: MovementType,
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i32,
    pub reason: MovementReason,
    #[validate(length(max = 100, message = "Reference number must be at most 100 characters"))]
    pub reference_number: Option<String>,
    #[validate(length(max = 100, message = "Supplier must be at most 100 characters"))]
    pub supplier: Option<String>,
    #[validate(custom = "check_unit_price")]
    pub unit_price: Option<Decimal>,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

fn check_unit_price(price: &Decimal) -> Result<(), ValidationError> {
    validation::validate_unit_price(*price).map_err(|msg| {
        let mut err = ValidationError::new("unit_price");
        err.message = Some(msg.into());
        err
    })
}

/// Filters for the movement history listing
#[derive(Debug, Clone, Default)]
pub struct MovementListFilter {
    pub search: Option<String>,
    pub movement_type: Option<MovementType>,
    pub reason: Option<MovementReason>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Part fields needed while recording a movement
#[derive(Debug, FromRow)]
struct PartStockRow {
    id: Uuid,
    current_stock: i32,
    price: Decimal,
}

const DETAIL_QUERY: &str = r#"
    SELECT sm.id, sm.spare_part_id, sm.movement_type, sm.quantity, sm.reason,
           sm.reference_number, sm.supplier, sm.unit_price, sm.total_price,
           sm.notes, sm.created_by, sm.created_at,
           sp.code AS part_code, sp.name AS part_name, sp.category, sp.brand,
           u.full_name AS created_by_name
    FROM stock_movements sm
    JOIN spare_parts sp ON sp.id = sm.spare_part_id
    LEFT JOIN users u ON u.id = sm.created_by
"#;

impl StockMovementService {
    /// Create a new StockMovementService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List movements with filters and pagination, newest first
    pub async fn list(
        &self,
        filter: &MovementListFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<StockMovementDetail>> {
        let movements = sqlx::query_as::<_, StockMovementDetail>(&format!(
            r#"
            {DETAIL_QUERY}
            WHERE ($1::text IS NULL
                   OR sp.name ILIKE '%' || $1 || '%'
                   OR sp.code ILIKE '%' || $1 || '%'
                   OR sm.reference_number ILIKE '%' || $1 || '%')
              AND ($2::movement_type IS NULL OR sm.movement_type = $2)
              AND ($3::movement_reason IS NULL OR sm.reason = $3)
              AND ($4::date IS NULL OR sm.created_at::date >= $4)
              AND ($5::date IS NULL OR sm.created_at::date <= $5)
            ORDER BY sm.created_at DESC
            LIMIT $6 OFFSET $7
            "#
        ))
        .bind(filter.search.as_deref())
        .bind(filter.movement_type)
        .bind(filter.reason)
        .bind(filter.date_from)
        .bind(filter.date_to)
        .bind(pagination.per_page as i64)
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM stock_movements sm
            JOIN spare_parts sp ON sp.id = sm.spare_part_id
            WHERE ($1::text IS NULL
                   OR sp.name ILIKE '%' || $1 || '%'
                   OR sp.code ILIKE '%' || $1 || '%'
                   OR sm.reference_number ILIKE '%' || $1 || '%')
              AND ($2::movement_type IS NULL OR sm.movement_type = $2)
              AND ($3::movement_reason IS NULL OR sm.reason = $3)
              AND ($4::date IS NULL OR sm.created_at::date >= $4)
              AND ($5::date IS NULL OR sm.created_at::date <= $5)
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.movement_type)
        .bind(filter.reason)
        .bind(filter.date_from)
        .bind(filter.date_to)
        .fetch_one(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: movements,
            pagination: PaginationMeta::new(pagination, total as u64),
        })
    }

    /// Record a movement and adjust the part's stock atomically
    pub async fn record(
        &self,
        user_id: Uuid,
        input: RecordMovementInput,
    ) -> AppResult<StockMovementDetail> {
        input.validate()?;

        let mut tx = self.db.begin().await?;

        // Lock the part row; the availability check below must see the
        // count this transaction will adjust.
        let part = sqlx::query_as::<_, PartStockRow>(
            "SELECT id, current_stock, price FROM spare_parts WHERE id = $1 AND is_active = TRUE FOR UPDATE",
        )
        .bind(input.spare_part_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Spare part".to_string()))?;

        if input.movement_type == MovementType::Out && part.current_stock < input.quantity {
            return Err(AppError::InsufficientStock(format!(
                "available stock: {}",
                part.current_stock
            )));
        }

        // Outgoing stock without an explicit price uses the catalog price.
        let unit_price = match (input.unit_price, input.movement_type) {
            (Some(price), _) => Some(price),
            (None, MovementType::Out) => Some(part.price),
            (None, MovementType::In) => None,
        };
        let total_price = unit_price.map(|price| price * Decimal::from(input.quantity));

        let movement_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO stock_movements (
                spare_part_id, movement_type, quantity, reason, reference_number,
                supplier, unit_price, total_price, notes, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(part.id)
        .bind(input.movement_type)
        .bind(input.quantity)
        .bind(input.reason)
        .bind(&input.reference_number)
        .bind(&input.supplier)
        .bind(unit_price)
        .bind(total_price)
        .bind(&input.notes)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let delta = match input.movement_type {
            MovementType::In => input.quantity,
            MovementType::Out => -input.quantity,
        };

        sqlx::query(
            "UPDATE spare_parts SET current_stock = current_stock + $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(delta)
        .bind(part.id)
        .execute(&mut *tx)
        .await?;

        // Outgoing stock feeds the demand history behind the need-analysis
        // trailing average, accumulated per day.
        if input.movement_type == MovementType::Out {
            sqlx::query(
                r#"
                INSERT INTO daily_demand_logs (spare_part_id, quantity, log_date)
                VALUES ($1, $2, CURRENT_DATE)
                ON CONFLICT (spare_part_id, log_date)
                DO UPDATE SET quantity = daily_demand_logs.quantity + EXCLUDED.quantity
                "#,
            )
            .bind(part.id)
            .bind(Decimal::from(input.quantity))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_detail(movement_id).await
    }

    /// Fetch one movement with part and user details
    async fn get_detail(&self, id: Uuid) -> AppResult<StockMovementDetail> {
        sqlx::query_as::<_, StockMovementDetail>(&format!("{DETAIL_QUERY} WHERE sm.id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Stock movement".to_string()))
    }
}
