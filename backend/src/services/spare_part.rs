//! Spare-part catalog service
//!
//! Owns the `spare_parts` table: listing with filters, CRUD, the public
//! stock board, and the reorder-point rewrite on create/update. The
//! stored `rop` is the single source the classification reads; it is
//! recalculated here whenever `daily_demand` or `lead_time` changes and
//! nowhere else.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use shared::stock::{self, StockStatus};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation;

const PART_COLUMNS: &str = "id, code, name, category, brand, price, current_stock, \
     minimum_stock, lead_time, daily_demand, rop, location, description, \
     is_active, created_at, updated_at";

/// Spare-part catalog service
#[derive(Clone)]
pub struct SparePartService {
    db: PgPool,
}

/// A spare part as stored
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SparePart {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub price: Decimal,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub lead_time: i32,
    pub daily_demand: Decimal,
    pub rop: i32,
    pub location: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SparePart {
    /// Derived stock status of this part.
    pub fn status(&self) -> StockStatus {
        stock::classify_stock(self.current_stock, self.rop, self.minimum_stock)
    }
}

/// Part plus its derived classification, as listings return it
#[derive(Debug, Serialize)]
pub struct SparePartWithStatus {
    #[serde(flatten)]
    pub part: SparePart,
    pub status: StockStatus,
    pub status_label: &'static str,
    pub severity_color: &'static str,
}

impl From<SparePart> for SparePartWithStatus {
    fn from(part: SparePart) -> Self {
        let status = part.status();
        Self {
            part,
            status,
            status_label: status.label(),
            severity_color: status.severity_color(),
        }
    }
}

/// Input for creating or updating a spare part
#[derive(Debug, Deserialize, Validate)]
pub struct SparePartInput {
    #[validate(custom = "check_part_code")]
    pub code: String,
    #[validate(length(min = 3, max = 200, message = "Name must be 3-200 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 100, message = "Category must be 2-100 characters"))]
    pub category: String,
    #[validate(length(max = 100, message = "Brand must be at most 100 characters"))]
    pub brand: Option<String>,
    #[validate(custom = "check_price")]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub current_stock: i32,
    #[validate(range(min = 1, message = "Minimum stock must be at least 1"))]
    pub minimum_stock: i32,
    #[validate(range(min = 1, max = 365, message = "Lead time must be 1-365 days"))]
    pub lead_time: i32,
    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

fn check_part_code(code: &str) -> Result<(), ValidationError> {
    validation::validate_part_code(code).map_err(|msg| {
        let mut err = ValidationError::new("part_code");
        err.message = Some(msg.into());
        err
    })
}

fn check_price(price: &Decimal) -> Result<(), ValidationError> {
    validation::validate_price(*price).map_err(|msg| {
        let mut err = ValidationError::new("price");
        err.message = Some(msg.into());
        err
    })
}

/// Stock-status filter accepted by the part listing.
///
/// Only the three alert tiers are offered; "good" parts are what is left
/// when no filter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Critical,
    Reorder,
    Low,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "critical" => Some(StatusFilter::Critical),
            "reorder" => Some(StatusFilter::Reorder),
            "low" => Some(StatusFilter::Low),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Critical => "critical",
            StatusFilter::Reorder => "reorder",
            StatusFilter::Low => "low",
        }
    }
}

/// Filters for the part listing
#[derive(Debug, Clone, Default)]
pub struct PartListFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<StatusFilter>,
}

/// Public stock board payload
#[derive(Debug, Serialize)]
pub struct PublicStock {
    pub data: Vec<PublicStockItem>,
    pub last_updated: DateTime<Utc>,
    pub total_items: u64,
    pub low_stock_count: i64,
    pub reorder_count: i64,
}

/// Read-only part fields exposed without authentication
#[derive(Debug, Serialize, FromRow)]
pub struct PublicStockItem {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub price: Decimal,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub rop: i32,
    pub location: Option<String>,
}

impl SparePartService {
    /// Create a new SparePartService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List active parts with filters and pagination
    pub async fn list(
        &self,
        filter: &PartListFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<SparePartWithStatus>> {
        let status = filter.status.map(|s| s.as_str());

        let parts = sqlx::query_as::<_, SparePart>(&format!(
            r#"
            SELECT {PART_COLUMNS}
            FROM spare_parts
            WHERE is_active = TRUE
              AND ($1::text IS NULL
                   OR code ILIKE '%' || $1 || '%'
                   OR name ILIKE '%' || $1 || '%'
                   OR brand ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL
                   OR ($3 = 'critical' AND current_stock <= minimum_stock)
                   OR ($3 = 'reorder' AND current_stock <= rop)
                   OR ($3 = 'low' AND current_stock <= rop * 1.5))
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(filter.search.as_deref())
        .bind(filter.category.as_deref())
        .bind(status)
        .bind(pagination.per_page as i64)
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM spare_parts
            WHERE is_active = TRUE
              AND ($1::text IS NULL
                   OR code ILIKE '%' || $1 || '%'
                   OR name ILIKE '%' || $1 || '%'
                   OR brand ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL
                   OR ($3 = 'critical' AND current_stock <= minimum_stock)
                   OR ($3 = 'reorder' AND current_stock <= rop)
                   OR ($3 = 'low' AND current_stock <= rop * 1.5))
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.category.as_deref())
        .bind(status)
        .fetch_one(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: parts.into_iter().map(SparePartWithStatus::from).collect(),
            pagination: PaginationMeta::new(pagination, total as u64),
        })
    }

    /// Get a single active part
    pub async fn get(&self, id: Uuid) -> AppResult<SparePart> {
        sqlx::query_as::<_, SparePart>(&format!(
            "SELECT {PART_COLUMNS} FROM spare_parts WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Spare part".to_string()))
    }

    /// Create a new part
    pub async fn create(&self, input: SparePartInput) -> AppResult<SparePart> {
        input.validate()?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spare_parts WHERE code = $1",
        )
        .bind(&input.code)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("Part code".to_string()));
        }

        // New parts have no movement history yet; start from the default
        // demand estimate.
        let daily_demand = Decimal::new(15, 1);
        let rop = stock::calculate_rop(daily_demand, input.lead_time);

        let part = sqlx::query_as::<_, SparePart>(&format!(
            r#"
            INSERT INTO spare_parts (
                code, name, category, brand, price, current_stock,
                minimum_stock, lead_time, daily_demand, rop, location, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.brand)
        .bind(input.price)
        .bind(input.current_stock)
        .bind(input.minimum_stock)
        .bind(input.lead_time)
        .bind(daily_demand)
        .bind(rop)
        .bind(&input.location)
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(part)
    }

    /// Update an existing part, rewriting its reorder point
    pub async fn update(&self, id: Uuid, input: SparePartInput) -> AppResult<SparePart> {
        input.validate()?;

        let existing = self.get(id).await?;

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spare_parts WHERE code = $1 AND id != $2",
        )
        .bind(&input.code)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if duplicate > 0 {
            return Err(AppError::DuplicateEntry("Part code".to_string()));
        }

        // The demand estimate survives the edit; only the lead time moves
        // the reorder point here.
        let rop = stock::calculate_rop(existing.daily_demand, input.lead_time);

        let part = sqlx::query_as::<_, SparePart>(&format!(
            r#"
            UPDATE spare_parts SET
                code = $1, name = $2, category = $3, brand = $4, price = $5,
                current_stock = $6, minimum_stock = $7, lead_time = $8,
                rop = $9, location = $10, description = $11, updated_at = NOW()
            WHERE id = $12
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.brand)
        .bind(input.price)
        .bind(input.current_stock)
        .bind(input.minimum_stock)
        .bind(input.lead_time)
        .bind(rop)
        .bind(&input.location)
        .bind(&input.description)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(part)
    }

    /// Delete a part: soft when movements reference it, hard otherwise
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome> {
        self.get(id).await?;

        let used = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stock_movements WHERE spare_part_id = $1",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if used > 0 {
            sqlx::query(
                "UPDATE spare_parts SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
            )
            .bind(id)
            .execute(&self.db)
            .await?;
            Ok(DeleteOutcome::SoftDeleted)
        } else {
            sqlx::query("DELETE FROM spare_parts WHERE id = $1")
                .bind(id)
                .execute(&self.db)
                .await?;
            Ok(DeleteOutcome::HardDeleted)
        }
    }

    /// Read-only stock board for the public page
    pub async fn public_stock(&self) -> AppResult<PublicStock> {
        let items = sqlx::query_as::<_, PublicStockItem>(
            r#"
            SELECT id, code, name, category, brand, price, current_stock,
                   minimum_stock, rop, location
            FROM spare_parts
            WHERE is_active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let low_stock_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spare_parts WHERE current_stock <= minimum_stock AND is_active = TRUE",
        )
        .fetch_one(&self.db)
        .await?;

        let reorder_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spare_parts WHERE current_stock <= rop AND is_active = TRUE",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(PublicStock {
            total_items: items.len() as u64,
            data: items,
            last_updated: Utc::now(),
            low_stock_count,
            reorder_count,
        })
    }
}

/// Outcome of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    SoftDeleted,
    HardDeleted,
}
