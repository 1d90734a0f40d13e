//! Low-stock notification service with per-user read tracking
//!
//! Notifications are derived, not stored: each request classifies the
//! active parts and joins the caller's read markers. A marker is keyed by
//! `"{kind}-{part_id}"` so it survives as long as the part stays in the
//! same alert band.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use shared::stock::{classify_stock, StockStatus};

/// Notification service
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

/// Alert band a notification belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Critical,
    Reorder,
    Low,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Critical => "critical",
            NotificationKind::Reorder => "reorder",
            NotificationKind::Low => "low",
        }
    }

    /// Band for a stock status; `Good` raises nothing.
    fn from_status(status: StockStatus) -> Option<Self> {
        match status {
            StockStatus::Critical => Some(NotificationKind::Critical),
            StockStatus::Reorder => Some(NotificationKind::Reorder),
            StockStatus::Low => Some(NotificationKind::Low),
            StockStatus::Good => None,
        }
    }

    fn severity_rank(&self) -> u8 {
        match self {
            NotificationKind::Critical => 0,
            NotificationKind::Reorder => 1,
            NotificationKind::Low => 2,
        }
    }
}

/// One derived stock notification
#[derive(Debug, Clone, Serialize)]
pub struct StockNotification {
    /// Also the read-marker key: `"{kind}-{part_id}"`.
    pub id: String,
    pub spare_part_id: Uuid,
    pub code: String,
    pub name: String,
    pub category: String,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub rop: i32,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

/// Counters shown next to the notification bell
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NotificationStats {
    pub critical: u64,
    pub reorder: u64,
    pub low: u64,
    pub total: u64,
    pub unread: u64,
}

/// Notification list plus its counters
#[derive(Debug, Serialize)]
pub struct NotificationFeed {
    pub notifications: Vec<StockNotification>,
    pub stats: NotificationStats,
}

/// Part fields needed to derive notifications
#[derive(Debug, FromRow)]
struct PartAlertRow {
    id: Uuid,
    code: String,
    name: String,
    category: String,
    current_stock: i32,
    minimum_stock: i32,
    rop: i32,
    updated_at: DateTime<Utc>,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Current notifications for a user, unread first then by severity
    pub async fn feed(&self, user_id: Uuid) -> AppResult<NotificationFeed> {
        let mut notifications = self.derive(user_id).await?;

        notifications.sort_by(|a, b| {
            a.is_read
                .cmp(&b.is_read)
                .then(a.kind.severity_rank().cmp(&b.kind.severity_rank()))
        });

        let stats = Self::stats_for(&notifications);

        Ok(NotificationFeed {
            notifications,
            stats,
        })
    }

    /// Just the counters, for the badge polling endpoint
    pub async fn counts(&self, user_id: Uuid) -> AppResult<NotificationStats> {
        let notifications = self.derive(user_id).await?;
        Ok(Self::stats_for(&notifications))
    }

    /// Mark one notification as read for this user
    pub async fn mark_read(&self, user_id: Uuid, notification_key: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_reads (user_id, notification_key)
            VALUES ($1, $2)
            ON CONFLICT (user_id, notification_key) DO UPDATE SET read_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(notification_key)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Mark every current notification as read; returns how many
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let notifications = self.derive(user_id).await?;

        let mut tx = self.db.begin().await?;
        for notification in &notifications {
            sqlx::query(
                r#"
                INSERT INTO notification_reads (user_id, notification_key)
                VALUES ($1, $2)
                ON CONFLICT (user_id, notification_key) DO UPDATE SET read_at = NOW()
                "#,
            )
            .bind(user_id)
            .bind(&notification.id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(notifications.len() as u64)
    }

    /// Classify the active parts and join this user's read markers
    async fn derive(&self, user_id: Uuid) -> AppResult<Vec<StockNotification>> {
        let rows = sqlx::query_as::<_, PartAlertRow>(
            r#"
            SELECT id, code, name, category, current_stock, minimum_stock, rop, updated_at
            FROM spare_parts
            WHERE is_active = TRUE
            ORDER BY current_stock ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let read_keys: HashSet<String> = sqlx::query_scalar::<_, String>(
            "SELECT notification_key FROM notification_reads WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .collect();

        let notifications = rows
            .into_iter()
            .filter_map(|row| {
                let status = classify_stock(row.current_stock, row.rop, row.minimum_stock);
                let kind = NotificationKind::from_status(status)?;
                let key = format!("{}-{}", kind.as_str(), row.id);

                Some(StockNotification {
                    is_read: read_keys.contains(&key),
                    id: key,
                    spare_part_id: row.id,
                    message: Self::message_for(kind, &row),
                    code: row.code,
                    name: row.name,
                    category: row.category,
                    current_stock: row.current_stock,
                    minimum_stock: row.minimum_stock,
                    rop: row.rop,
                    kind,
                    created_at: row.updated_at,
                })
            })
            .collect();

        Ok(notifications)
    }

    fn message_for(kind: NotificationKind, row: &PartAlertRow) -> String {
        match kind {
            NotificationKind::Critical => format!(
                "Stok kritis! Hanya tersisa {} unit (minimum: {})",
                row.current_stock, row.minimum_stock
            ),
            NotificationKind::Reorder => format!(
                "Perlu reorder! Stok {} sudah mencapai ROP ({})",
                row.current_stock, row.rop
            ),
            NotificationKind::Low => format!(
                "Stok rendah! Tersisa {} unit (ROP: {})",
                row.current_stock, row.rop
            ),
        }
    }

    fn stats_for(notifications: &[StockNotification]) -> NotificationStats {
        let count_kind = |kind: NotificationKind| {
            notifications.iter().filter(|n| n.kind == kind).count() as u64
        };

        NotificationStats {
            critical: count_kind(NotificationKind::Critical),
            reorder: count_kind(NotificationKind::Reorder),
            low: count_kind(NotificationKind::Low),
            total: notifications.len() as u64,
            unread: notifications.iter().filter(|n| !n.is_read).count() as u64,
        }
    }
}
