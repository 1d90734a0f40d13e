//! System settings service
//!
//! One settings row (id = 1), seeded with defaults on first read. The
//! email fields are stored configuration only; sending mail is another
//! system's job.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

/// Settings service
#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

const SETTINGS_COLUMNS: &str = "auto_notifications, email_notifications, email_host, \
     email_port, email_user, email_password, email_from, threshold_critical, \
     threshold_reorder, threshold_low, backup_frequency";

/// System settings row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SystemSettings {
    pub auto_notifications: bool,
    pub email_notifications: bool,
    pub email_host: String,
    pub email_port: String,
    pub email_user: String,
    pub email_password: String,
    pub email_from: String,
    pub threshold_critical: i32,
    pub threshold_reorder: i32,
    pub threshold_low: i32,
    pub backup_frequency: String,
}

/// Input for updating the settings row
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsInput {
    pub auto_notifications: bool,
    pub email_notifications: bool,
    pub email_host: String,
    pub email_port: String,
    pub email_user: String,
    pub email_password: String,
    pub email_from: String,
    pub threshold_critical: i32,
    pub threshold_reorder: i32,
    pub threshold_low: i32,
    pub backup_frequency: String,
}

impl SettingsService {
    /// Create a new SettingsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Read the settings row, seeding defaults on first access
    pub async fn get(&self) -> AppResult<SystemSettings> {
        if let Some(settings) = sqlx::query_as::<_, SystemSettings>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM system_settings WHERE id = 1"
        ))
        .fetch_optional(&self.db)
        .await?
        {
            return Ok(settings);
        }

        let settings = sqlx::query_as::<_, SystemSettings>(&format!(
            r#"
            INSERT INTO system_settings (id)
            VALUES (1)
            ON CONFLICT (id) DO NOTHING
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .fetch_optional(&self.db)
        .await?;

        match settings {
            Some(settings) => Ok(settings),
            // Another request seeded the row between our read and insert.
            None => {
                sqlx::query_as::<_, SystemSettings>(&format!(
                    "SELECT {SETTINGS_COLUMNS} FROM system_settings WHERE id = 1"
                ))
                .fetch_one(&self.db)
                .await
                .map_err(Into::into)
            }
        }
    }

    /// Update the settings row
    pub async fn update(&self, input: UpdateSettingsInput) -> AppResult<SystemSettings> {
        // Ensure the row exists before updating it.
        self.get().await?;

        let settings = sqlx::query_as::<_, SystemSettings>(&format!(
            r#"
            UPDATE system_settings SET
                auto_notifications = $1,
                email_notifications = $2,
                email_host = $3,
                email_port = $4,
                email_user = $5,
                email_password = $6,
                email_from = $7,
                threshold_critical = $8,
                threshold_reorder = $9,
                threshold_low = $10,
                backup_frequency = $11,
                updated_at = NOW()
            WHERE id = 1
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(input.auto_notifications)
        .bind(input.email_notifications)
        .bind(&input.email_host)
        .bind(&input.email_port)
        .bind(&input.email_user)
        .bind(&input.email_password)
        .bind(&input.email_from)
        .bind(input.threshold_critical)
        .bind(input.threshold_reorder)
        .bind(input.threshold_low)
        .bind(&input.backup_frequency)
        .fetch_one(&self.db)
        .await?;

        Ok(settings)
    }
}
