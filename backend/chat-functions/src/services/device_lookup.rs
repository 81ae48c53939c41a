//! Registered-device lookup and maintenance
//!
//! The store keeps one row per installed client instance under
//! `(user_id, device_id)`. Push fan-out is a read-only consumer; rows are
//! written by the registration endpoints when a client logs in or refreshes
//! its push token.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{DeviceRecord, DeviceRegistration, RegisteredDevice};

#[async_trait]
pub trait DeviceTokenStore: Send + Sync {
    /// Every device row registered for one user, tokens included.
    /// An empty result is a normal outcome, not an error.
    async fn devices_for_user(&self, user_id: &str) -> AppResult<Vec<DeviceRecord>>;

    /// Insert or refresh one device registration.
    async fn register_device(&self, registration: &DeviceRegistration) -> AppResult<()>;

    /// Remove one device registration. Removing an unknown device is a no-op.
    async fn unregister_device(&self, user_id: &str, device_id: &str) -> AppResult<()>;

    /// Devices listed back to callers, without token values.
    async fn registered_devices(&self, user_id: &str) -> AppResult<Vec<RegisteredDevice>>;
}

/// Collect the usable push targets out of a user's device rows.
/// Rows with a missing or empty token are skipped.
pub fn usable_tokens(devices: &[DeviceRecord]) -> Vec<String> {
    devices
        .iter()
        .filter_map(|d| d.token.as_deref())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Postgres-backed device token store.
pub struct PgDeviceTokenStore {
    db: PgPool,
}

impl PgDeviceTokenStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DeviceTokenStore for PgDeviceTokenStore {
    async fn devices_for_user(&self, user_id: &str) -> AppResult<Vec<DeviceRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT device_id, token
            FROM device_tokens
            WHERE user_id = $1
            ORDER BY device_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        debug!("loaded {} device row(s) for user {}", rows.len(), user_id);

        Ok(rows
            .iter()
            .map(|row| DeviceRecord {
                device_id: row.get("device_id"),
                token: row.get("token"),
            })
            .collect())
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO device_tokens (user_id, device_id, token, platform, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (user_id, device_id) DO UPDATE
            SET token = $3, platform = $4, updated_at = $5
            "#,
        )
        .bind(&registration.user_id)
        .bind(&registration.device_id)
        .bind(&registration.token)
        .bind(&registration.platform)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        info!(
            "registered device {} for user {}",
            registration.device_id, registration.user_id
        );
        Ok(())
    }

    async fn unregister_device(&self, user_id: &str, device_id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM device_tokens WHERE user_id = $1 AND device_id = $2")
            .bind(user_id)
            .bind(device_id)
            .execute(&self.db)
            .await?;

        debug!("unregistered device {} for user {}", device_id, user_id);
        Ok(())
    }

    async fn registered_devices(&self, user_id: &str) -> AppResult<Vec<RegisteredDevice>> {
        let rows = sqlx::query(
            r#"
            SELECT device_id, platform, created_at
            FROM device_tokens
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .iter()
            .map(|row| RegisteredDevice {
                device_id: row.get("device_id"),
                platform: row.get("platform"),
                registered_at: row.get("created_at"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(device_id: &str, token: Option<&str>) -> DeviceRecord {
        DeviceRecord {
            device_id: device_id.to_string(),
            token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_usable_tokens_skips_missing_and_empty() {
        let devices = vec![
            record("d1", Some("tokA")),
            record("d2", None),
            record("d3", Some("")),
            record("d4", Some("tokB")),
        ];

        assert_eq!(usable_tokens(&devices), vec!["tokA", "tokB"]);
    }

    #[test]
    fn test_usable_tokens_empty_input() {
        assert!(usable_tokens(&[]).is_empty());
    }
}
