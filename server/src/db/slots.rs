//! PostgreSQL-backed slot store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::Pool;
use crate::storage::{SlotStore, StoreError};

/// A stored slot row.
#[derive(Debug)]
pub struct StoredSlot {
    pub name: String,
    pub value: String,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredSlot {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(StoredSlot {
            name: row.try_get("name")?,
            value: row.try_get("value")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Slot store over the `slots` table.
#[derive(Debug, Clone)]
pub struct PgSlotStore {
    pool: Pool,
}

impl PgSlotStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query_as::<_, StoredSlot>(
            r#"
            SELECT name, value, updated_at
            FROM slots
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|slot| {
            tracing::trace!(slot = %slot.name, "Loaded slot");
            slot.value
        }))
    }

    async fn put(&self, name: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO slots (name, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(name)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
