//! ConfigStore implementation for SQLite

use crate::bind::{to_sql_values, value_map};
use crate::connection::SqlitePool;
use async_trait::async_trait;
use cardstock_core::model::ConfigEntry;
use cardstock_core::storage::{ConfigStore, StorageError, StorageResult};
use cardstock_query::catalog;
use rusqlite::{params_from_iter, OptionalExtension};
use serde_json::json;

/// SQLite implementation of ConfigStore
#[derive(Clone)]
pub struct SqliteConfigStore {
    pool: SqlitePool,
}

impl SqliteConfigStore {
    /// Create a new ConfigStore over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn get_setting(&self, setting: &str) -> StorageResult<Option<ConfigEntry>> {
        let pool = self.pool.clone();
        let setting = setting.to_string();

        tokio::task::spawn_blocking(move || {
            let stmt = catalog::FETCH_CONFIG_SETTING
                .apply(&[value_map([("setting", json!(setting))])])?;

            pool.with_connection(|conn| {
                let args = to_sql_values(&stmt.args)?;
                let mut prepared = conn.prepare(&stmt.sql)?;
                let entry = prepared
                    .query_row(params_from_iter(args), row_to_entry)
                    .optional()?;

                Ok(entry)
            })
        })
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?
        .map_err(Into::into)
    }

    async fn set_setting(&self, setting: &str, value: Option<String>) -> StorageResult<()> {
        let pool = self.pool.clone();
        let setting = setting.to_string();

        tokio::task::spawn_blocking(move || {
            let stmt = catalog::SET_CONFIG_SETTING.apply(&[value_map([
                ("setting", json!(setting)),
                ("value", json!(value)),
            ])])?;

            pool.with_connection(|conn| {
                let args = to_sql_values(&stmt.args)?;
                conn.execute(&stmt.sql, params_from_iter(args))?;
                Ok(())
            })
        })
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?
        .map_err(Into::into)
    }
}

/// Convert a database row to a ConfigEntry
fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConfigEntry> {
    Ok(ConfigEntry {
        setting: row.get(0)?,
        value: row.get(1)?,
    })
}
