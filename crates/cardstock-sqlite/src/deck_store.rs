//! DeckStore implementation for SQLite

use crate::bind::{to_sql_values, value_map};
use crate::connection::SqlitePool;
use crate::error::SqliteError;
use async_trait::async_trait;
use cardstock_core::model::{ClosureEdge, Deck};
use cardstock_core::storage::{DeckStore, StorageError, StorageResult};
use cardstock_query::{catalog, ValueMap};
use rusqlite::{params_from_iter, OptionalExtension};
use serde_json::json;

/// SQLite implementation of DeckStore
///
/// Every statement is built through the `cardstock-query` catalog; this
/// store only supplies value maps and executes the rendered SQL.
#[derive(Clone)]
pub struct SqliteDeckStore {
    pool: SqlitePool,
}

impl SqliteDeckStore {
    /// Create a new DeckStore over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeckStore for SqliteDeckStore {
    async fn create_deck(&self, name: &str) -> StorageResult<Deck> {
        let pool = self.pool.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || {
            let stmt = catalog::CREATE_DECK.apply(&[value_map([("name", json!(name.as_str()))])])?;

            pool.with_connection(|conn| {
                let args = to_sql_values(&stmt.args)?;
                conn.execute(&stmt.sql, params_from_iter(args))?;

                // the schema trigger has already written the (id, id, 0)
                // self-edge for this rowid
                Ok(Deck {
                    id: conn.last_insert_rowid(),
                    name,
                })
            })
        })
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?
        .map_err(Into::into)
    }

    async fn get_deck(&self, deck_id: i64) -> StorageResult<Option<Deck>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let stmt = catalog::FETCH_DECK.apply(&[value_map([("deck_id", json!(deck_id))])])?;

            pool.with_connection(|conn| {
                let args = to_sql_values(&stmt.args)?;
                let mut prepared = conn.prepare(&stmt.sql)?;
                let deck = prepared
                    .query_row(params_from_iter(args), row_to_deck)
                    .optional()?;

                Ok(deck)
            })
        })
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?
        .map_err(Into::into)
    }

    async fn update_deck(&self, deck_id: i64, patch: &ValueMap) -> StorageResult<Deck> {
        let pool = self.pool.clone();
        let patch = patch.clone();

        tokio::task::spawn_blocking(move || {
            let key = value_map([("deck_id", json!(deck_id))]);
            // an unrecognized patch fails here, before any SQL runs
            let update = catalog::UPDATE_DECK.apply(&[key.clone(), patch])?;
            let fetch = catalog::FETCH_DECK.apply(&[key])?;

            pool.with_connection(|conn| {
                let args = to_sql_values(&update.args)?;
                conn.execute(&update.sql, params_from_iter(args))?;

                let args = to_sql_values(&fetch.args)?;
                let mut prepared = conn.prepare(&fetch.sql)?;
                prepared
                    .query_row(params_from_iter(args), row_to_deck)
                    .optional()?
                    .ok_or_else(|| SqliteError::NotFound(format!("deck {deck_id}")))
            })
        })
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?
        .map_err(Into::into)
    }

    async fn delete_deck(&self, deck_id: i64) -> StorageResult<bool> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let stmt = catalog::DELETE_DECK.apply(&[value_map([("deck_id", json!(deck_id))])])?;

            pool.with_connection(|conn| {
                let args = to_sql_values(&stmt.args)?;
                let deleted = conn.execute(&stmt.sql, params_from_iter(args))?;

                // closure rows referencing the deck are gone via cascade
                Ok(deleted > 0)
            })
        })
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?
        .map_err(Into::into)
    }

    async fn associate_child(&self, parent: i64, child: i64) -> StorageResult<()> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let stmt = catalog::ASSOCIATE_DECK_AS_CHILD.apply(&[value_map([
                ("parent", json!(parent)),
                ("child", json!(child)),
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

    async fn get_children(&self, parent: i64) -> StorageResult<Vec<ClosureEdge>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let stmt =
                catalog::FETCH_DECK_CHILDREN.apply(&[value_map([("parent", json!(parent))])])?;

            pool.with_connection(|conn| {
                let args = to_sql_values(&stmt.args)?;
                let mut prepared = conn.prepare(&stmt.sql)?;
                let edges = prepared
                    .query_map(params_from_iter(args), row_to_closure_edge)?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(edges)
            })
        })
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?
        .map_err(Into::into)
    }
}

/// Convert a database row to a Deck
fn row_to_deck(row: &rusqlite::Row<'_>) -> rusqlite::Result<Deck> {
    Ok(Deck {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Convert a database row to a ClosureEdge
fn row_to_closure_edge(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClosureEdge> {
    Ok(ClosureEdge {
        ancestor: row.get(0)?,
        descendant: row.get(1)?,
        depth: row.get(2)?,
    })
}
