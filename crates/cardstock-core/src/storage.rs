//! Storage trait abstractions
//!
//! Backends implement these traits; callers depend on the traits rather
//! than a concrete database. Deck updates are driven by loosely-typed
//! column -> value maps (decoded request bodies) so that the statement
//! pipeline, not the caller, decides which columns are patchable.

use crate::model::{ClosureEdge, ConfigEntry, Deck};
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Error type shared by all storage backends.
///
/// The split matters to callers: `InvalidInput` is a caller mistake (maps
/// to a 4xx at the HTTP layer), `NotFound` is an absent row, everything
/// else is a backend fault. This crate classifies; it never formats
/// user-facing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Create a generic backend error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Create an invalid-input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Deck persistence and hierarchy maintenance.
///
/// The hierarchy is a materialized transitive closure: creating a deck
/// establishes its self-edge atomically, and `associate_child` extends the
/// closure with one set-based write so reads never recurse.
#[async_trait]
pub trait DeckStore: Send + Sync {
    /// Create a deck. The backend assigns the id and must atomically
    /// record the closure self-edge `(id, id, 0)`.
    async fn create_deck(&self, name: &str) -> StorageResult<Deck>;

    /// Fetch a deck by id
    async fn get_deck(&self, deck_id: i64) -> StorageResult<Option<Deck>>;

    /// Partially update a deck from an untyped patch map. A patch that
    /// touches no recognized column fails with `InvalidInput` and leaves
    /// the row untouched. Returns the refreshed row.
    async fn update_deck(&self, deck_id: i64, patch: &Map<String, Value>)
        -> StorageResult<Deck>;

    /// Delete a deck. Closure rows referencing it are removed by the
    /// backend's cascading deletes. Returns whether a row was deleted.
    async fn delete_deck(&self, deck_id: i64) -> StorageResult<bool>;

    /// Link `child` under `parent`, extending the closure so every
    /// ancestor of the parent becomes an ancestor of the child.
    /// Re-associating an already-linked pair is a no-op.
    ///
    /// The parent's own closure must be complete before the call: decks
    /// are wired top-down, parents before grandchildren. The store does
    /// not detect cycles or double-parenting.
    async fn associate_child(&self, parent: i64, child: i64) -> StorageResult<()>;

    /// Direct children of `parent`: closure rows at depth 1
    async fn get_children(&self, parent: i64) -> StorageResult<Vec<ClosureEdge>>;
}

/// Whole-row application settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch a setting by key
    async fn get_setting(&self, setting: &str) -> StorageResult<Option<ConfigEntry>>;

    /// Insert or replace a setting as a whole row
    async fn set_setting(&self, setting: &str, value: Option<String>) -> StorageResult<()>;
}
