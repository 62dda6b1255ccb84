//! SQLite storage backend for cardstock
//!
//! Implements the `cardstock-core` storage traits over SQLite. Statements
//! are never written by hand here: every read and write is built through
//! the `cardstock-query` catalog, executed against a shared connection.
//!
//! ## Features
//!
//! - **Closure-table hierarchy**: the deck tree is materialized as a
//!   transitive closure, so child/ancestor reads are plain filters with
//!   no recursion at query time
//! - **Trigger-maintained self-edges**: deck creation and its `(id, id, 0)`
//!   closure row are one atomic step at the schema level
//! - **WAL mode**: optimized for concurrent read access
//! - **Thread safety**: `Arc<Mutex<Connection>>` with blocking work moved
//!   off the async runtime
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardstock_core::storage::DeckStore;
//! use cardstock_sqlite::{SqliteConfig, SqliteDeckStore, SqlitePool};
//!
//! let pool = SqlitePool::new(SqliteConfig::new("./cardstock.db"))?;
//! let decks = SqliteDeckStore::new(pool);
//!
//! let animals = decks.create_deck("Animals").await?;
//! let mammals = decks.create_deck("Mammals").await?;
//! decks.associate_child(animals.id, mammals.id).await?;
//! ```

pub mod bind;
pub mod config;
pub mod config_store;
pub mod connection;
pub mod deck_store;
pub mod error;
pub mod schema;

// Re-exports
pub use config::SqliteConfig;
pub use config_store::SqliteConfigStore;
pub use connection::SqlitePool;
pub use deck_store::SqliteDeckStore;
pub use error::{SqliteError, SqliteResult};
