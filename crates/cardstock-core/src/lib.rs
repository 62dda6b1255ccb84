//! Core types and storage abstractions for cardstock
//!
//! This crate defines the database-agnostic pieces of the flashcard
//! backend: the model types (decks, closure edges, config entries) and the
//! storage traits that backends implement. It carries no database
//! dependency; concrete storage lives in `cardstock-sqlite`.

pub mod model;
pub mod storage;

// Re-exports
pub use model::{ClosureEdge, ConfigEntry, Deck};
pub use storage::{ConfigStore, DeckStore, StorageError, StorageResult};
