//! Composable statement-construction pipeline for cardstock
//!
//! This crate builds safe, parameterized SQL from untyped column -> value
//! maps. Every statement the backend issues is declared in the
//! [`catalog`] as a [`QueryPipeline`]: a SQL template plus a statically
//! composed chain of validation stages.
//!
//! Applying a pipeline seeds a fresh [`QueryContext`], threads one value
//! map per stage (short-circuiting on the first error), then rewrites the
//! template's `:name` placeholders into SQLite's numbered positional form.
//!
//! The crate never touches a database. The output is a
//! [`RenderedStatement`] — SQL text plus bound arguments in placeholder
//! order — for the storage layer to execute.
//!
//! ```
//! use cardstock_query::{catalog, ValueMap};
//! use serde_json::json;
//!
//! let mut input = ValueMap::new();
//! input.insert("deck_id".to_string(), json!(42));
//!
//! let stmt = catalog::FETCH_DECK.apply(&[input]).unwrap();
//! assert!(stmt.sql.contains("?1"));
//! assert_eq!(stmt.args, vec![json!(42)]);
//! ```

pub mod catalog;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod stage;

// Re-exports
pub use context::{value_map_from_json, QueryContext, ValueMap};
pub use error::{BuildResult, QueryBuildError};
pub use pipeline::{apply, QueryPipeline};
pub use render::RenderedStatement;
pub use stage::{BuildStage, PatchFilter, RequireColumns};
