//! SQLite backend configuration

use std::path::PathBuf;

/// Configuration for the SQLite connection
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file path, or `:memory:` for an in-memory database
    pub path: PathBuf,
    /// Enable write-ahead logging (file-backed databases only)
    pub wal_mode: bool,
    /// Enforce foreign keys; the closure table's cascading deletes
    /// depend on this being ON
    pub foreign_keys: bool,
    /// PRAGMA busy_timeout, in milliseconds
    pub busy_timeout_ms: u32,
    /// PRAGMA cache_size (negative values are KiB)
    pub cache_size: i64,
}

impl SqliteConfig {
    /// Create a configuration for a file-backed database
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            wal_mode: true,
            foreign_keys: true,
            busy_timeout_ms: 5_000,
            cache_size: -64_000,
        }
    }

    /// In-memory database, mainly for tests. WAL is pointless without a
    /// file, so it is off.
    pub fn memory() -> Self {
        let mut config = Self::new(":memory:");
        config.wal_mode = false;
        config
    }

    /// Whether this configuration targets an in-memory database
    pub fn is_memory(&self) -> bool {
        self.path.to_str() == Some(":memory:")
    }
}
