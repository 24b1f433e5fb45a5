// Key-value persistence for ArtScout
// One named slot per key, rewritten wholesale on every save

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A place to keep string blobs under well-known keys.
///
/// Think browser localStorage: no transactions, no partial updates,
/// last writer wins.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace whatever is stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
