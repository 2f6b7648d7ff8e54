//! Durable key/value byte storage used for the watched list.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::PersistenceError;

/// Key under which the serialized watched list is stored.
pub const WATCHED_KEY: &str = "watched";

/// Synchronous key/value byte store supplied by the host environment.
///
/// Writes replace the previous value for the key wholesale.
pub trait PersistentStore: Send + Sync + std::fmt::Debug {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && key != "."
        && key != "..";
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}
