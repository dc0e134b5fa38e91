//! KV - The key-value store seam posts are persisted behind.
//!
//! A store holds opaque bytes under string keys and supports point reads,
//! key listing, writes and deletes. Posts are stored as one JSON document
//! per post id.
//!
//! Only the `query` module talks to a `KvStore`; everything else goes
//! through [`PostQuery`](crate::PostQuery). The `store_boundary` integration
//! test enforces that.

mod in_memory;
mod store;

use std::fmt;

/// Error type for key-value store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvError {
    /// The backend could not be reached or refused the operation.
    Unavailable(String),
    /// An in-process lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// The key is not acceptable to the backend.
    InvalidKey(String),
}

impl fmt::Display for KvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KvError::Unavailable(msg) => write!(f, "kv store unavailable: {}", msg),
            KvError::LockPoisoned(operation) => {
                write!(f, "kv store lock poisoned during {}", operation)
            }
            KvError::InvalidKey(key) => write!(f, "invalid kv key: {:?}", key),
        }
    }
}

impl std::error::Error for KvError {}

pub use in_memory::InMemoryKvStore;
pub use store::KvStore;
