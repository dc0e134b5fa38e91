//! KvStore - Abstract get/list/put/delete storage keyed by string.

use super::KvError;

/// Abstract key-value storage.
///
/// Implementations must be shareable across the worker threads that
/// [`PostQuery`](crate::PostQuery) fans point reads out to.
pub trait KvStore: Send + Sync {
    /// Get the value stored under `key`. Returns None if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// List every key. Order is backend-defined and is the order listings
    /// are returned in.
    fn list_keys(&self) -> Result<Vec<String>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), KvError>;

    /// Delete `key`. Returns true if it existed.
    fn delete(&self, key: &str) -> Result<bool, KvError>;
}
