//! Error types for the post query layer.

use std::error::Error;
use std::fmt;

use crate::kv::KvError;

/// Why a query could not produce an answer.
///
/// A missing post is not an error: point lookups return `Ok(None)` and
/// listings return an empty `Vec`, so an empty store and an unreachable one
/// are told apart by `Ok` versus `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The backing store failed (connectivity, lock poisoning, bad key).
    Store(KvError),
    /// A stored value is not a valid post record.
    Malformed { key: String, reason: String },
    /// A post could not be serialized for writing.
    Encode(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Store(e) => write!(f, "store error: {}", e),
            QueryError::Malformed { key, reason } => {
                write!(f, "malformed post record {}: {}", key, reason)
            }
            QueryError::Encode(msg) => write!(f, "post encode error: {}", msg),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueryError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KvError> for QueryError {
    fn from(err: KvError) -> Self {
        QueryError::Store(err)
    }
}
