//! Seeding - load fixture posts into a store.
//!
//! The seed file is a JSON array of posts in the wire shape:
//!
//! ```json
//! [
//!   { "id": "post-001", "title": "...", "body": "...", "tags": ["nextjs"] }
//! ]
//! ```

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::post::Post;
use crate::query::{PostQuery, QueryError};
use crate::KvStore;

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A fixture cannot be stored (e.g. it has no id).
    InvalidPost(String),
    Query(QueryError),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "failed to read seed file: {}", e),
            SeedError::Parse(e) => write!(f, "failed to parse seed file: {}", e),
            SeedError::InvalidPost(msg) => write!(f, "invalid seed post: {}", msg),
            SeedError::Query(e) => write!(f, "failed to store seed post: {}", e),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Io(e) => Some(e),
            SeedError::Parse(e) => Some(e),
            SeedError::Query(e) => Some(e),
            SeedError::InvalidPost(_) => None,
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        SeedError::Io(err)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::Parse(err)
    }
}

impl From<QueryError> for SeedError {
    fn from(err: QueryError) -> Self {
        SeedError::Query(err)
    }
}

/// Read a JSON array of posts from `path`.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Post>, SeedError> {
    let raw = std::fs::read(path.as_ref())?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Write every post through `query`. Returns how many were written.
///
/// All fixtures are checked before any is written.
pub fn seed_posts<S: KvStore>(query: &PostQuery<S>, posts: &[Post]) -> Result<usize, SeedError> {
    if let Some(index) = posts.iter().position(|post| post.id.trim().is_empty()) {
        return Err(SeedError::InvalidPost(format!(
            "post at index {} has an empty id",
            index
        )));
    }

    for post in posts {
        query.put_post(post)?;
    }

    info!(count = posts.len(), "seeded posts");
    Ok(posts.len())
}
