//! Query - The single access point to the post store.
//!
//! `PostQuery` owns the store handle it is given and is the only code that
//! reads or writes it. Pages, the API server and the seeder all go through
//! it.
//!
//! ## Example
//!
//! ```ignore
//! use blogkv::{InMemoryKvStore, PostQuery};
//!
//! let query = PostQuery::new(InMemoryKvStore::new());
//! query.put_post(&Post::new("p1", "A", "x").with_tags(["go", "rust"]))?;
//!
//! let tags = query.all_tags()?;           // ["go", "rust"]
//! let go = query.search_posts_by_tag("go")?;
//! let missing = query.get_post("nope")?;  // None
//! ```

mod error;
mod fetch;

use tracing::{debug, warn};

use crate::kv::KvStore;
use crate::post::{self, Post};

pub use error::QueryError;

pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// Tuning for listing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Upper bound on simultaneous point reads during a listing.
    pub fetch_concurrency: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}

impl QueryConfig {
    pub fn with_fetch_concurrency(mut self, fetch_concurrency: usize) -> Self {
        self.fetch_concurrency = fetch_concurrency.max(1);
        self
    }
}

/// Read and write access to posts stored one JSON document per key.
pub struct PostQuery<S> {
    store: S,
    config: QueryConfig,
}

impl<S: KvStore> PostQuery<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, QueryConfig::default())
    }

    pub fn with_config(store: S, config: QueryConfig) -> Self {
        let config = QueryConfig {
            fetch_concurrency: config.fetch_concurrency.max(1),
        };
        Self { store, config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Fetch one post. `Ok(None)` when no record exists for `id`.
    pub fn get_post(&self, id: &str) -> Result<Option<Post>, QueryError> {
        let bytes = self.store.get(id).map_err(|e| {
            warn!(id, error = %e, "failed to read post");
            QueryError::from(e)
        })?;

        match bytes {
            Some(bytes) => decode(id, &bytes).map(Some).map_err(|e| {
                warn!(id, error = %e, "stored post is malformed");
                e
            }),
            None => Ok(None),
        }
    }

    /// Every post, in the store's key-listing order.
    ///
    /// Point reads run on a bounded worker pool. Keys deleted between the
    /// listing and the read are dropped, as are records that fail to decode.
    pub fn search_posts(&self) -> Result<Vec<Post>, QueryError> {
        let keys = self.store.list_keys().map_err(|e| {
            warn!(error = %e, "failed to list post keys");
            QueryError::from(e)
        })?;

        debug!(
            keys = keys.len(),
            workers = self.config.fetch_concurrency,
            "fetching posts"
        );

        let fetched = fetch::fetch_ordered(&keys, self.config.fetch_concurrency, |key| {
            match self.get_post(key) {
                Ok(post) => Ok(post),
                Err(QueryError::Malformed { .. }) => Ok(None),
                Err(e) => Err(e),
            }
        })?;

        Ok(fetched.into_iter().flatten().collect())
    }

    /// Posts carrying `tag` (exact, case-sensitive), in key-listing order.
    pub fn search_posts_by_tag(&self, tag: &str) -> Result<Vec<Post>, QueryError> {
        let mut posts = self.search_posts()?;
        posts.retain(|post| post.has_tag(tag));
        Ok(posts)
    }

    /// Sorted, duplicate-free union of every post's tags.
    ///
    /// Recomputed from a full scan on every call.
    pub fn all_tags(&self) -> Result<Vec<String>, QueryError> {
        let posts = self.search_posts()?;
        Ok(post::tag_universe(&posts))
    }

    /// Store `post` under its id, replacing any existing record.
    pub fn put_post(&self, post: &Post) -> Result<(), QueryError> {
        let bytes = serde_json::to_vec(post).map_err(|e| QueryError::Encode(e.to_string()))?;
        self.store.put(&post.id, bytes).map_err(|e| {
            warn!(id = %post.id, error = %e, "failed to write post");
            QueryError::from(e)
        })
    }

    /// Delete the post stored under `id`. Returns true if it existed.
    pub fn delete_post(&self, id: &str) -> Result<bool, QueryError> {
        self.store.delete(id).map_err(|e| {
            warn!(id, error = %e, "failed to delete post");
            QueryError::from(e)
        })
    }
}

fn decode(key: &str, bytes: &[u8]) -> Result<Post, QueryError> {
    serde_json::from_slice(bytes).map_err(|e| QueryError::Malformed {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
