//! Blog posts over a pluggable key-value store.
//!
//! Posts live in a [`KvStore`] reached only through [`PostQuery`]. On top of
//! that sit a REST client (`client` feature), an axum server (`http`
//! feature), markdown rendering and the view models for the list and detail
//! pages.

pub mod config;
pub mod kv;
pub mod markdown;
pub mod post;
pub mod query;
pub mod seed;
pub mod view;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "http")]
pub mod logging;
#[cfg(feature = "http")]
pub mod server;

pub use config::{Config, ConfigError};
pub use kv::{InMemoryKvStore, KvError, KvStore};
pub use post::{AnalyzeResult, ErrorBody, NewPost, Post, PostList, PostPatch, ValidationError};
pub use query::{PostQuery, QueryConfig, QueryError};
pub use seed::SeedError;
pub use view::TagFilter;

#[cfg(feature = "client")]
pub use client::{ApiClient, ApiError, ClientConfig, ClientProfile};
