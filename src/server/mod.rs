//! HTTP API for posts.
//!
//! Requires the `http` feature. Uses axum for routing; store calls run on
//! tokio's blocking pool.
//!
//! ## Routes
//!
//! - `GET /api/posts`: `{ "items": [Post] }` in key-listing order.
//! - `GET /api/posts/:id`: the post, or 404.
//! - `POST /api/posts`: body is a post without id; title and body are
//!   trimmed, then validated. Returns the created post.
//! - `PATCH /api/posts/:id`: merge-patch body; returns the updated post.
//! - `DELETE /api/posts/:id`: 204, or 404.
//! - `POST /api/posts/:id/analyze`: `{ "id", "analysis" }`, or 404.
//! - `GET /health`: `{ "ok": true }`.
//!
//! Errors are `{ "code": <status>, "message": "..." }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blogkv::{server, InMemoryKvStore, PostQuery};
//!
//! let query = Arc::new(PostQuery::new(InMemoryKvStore::new()));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! server::serve(query, listener, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await?;
//! ```

mod error;

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;
use uuid::Uuid;

use crate::post::{AnalyzeResult, NewPost, Post, PostList, PostPatch};
use crate::query::{PostQuery, QueryError};
use crate::KvStore;

pub use error::ServerError;

type Shared<S> = Arc<PostQuery<S>>;

/// Build an axum `Router` serving the posts API from `query`.
pub fn router<S: KvStore + 'static>(query: Shared<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/posts", get(list_posts::<S>).post(create_post::<S>))
        .route(
            "/api/posts/:id",
            get(get_post::<S>)
                .patch(update_post::<S>)
                .delete(delete_post::<S>),
        )
        .route("/api/posts/:id/analyze", post(analyze_post::<S>))
        .with_state(query)
}

/// Serve the API on `listener` until `shutdown` resolves, then drain
/// in-flight requests.
pub async fn serve<S, F>(query: Shared<S>, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    S: KvStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    info!(addr = %listener.local_addr()?, "serving posts api");
    axum::serve(listener, router(query))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Run a store operation on the blocking pool.
async fn blocking<S, T, F>(query: &Shared<S>, op: F) -> Result<T, ServerError>
where
    S: KvStore + 'static,
    T: Send + 'static,
    F: FnOnce(&PostQuery<S>) -> Result<T, QueryError> + Send + 'static,
{
    let query = Arc::clone(query);
    tokio::task::spawn_blocking(move || op(&query))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(ServerError::from)
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServerError> {
    serde_json::from_slice(body).map_err(|e| ServerError::BadRequest(e.to_string()))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn list_posts<S: KvStore + 'static>(
    State(query): State<Shared<S>>,
) -> Result<Json<PostList>, ServerError> {
    let items = blocking(&query, |q| q.search_posts()).await?;
    Ok(Json(PostList { items }))
}

async fn get_post<S: KvStore + 'static>(
    State(query): State<Shared<S>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ServerError> {
    blocking(&query, move |q| q.get_post(&id))
        .await?
        .map(Json)
        .ok_or(ServerError::NotFound)
}

async fn create_post<S: KvStore + 'static>(
    State(query): State<Shared<S>>,
    body: Bytes,
) -> Result<impl IntoResponse, ServerError> {
    let new_post = parse_body::<NewPost>(&body)?.trimmed();
    new_post.validate()?;

    let post = new_post.into_post(Uuid::new_v4().to_string());
    let stored = post.clone();
    blocking(&query, move |q| q.put_post(&stored)).await?;

    info!(id = %post.id, "created post");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post<S: KvStore + 'static>(
    State(query): State<Shared<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Post>, ServerError> {
    let patch: PostPatch = parse_body(&body)?;
    patch.validate()?;

    let updated = blocking(&query, move |q| {
        let Some(mut post) = q.get_post(&id)? else {
            return Ok(None);
        };
        post.apply_patch(patch);
        q.put_post(&post)?;
        Ok(Some(post))
    })
    .await?;

    updated.map(Json).ok_or(ServerError::NotFound)
}

async fn delete_post<S: KvStore + 'static>(
    State(query): State<Shared<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    if blocking(&query, move |q| q.delete_post(&id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound)
    }
}

async fn analyze_post<S: KvStore + 'static>(
    State(query): State<Shared<S>>,
    Path(id): Path<String>,
) -> Result<Json<AnalyzeResult>, ServerError> {
    let post = blocking(&query, move |q| q.get_post(&id))
        .await?
        .ok_or(ServerError::NotFound)?;

    Ok(Json(AnalyzeResult {
        analysis: format!("Analysis for post {}: This is a sample analysis.", post.id),
        id: post.id,
    }))
}
