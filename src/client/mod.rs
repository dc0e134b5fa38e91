//! client - Typed REST client for the posts API.
//!
//! Requires the `client` feature (on by default). Uses reqwest.
//!
//! ## Profiles
//!
//! - [`ClientProfile::Browser`]: default HTTP caching; every non-2xx status,
//!   404 included, is a generic [`ApiError::Status`].
//! - [`ClientProfile::Server`]: sends `Cache-Control: no-store` so rendered
//!   pages always see fresh data, and reports 404 as [`ApiError::NotFound`]
//!   so the caller can render a not-found page instead of an error page.
//!
//! ## Example
//!
//! ```ignore
//! use blogkv::client::ApiClient;
//!
//! let api = ApiClient::server("http://127.0.0.1:8080")?;
//! match api.get_post("post-001").await {
//!     Ok(post) => render(post),
//!     Err(e) if e.is_not_found() => render_not_found(),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

mod error;

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::post::{AnalyzeResult, NewPost, Post, PostList, PostPatch};

pub use error::ApiError;

pub const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which rendering context the client serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientProfile {
    #[default]
    Browser,
    Server,
}

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and authority of the API host, e.g. `http://127.0.0.1:8080`.
    pub origin: String,
    pub profile: ClientProfile,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            profile: ClientProfile::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_profile(mut self, profile: ClientProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for `/api/posts` endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    profile: ClientProfile,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.origin)
            .map_err(|_| ApiError::InvalidOrigin(config.origin.clone()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidOrigin(config.origin));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base,
            profile: config.profile,
        })
    }

    /// Client with the browser profile.
    pub fn browser(origin: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(ClientConfig::new(origin).with_profile(ClientProfile::Browser))
    }

    /// Client with the server profile.
    pub fn server(origin: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(ClientConfig::new(origin).with_profile(ClientProfile::Server))
    }

    pub fn profile(&self) -> ClientProfile {
        self.profile
    }

    /// `GET /api/posts`
    pub async fn list_posts(&self) -> Result<PostList, ApiError> {
        let req = self.request(Method::GET, &["posts"])?;
        self.send_json(req).await
    }

    /// `GET /api/posts/{id}`
    pub async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let req = self.request(Method::GET, &["posts", id])?;
        self.send_json(req).await
    }

    /// `POST /api/posts`
    ///
    /// Title and body are trimmed and validated first; invalid input fails
    /// without a request.
    pub async fn create_post(&self, post: NewPost) -> Result<Post, ApiError> {
        let post = post.trimmed();
        post.validate()?;

        let req = self.request(Method::POST, &["posts"])?.json(&post);
        self.send_json(req).await
    }

    /// `PATCH /api/posts/{id}` with merge-patch semantics.
    pub async fn update_post(&self, id: &str, patch: &PostPatch) -> Result<Post, ApiError> {
        patch.validate()?;

        let body = serde_json::to_vec(patch).map_err(|e| ApiError::Decode(e.to_string()))?;
        let req = self
            .request(Method::PATCH, &["posts", id])?
            .header(CONTENT_TYPE, MERGE_PATCH_CONTENT_TYPE)
            .body(body);
        self.send_json(req).await
    }

    /// `DELETE /api/posts/{id}`
    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, &["posts", id])?;
        self.send(req).await.map(|_| ())
    }

    /// `POST /api/posts/{id}/analyze`
    pub async fn analyze_post(&self, id: &str) -> Result<AnalyzeResult, ApiError> {
        let req = self.request(Method::POST, &["posts", id, "analyze"])?;
        self.send_json(req).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidOrigin(self.base.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        let req = self.http.request(method, url);
        Ok(match self.profile {
            ClientProfile::Browser => req,
            ClientProfile::Server => req.header(CACHE_CONTROL, "no-store"),
        })
    }

    async fn send(&self, req: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_string();
        let body = resp.bytes().await.unwrap_or_default();
        debug!(%status, path = %path, "api request failed");
        Err(ApiError::from_response(self.profile, status, &path, &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = self.send(req).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
