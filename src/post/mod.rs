//! Post - The blog post record and its wire shapes.
//!
//! A post is stored as one JSON document per key and travels over the REST
//! API in the same shape:
//!
//! ```json
//! { "id": "post-001", "title": "...", "body": "...", "publishdAt": null, "tags": ["rust"] }
//! ```
//!
//! The `publishdAt` spelling is part of the wire format and is kept as-is.

mod patch;
pub mod validation;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use patch::PostPatch;
pub use validation::ValidationError;

/// A blog post.
///
/// `published_at` is an ISO-8601 timestamp; `None` marks a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(rename = "publishdAt", default)]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Post {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            published_at: None,
            tags: None,
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn published(mut self, at: impl Into<String>) -> Self {
        self.published_at = Some(at.into());
        self
    }

    /// Tags in write order. Missing tags read as an empty slice.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    pub fn is_draft(&self) -> bool {
        self.published_at.is_none()
    }

    /// Apply a merge-patch: only the fields present in `patch` change.
    pub fn apply_patch(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(published_at) = patch.published_at {
            self.published_at = published_at;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

/// Sorted, duplicate-free union of the tags on `posts`.
pub fn tag_universe<'a, I>(posts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Post>,
{
    let tags: BTreeSet<&str> = posts
        .into_iter()
        .flat_map(|post| post.tags().iter().map(String::as_str))
        .collect();
    tags.into_iter().map(str::to_string).collect()
}

/// A post without an id, as sent to `POST /api/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(rename = "publishdAt", default)]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            published_at: None,
            tags: None,
        }
    }

    /// Trim title and body the way the editor form does before submitting.
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.body = self.body.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_title(&self.title)?;
        validation::validate_body(&self.body)
    }

    /// Attach an id, producing the stored record.
    pub fn into_post(self, id: impl Into<String>) -> Post {
        Post {
            id: id.into(),
            title: self.title,
            body: self.body,
            published_at: self.published_at,
            tags: self.tags,
        }
    }
}

/// Response of `GET /api/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostList {
    pub items: Vec<Post>,
}

/// Response of `POST /api/posts/{id}/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResult {
    pub id: String,
    pub analysis: String,
}

/// Error body returned by the API for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}
