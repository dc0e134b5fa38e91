//! PostPatch - merge-patch update body (`application/merge-patch+json`).

use serde::{Deserialize, Deserializer, Serialize};

use super::validation::{self, ValidationError};

/// Fields to change on an existing post. Absent fields are left untouched.
///
/// `published_at` and `tags` distinguish three states: absent (`None`),
/// explicitly cleared (`Some(None)`, serialized as `null`) and set
/// (`Some(Some(_))`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(
        rename = "publishdAt",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Option<Vec<String>>>,
}

/// Wraps whatever is present (including `null`) in `Some`, so a missing
/// field stays `None` via `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl PostPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn publish_at(mut self, at: impl Into<String>) -> Self {
        self.published_at = Some(Some(at.into()));
        self
    }

    /// Clear the publication date, turning the post back into a draft.
    pub fn unpublish(mut self) -> Self {
        self.published_at = Some(None);
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(Some(tags.into_iter().map(Into::into).collect()));
        self
    }

    /// Remove every tag from the post.
    pub fn clear_tags(mut self) -> Self {
        self.tags = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.published_at.is_none()
            && self.tags.is_none()
    }

    /// Validate the supplied fields only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validation::validate_title(title)?;
        }
        if let Some(body) = &self.body {
            validation::validate_body(body)?;
        }
        Ok(())
    }
}
