//! TagFilter - in-memory tag selection over an already-fetched post list.

use crate::post::Post;

/// The selected tag, or no filter.
///
/// Changing the selection never refetches: [`TagFilter::apply`] filters the
/// full list it is given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    selected: Option<String>,
}

impl TagFilter {
    /// No filter.
    pub fn none() -> Self {
        Self::default()
    }

    /// Filter by `tag`. The empty string means no filter.
    pub fn tag(tag: impl Into<String>) -> Self {
        let mut filter = Self::none();
        filter.select(tag);
        filter
    }

    pub fn select(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        self.selected = if tag.is_empty() { None } else { Some(tag) };
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    /// Posts visible under this filter, in input order.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        match &self.selected {
            None => posts.iter().collect(),
            Some(tag) => posts.iter().filter(|post| post.has_tag(tag)).collect(),
        }
    }
}
