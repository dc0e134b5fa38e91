//! View - Page view models built from posts.
//!
//! These carry exactly what the list and detail pages show. Layout and
//! styling belong to whatever renders them.

mod filter;

use std::fmt;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::markdown::{render_excerpt, render_full, EXCERPT_CHARS};
use crate::post::{tag_universe, Post};
use crate::query::{PostQuery, QueryError};
use crate::KvStore;

pub use filter::TagFilter;

/// `Published YYYY-MM-DD`, `Draft`, or the raw value if it is not RFC 3339.
pub fn publication_label(published_at: Option<&str>) -> String {
    match published_at {
        None => "Draft".to_string(),
        Some(raw) => match OffsetDateTime::parse(raw, &Rfc3339) {
            Ok(at) => format!("Published {}", at.date()),
            Err(_) => raw.to_string(),
        },
    }
}

pub fn post_href(id: &str) -> String {
    format!("/posts/{}", id)
}

/// A post as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub href: String,
    /// Flattened plain-text preview of the body.
    pub excerpt: String,
    pub publication: String,
    pub tags: Vec<String>,
}

impl PostCard {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            href: post_href(&post.id),
            excerpt: render_excerpt(&post.body, EXCERPT_CHARS),
            publication: publication_label(post.published_at.as_deref()),
            tags: post.tags().to_vec(),
        }
    }
}

/// A post as shown on its own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    /// Body rendered with the full markdown profile.
    pub body_html: String,
    pub publication: String,
    pub tags: Vec<String>,
}

impl PostDetail {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            body_html: render_full(&post.body),
            publication: publication_label(post.published_at.as_deref()),
            tags: post.tags().to_vec(),
        }
    }
}

/// The post listing with its tag filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    pub heading: String,
    pub selected_tag: Option<String>,
    /// Every known tag, for the filter list.
    pub all_tags: Vec<String>,
    pub cards: Vec<PostCard>,
}

impl HomePage {
    pub fn build(posts: &[Post], all_tags: Vec<String>, filter: &TagFilter) -> Self {
        let heading = match filter.selected() {
            Some(tag) => format!("Posts tagged \"{}\"", tag),
            None => "Latest posts".to_string(),
        };

        Self {
            heading,
            selected_tag: filter.selected().map(str::to_string),
            all_tags,
            cards: filter
                .apply(posts)
                .into_iter()
                .map(PostCard::from_post)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Why a page could not be built.
#[derive(Debug)]
pub enum PageError {
    /// Route to the not-found page.
    NotFound(String),
    Query(QueryError),
    #[cfg(feature = "client")]
    Api(crate::client::ApiError),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NotFound(id) => write!(f, "post not found: {}", id),
            PageError::Query(e) => write!(f, "{}", e),
            #[cfg(feature = "client")]
            PageError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::NotFound(_) => None,
            PageError::Query(e) => Some(e),
            #[cfg(feature = "client")]
            PageError::Api(e) => Some(e),
        }
    }
}

impl From<QueryError> for PageError {
    fn from(err: QueryError) -> Self {
        PageError::Query(err)
    }
}

impl PageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageError::NotFound(_))
    }
}

/// Home page from the store: every post, the tag universe, then `filter`.
pub fn home_page<S: KvStore>(query: &PostQuery<S>, filter: &TagFilter) -> Result<HomePage, PageError> {
    let posts = query.search_posts()?;
    let tags = tag_universe(&posts);
    Ok(HomePage::build(&posts, tags, filter))
}

/// Detail page from the store. A missing post is [`PageError::NotFound`].
pub fn detail_page<S: KvStore>(query: &PostQuery<S>, id: &str) -> Result<PostDetail, PageError> {
    match query.get_post(id)? {
        Some(post) => Ok(PostDetail::from_post(&post)),
        None => Err(PageError::NotFound(id.to_string())),
    }
}

/// Detail page over the REST API. A 404 from a server-profile client is
/// [`PageError::NotFound`].
#[cfg(feature = "client")]
pub async fn detail_page_from_api(
    api: &crate::client::ApiClient,
    id: &str,
) -> Result<PostDetail, PageError> {
    match api.get_post(id).await {
        Ok(post) => Ok(PostDetail::from_post(&post)),
        Err(e) if e.is_not_found() => Err(PageError::NotFound(id.to_string())),
        Err(e) => Err(PageError::Api(e)),
    }
}
