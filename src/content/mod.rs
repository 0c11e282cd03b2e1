//! Authored posts and the collections they live in.
//!
//! # Module Structure
//!
//! ```text
//! content/
//! ├── frontmatter.rs  # YAML (---) / TOML (+++) frontmatter extraction
//! ├── slug.rs         # File name → slug
//! └── store.rs        # FsContentStore (directory-backed collections)
//! ```
//!
//! The feed only ever sees [`Post`] values handed out by a [`ContentStore`].

pub mod frontmatter;
mod slug;
mod store;

pub use slug::slugify;
pub use store::FsContentStore;

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Structured metadata of a post.
///
/// `title`, `date` and `draft` form the collection schema. Every other
/// frontmatter key lands in `extra` and never reaches the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostMeta {
    pub title: String,
    pub date: String,
    pub draft: bool,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// One authored article.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Unique within its collection, derived from the file name
    pub slug: String,
    /// Raw Markdown, frontmatter removed
    pub body: String,
    pub meta: PostMeta,
}

impl Post {
    pub fn new(slug: impl Into<String>, body: impl Into<String>, meta: PostMeta) -> Self {
        Self {
            slug: slug.into(),
            body: body.into(),
            meta,
        }
    }
}

/// Read-only source of posts, grouped into named collections.
pub trait ContentStore {
    /// All posts of `name` in collection order.
    fn collection(&self, name: &str) -> Result<Vec<Post>, ContentError>;
}

/// Content loading errors. All of them abort the build.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` has no frontmatter (expected a `---` or `+++` block)")]
    MissingFrontmatter(PathBuf),

    #[error("invalid frontmatter in `{path}`: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("`{path}`: required field `{field}` is missing")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("`{path}`: field `{field}` must be a {expected}")]
    FieldType {
        path: PathBuf,
        field: &'static str,
        expected: &'static str,
    },

    #[error("`{0}`: file name does not produce a usable slug")]
    EmptySlug(PathBuf),

    #[error("duplicate slug `{slug}`: `{first}` and `{second}`")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
