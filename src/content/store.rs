//! Directory-backed content collections.
//!
//! A collection is a directory under the content root (`src/content/blog`).
//! Each Markdown file in it (recursively) is one post; the slug is the
//! slugified path relative to the collection without extension.
//! Files and directories starting with `_` or `.` are skipped.

use super::{ContentError, ContentStore, Post, PostMeta, frontmatter, slugify};
use crate::debug;
use crate::log;
use jwalk::WalkDir;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Markdown file extensions recognized as posts.
const POST_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Content store reading collections from `{root}/{name}/`.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Post source files of a collection directory, sorted by path.
    fn source_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<_> = WalkDir::new(dir)
            .skip_hidden(false)
            .process_read_dir(|_, _, _, children| {
                children.retain(|entry| {
                    entry.as_ref().is_ok_and(|e| {
                        let name = e.file_name().to_string_lossy();
                        !name.starts_with('_') && !name.starts_with('.')
                    })
                });
            })
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|p| is_post_file(p))
            .collect();
        files.sort();
        files
    }

    /// Read and validate a single post.
    fn load_post(dir: &Path, path: &Path) -> Result<Post, ContentError> {
        let content =
            fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;

        let fm = frontmatter::extract(&content)
            .map_err(|message| ContentError::Frontmatter {
                path: path.to_path_buf(),
                message,
            })?
            .ok_or_else(|| ContentError::MissingFrontmatter(path.to_path_buf()))?;

        let slug = post_slug(dir, path);
        if slug.is_empty() || slug.split('/').any(str::is_empty) {
            return Err(ContentError::EmptySlug(path.to_path_buf()));
        }

        let meta = parse_meta(path, fm.fields)?;
        Ok(Post::new(slug, fm.body, meta))
    }
}

impl ContentStore for FsContentStore {
    fn collection(&self, name: &str) -> Result<Vec<Post>, ContentError> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            log!("warning"; "collection `{}` not found at {}", name, dir.display());
            return Ok(Vec::new());
        }

        let files = Self::source_files(&dir);
        debug!("content"; "{} files in collection `{}`", files.len(), name);

        // Order of `files` is kept by the indexed parallel collect
        let posts: Vec<(PathBuf, Post)> = files
            .into_par_iter()
            .map(|path| Self::load_post(&dir, &path).map(|post| (path, post)))
            .collect::<Result<_, _>>()?;

        let mut seen: FxHashMap<&str, &Path> = FxHashMap::default();
        for (path, post) in &posts {
            if let Some(first) = seen.insert(&post.slug, path) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug.clone(),
                    first: first.to_path_buf(),
                    second: path.clone(),
                });
            }
        }

        Ok(posts.into_iter().map(|(_, post)| post).collect())
    }
}

fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| POST_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// `blog/2024/Hello World.md` → `2024/hello-world`
fn post_slug(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| slugify(&c.as_os_str().to_string_lossy()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Enforce the collection schema: `title` and `date` strings, optional
/// boolean `draft`. Everything else goes to `extra`.
fn parse_meta(path: &Path, mut fields: Map<String, Value>) -> Result<PostMeta, ContentError> {
    let title = required_string(path, &mut fields, "title")?;
    let date = required_string(path, &mut fields, "date")?;
    let draft = match fields.remove("draft") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(_) => {
            return Err(ContentError::FieldType {
                path: path.to_path_buf(),
                field: "draft",
                expected: "boolean",
            });
        }
    };

    Ok(PostMeta {
        title,
        date,
        draft,
        extra: fields,
    })
}

fn required_string(
    path: &Path,
    fields: &mut Map<String, Value>,
    field: &'static str,
) -> Result<String, ContentError> {
    match fields.remove(field) {
        Some(Value::String(s)) => Ok(s),
        None | Some(Value::Null) => Err(ContentError::MissingField {
            path: path.to_path_buf(),
            field,
        }),
        Some(_) => Err(ContentError::FieldType {
            path: path.to_path_buf(),
            field,
            expected: "string",
        }),
    }
}
