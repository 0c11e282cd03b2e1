//! Filesystem-backed asset registry.

use super::{AssetDescriptor, AssetError, AssetRegistry, optimize::optimize};
use crate::config::{ImagesConfig, SiteConfig};
use crate::debug;
use jwalk::WalkDir;
use rustc_hash::FxHashMap;
use std::path::{Component, Path, PathBuf};
use tokio::sync::OnceCell;

/// A registered image and its once-only optimization result.
#[derive(Debug)]
struct AssetEntry {
    source: PathBuf,
    resolved: OnceCell<AssetDescriptor>,
}

/// Registry over the configured image tree.
///
/// The tree is scanned once; nothing is optimized until a key is looked
/// up, and each key is optimized at most once however many posts use it.
#[derive(Debug)]
pub struct FsAssetRegistry {
    entries: FxHashMap<String, AssetEntry>,
    /// `{build.output}/{images.output}`
    out_dir: PathBuf,
    /// Site-relative form of `out_dir`, e.g. `/_assets`
    public_prefix: String,
}

impl FsAssetRegistry {
    /// Scan `images.dir` of a loaded config.
    pub fn scan(config: &SiteConfig) -> Self {
        Self::scan_dir(config.get_root(), &config.images, &config.build.output)
    }

    /// Scan `images.dir`, keying every accepted file by its path relative
    /// to `root` (`/src/images/cat.png`).
    pub fn scan_dir(root: &Path, images: &ImagesConfig, output: &Path) -> Self {
        let public_prefix = format!("/{}", path_to_key(&images.output));
        let out_dir = output.join(&images.output);

        let mut entries = FxHashMap::default();
        if images.dir.is_dir() {
            for entry in WalkDir::new(&images.dir)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                let path = entry.path();
                let accepted = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| images.accepts(ext));
                if !accepted {
                    continue;
                }

                let relative = path.strip_prefix(root).unwrap_or(&path);
                let key = format!("/{}", path_to_key(relative));
                entries.insert(
                    key,
                    AssetEntry {
                        source: path,
                        resolved: OnceCell::new(),
                    },
                );
            }
        } else {
            debug!("images"; "image directory {} does not exist", images.dir.display());
        }

        debug!("images"; "{} images registered", entries.len());
        Self {
            entries,
            out_dir,
            public_prefix,
        }
    }

    /// Registered keys, unordered.
    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl AssetRegistry for FsAssetRegistry {
    async fn lookup(&self, key: &str) -> Result<Option<AssetDescriptor>, AssetError> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };

        let descriptor = entry
            .resolved
            .get_or_try_init(|| optimize(&entry.source, &self.out_dir, &self.public_prefix))
            .await?;
        Ok(Some(descriptor.clone()))
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Join path components with `/` regardless of platform.
fn path_to_key(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
