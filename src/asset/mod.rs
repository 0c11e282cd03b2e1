//! Image asset registry.
//!
//! # Module Structure
//!
//! ```text
//! asset/
//! ├── registry.rs   # FsAssetRegistry (scanned image tree, lazy optimization)
//! ├── optimize.rs   # dimensions + fingerprint + emit into the output tree
//! └── memory.rs     # StaticAssetRegistry (tests only)
//! ```
//!
//! Keys are project-rooted paths such as `/src/images/cat.png`. A lookup
//! yields the final site-relative `src` of the optimized asset, or `None`
//! when the key is not registered.

#[cfg(test)]
mod memory;
mod optimize;
mod registry;

#[cfg(test)]
pub use memory::StaticAssetRegistry;
#[cfg(test)]
pub(crate) use optimize::tests::write_png;
pub use registry::FsAssetRegistry;

use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// An optimized image ready to be referenced from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Site-relative address, e.g. `/_assets/cat.1a2b3c4d.png`
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl AssetDescriptor {
    pub fn new(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }
}

/// Failures while optimizing a registered asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("cannot read image dimensions of `{0}`")]
    Decode(PathBuf, #[source] image::ImageError),
}

/// Read-only mapping from normalized keys to lazily optimized assets.
///
/// Populated before the feed is built; concurrent lookups from many posts
/// are expected.
pub trait AssetRegistry: Sync {
    /// Resolve `key`. `Ok(None)` means the key is not registered.
    fn lookup(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<AssetDescriptor>, AssetError>> + Send;

    /// Whether `key` is registered, without optimizing it.
    fn contains(&self, key: &str) -> bool;

    /// Number of registered keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
