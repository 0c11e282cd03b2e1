//! In-memory registry for tests.

use super::{AssetDescriptor, AssetError, AssetRegistry};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed key → descriptor map that counts lookups.
#[derive(Debug, Default)]
pub struct StaticAssetRegistry {
    entries: FxHashMap<String, AssetDescriptor>,
    failing: FxHashSet<String>,
    lookups: AtomicUsize,
}

impl StaticAssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` with a 1x1 descriptor pointing at `src`.
    pub fn with(mut self, key: &str, src: &str) -> Self {
        self.entries
            .insert(key.to_string(), AssetDescriptor::new(src, 1, 1));
        self
    }

    /// Register `key` as an asset whose optimization fails.
    pub fn with_failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl AssetRegistry for StaticAssetRegistry {
    async fn lookup(&self, key: &str) -> Result<Option<AssetDescriptor>, AssetError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.failing.contains(key) {
            return Err(AssetError::Io(
                PathBuf::from(key),
                std::io::Error::other("optimization failed"),
            ));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key) || self.failing.contains(key)
    }

    fn len(&self) -> usize {
        self.entries.len() + self.failing.len()
    }
}
