//! Mock store for testing
//!
//! Serves fixture trees from memory, with per-path failure injection and
//! optional artificial latency. Fixture content is derived from the path
//! hash, so identical fixtures are reproducible across runs.

use super::{LeafNode, LeafStore};
use crate::sample::render_path;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// An in-memory [`LeafStore`] for tests
pub struct MockStore {
    leaves: HashMap<String, LeafNode>,
    failing: HashSet<String>,
    flaky_roots: Mutex<HashSet<String>>,
    delay: Option<Duration>,
}

impl MockStore {
    pub fn new() -> Self {
        MockStore {
            leaves: HashMap::new(),
            failing: HashSet::new(),
            flaky_roots: Mutex::new(HashSet::new()),
            delay: None,
        }
    }

    /// Populate every leaf path of a `leaf_count`-leaf tree under `root`.
    pub fn with_tree(mut self, root: &str, leaf_count: u32) -> Self {
        for index in 0..leaf_count {
            let path = render_path(root, leaf_count, index);
            let digest = blake3::hash(path.as_bytes());
            self.leaves.insert(
                path,
                LeafNode {
                    hash: digest.to_hex().to_string(),
                    data: format!("leaf-{}", index),
                },
            );
        }
        self
    }

    /// Make retrievals of `path` fail with a transport error.
    pub fn with_failure(mut self, path: impl Into<String>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Fail exactly the first retrieval under `root`, then behave
    /// normally. Drives the one-failure-per-round scenarios without
    /// knowing which paths a round will draw.
    pub fn with_flaky_root(self, root: impl Into<String>) -> Self {
        self.flaky_roots.lock().unwrap().insert(root.into());
        self
    }

    /// Delay every retrieval by `delay` (for timing-sensitive tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of leaves currently served.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeafStore for MockStore {
    async fn get_leaf(&self, path: &str) -> Result<LeafNode> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(path) {
            return Err(Error::Store {
                path: path.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        let root = path.split('/').next().unwrap_or(path);
        if self.flaky_roots.lock().unwrap().remove(root) {
            return Err(Error::Store {
                path: path.to_string(),
                reason: "injected one-shot failure".to_string(),
            });
        }
        self.leaves
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_covers_every_leaf() {
        let store = MockStore::new().with_tree("root", 16);
        assert_eq!(store.len(), 16);
    }

    #[tokio::test]
    async fn test_get_leaf_resolves_fixture_paths() {
        let store = MockStore::new().with_tree("root", 4);
        let leaf = store.get_leaf("root/1/0").await.unwrap();
        assert_eq!(leaf.data, "leaf-2");
        assert!(!leaf.hash.is_empty());
    }

    #[tokio::test]
    async fn test_get_leaf_not_found() {
        let store = MockStore::new().with_tree("root", 4);
        let err = store.get_leaf("other/0/0").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_flaky_root_fails_exactly_once() {
        let store = MockStore::new().with_tree("root", 4).with_flaky_root("root");

        assert!(store.get_leaf("root/0/1").await.is_err());
        assert!(store.get_leaf("root/0/1").await.is_ok());
        assert!(store.get_leaf("root/1/1").await.is_ok());
    }

    #[test]
    fn test_fixtures_are_reproducible() {
        let a = MockStore::new().with_tree("root", 8);
        let b = MockStore::new().with_tree("root", 8);
        for (path, leaf) in &a.leaves {
            assert_eq!(leaf.hash, b.leaves[path].hash);
        }
    }
}
