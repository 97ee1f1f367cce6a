//! The retrieval boundary: a content-addressed store resolving leaf paths
//!
//! The sampling core only ever talks to [`LeafStore`]. Production runs use
//! [`HttpStore`] against a running store daemon; tests use [`MockStore`].

mod http;
mod mock;

pub use http::{HttpStore, DEFAULT_API_URL};
pub use mock::MockStore;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A leaf object as returned by the store.
///
/// Two fields, no further schema: the sampler only cares that the object
/// resolved and decoded.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LeafNode {
    /// Content hash of the leaf payload, as reported by the store
    #[serde(default)]
    pub hash: String,
    /// Opaque leaf payload
    #[serde(default)]
    pub data: String,
}

/// Trait for resolving a leaf path to its object
///
/// A leaf path is a root identifier plus one binary digit per tree level
/// (e.g. `bafy.../0/1/1`). Implementations report transport, decode, and
/// not-found conditions through the crate error taxonomy; they do not
/// retry.
#[async_trait]
pub trait LeafStore: Send + Sync {
    /// Get the leaf object at `path`.
    async fn get_leaf(&self, path: &str) -> Result<LeafNode>;
}
