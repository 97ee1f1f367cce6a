//! Run configuration and root-list loading
//!
//! The CLI owns flag parsing; by the time a [`SamplerConfig`] reaches the
//! sampling core it must have passed [`SamplerConfig::validate`]. Both
//! hazards called out in the sampling design are killed here: unsupported
//! leaf counts and rounds that ask for more distinct paths than the tree
//! has leaves.

use crate::{Error, Result};
use std::path::Path;
use std::time::Duration;

/// Smallest supported tree (one level)
pub const MIN_LEAF_COUNT: u32 = 2;

/// Largest supported tree (eight levels)
pub const MAX_LEAF_COUNT: u32 = 256;

/// Parameters for a sampling run
#[derive(Clone, Debug)]
pub struct SamplerConfig {
    /// Leaves per tree; a power of two between 2 and 256
    pub leaf_count: u32,
    /// Concurrent fetches per round; at most `leaf_count`
    pub samples_per_round: usize,
    /// Deadline for a single fetch
    pub fetch_timeout: Duration,
    /// Store cool-down between consecutive rounds
    pub round_pause: Duration,
    /// Delay before the first round (lets a freshly started store settle)
    pub warmup: Duration,
    /// Fixed RNG seed for reproducible path selection
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            leaf_count: 32,
            samples_per_round: 15,
            fetch_timeout: Duration::from_secs(60),
            round_pause: Duration::from_secs(30),
            warmup: Duration::ZERO,
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// Check the invariants the sampling core relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.leaf_count.is_power_of_two()
            || !(MIN_LEAF_COUNT..=MAX_LEAF_COUNT).contains(&self.leaf_count)
        {
            return Err(Error::Config(format!(
                "invalid number of leaves {}: must be a power of two between {} and {}",
                self.leaf_count, MIN_LEAF_COUNT, MAX_LEAF_COUNT
            )));
        }
        if self.samples_per_round == 0 {
            return Err(Error::Config(
                "samples per round must be at least 1".to_string(),
            ));
        }
        if self.samples_per_round as u64 > self.leaf_count as u64 {
            return Err(Error::Config(format!(
                "samples per round ({}) exceeds leaf count ({}): a round cannot draw that many distinct paths",
                self.samples_per_round, self.leaf_count
            )));
        }
        Ok(())
    }

    /// Tree depth implied by the leaf count (binary digits per path).
    pub fn tree_depth(&self) -> usize {
        self.leaf_count.trailing_zeros() as usize
    }
}

/// Load the root identifier list: a JSON array of strings.
///
/// An unreadable or unparseable list is a fatal configuration error.
pub fn load_roots(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| {
        Error::Config(format!("cannot read CID list {}: {}", path.display(), e))
    })?;
    let roots: Vec<String> = serde_json::from_slice(&bytes).map_err(|e| {
        Error::Config(format!("cannot parse CID list {}: {}", path.display(), e))
    })?;
    Ok(roots)
}
