//! Random leaf-path generation over fixed-depth binary trees
//!
//! A leaf path names one leaf of a binary Merkle tree: the root identifier
//! followed by one `/`-separated binary digit per tree level, most
//! significant first. For a 8-leaf tree, index 3 under `bafyroot` renders
//! as `bafyroot/0/1/1`.

use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Render the path addressing leaf `index` of a `leaf_count`-leaf tree.
///
/// The binary portion has exactly log2(leaf_count) digits, so index 0
/// renders with all leading zeros and index leaf_count-1 with all ones.
pub fn render_path(root: &str, leaf_count: u32, index: u32) -> String {
    let depth = leaf_count.trailing_zeros() as usize;
    let mut path = String::with_capacity(root.len() + depth * 2);
    path.push_str(root);
    for level in (0..depth).rev() {
        path.push('/');
        path.push(if index >> level & 1 == 1 { '1' } else { '0' });
    }
    path
}

/// Draws random leaf paths.
///
/// Holds its own RNG so a run can be made reproducible: two samplers built
/// with [`PathSampler::with_seed`] and the same seed draw identical path
/// sequences.
pub struct PathSampler {
    rng: StdRng,
}

impl PathSampler {
    /// Sampler seeded from OS entropy (production runs).
    pub fn new() -> Self {
        PathSampler {
            rng: StdRng::from_entropy(),
        }
    }

    /// Sampler with a fixed seed (reproducible runs).
    pub fn with_seed(seed: u64) -> Self {
        PathSampler {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one uniformly random leaf path under `root`.
    pub fn generate(&mut self, root: &str, leaf_count: u32) -> String {
        let index = self.rng.gen_range(0..leaf_count);
        render_path(root, leaf_count, index)
    }

    /// Draw one path not yet present in `seen`, recording it there.
    ///
    /// Retries until an unseen path comes up, so it never terminates once
    /// `seen` holds every path under the root. Callers must keep the
    /// number of draws per round at or below `leaf_count`; rounds use
    /// [`PathSampler::draw_distinct`], which checks this instead of
    /// looping.
    pub fn generate_distinct(
        &mut self,
        root: &str,
        leaf_count: u32,
        seen: &mut HashSet<String>,
    ) -> String {
        loop {
            let path = self.generate(root, leaf_count);
            if seen.insert(path.clone()) {
                return path;
            }
        }
    }

    /// Draw `n` distinct leaf paths under `root` without replacement.
    pub fn draw_distinct(&mut self, root: &str, leaf_count: u32, n: usize) -> Result<Vec<String>> {
        if n > leaf_count as usize {
            return Err(Error::Config(format!(
                "cannot draw {} distinct paths from a tree with {} leaves",
                n, leaf_count
            )));
        }
        let indices = rand::seq::index::sample(&mut self.rng, leaf_count as usize, n);
        Ok(indices
            .iter()
            .map(|i| render_path(root, leaf_count, i as u32))
            .collect())
    }
}

impl Default for PathSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse the binary portion of a path back into a leaf index.
    fn decode_index(path: &str, root: &str) -> u32 {
        let digits = path.strip_prefix(root).unwrap().strip_prefix('/').unwrap();
        digits
            .split('/')
            .fold(0, |acc, d| (acc << 1) | d.parse::<u32>().unwrap())
    }

    #[test]
    fn test_render_path_roundtrip_all_leaf_counts() {
        for leaf_count in [2u32, 4, 8, 16, 32, 64, 128, 256] {
            let depth = leaf_count.trailing_zeros() as usize;
            for index in 0..leaf_count {
                let path = render_path("root", leaf_count, index);
                let segments: Vec<_> = path.split('/').skip(1).collect();
                assert_eq!(segments.len(), depth, "wrong depth for {}", path);
                assert_eq!(decode_index(&path, "root"), index);
            }
        }
    }

    #[test]
    fn test_render_path_leading_zeros() {
        assert_eq!(render_path("r", 8, 0), "r/0/0/0");
        assert_eq!(render_path("r", 8, 7), "r/1/1/1");
        assert_eq!(render_path("r", 256, 1), "r/0/0/0/0/0/0/0/1");
        assert_eq!(render_path("r", 2, 1), "r/1");
    }

    #[test]
    fn test_generate_stays_in_range() {
        let mut sampler = PathSampler::with_seed(7);
        for _ in 0..100 {
            let path = sampler.generate("root", 16);
            assert!(decode_index(&path, "root") < 16);
        }
    }

    #[test]
    fn test_generate_distinct_covers_tree() {
        let mut sampler = PathSampler::with_seed(42);
        let mut seen = HashSet::new();
        for _ in 0..8 {
            let path = sampler.generate_distinct("root", 8, &mut seen);
            assert!(seen.contains(&path));
        }
        // 8 draws from an 8-leaf tree must exhaust it
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_draw_distinct_no_duplicates() {
        let mut sampler = PathSampler::with_seed(1);
        let paths = sampler.draw_distinct("root", 32, 32).unwrap();
        let unique: HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), 32);
    }

    #[test]
    fn test_draw_distinct_rejects_oversubscription() {
        let mut sampler = PathSampler::with_seed(1);
        let err = sampler.draw_distinct("root", 8, 9).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_seeded_sampler_is_deterministic() {
        let mut a = PathSampler::with_seed(99);
        let mut b = PathSampler::with_seed(99);

        for _ in 0..5 {
            assert_eq!(
                a.draw_distinct("root", 64, 10).unwrap(),
                b.draw_distinct("root", 64, 10).unwrap()
            );
        }
    }
}
