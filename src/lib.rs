//! # leafprobe
//!
//! A latency sampler for Merkle-tree leaves in content-addressed stores.
//!
//! leafprobe measures how long it takes to retrieve randomly chosen leaves
//! of fixed-depth binary Merkle trees from a content-addressed store, as a
//! proxy for data availability sampling costs in a distributed storage
//! network. For each tree root it draws distinct random leaf paths, fetches
//! them concurrently, and records two latency series: one entry per fetch
//! and one entry per round.
//!
//! ## Core Concepts
//!
//! - **Leaf path**: a root identifier plus one binary digit per tree level,
//!   e.g. `bafy.../0/1/1` addresses one leaf of an 8-leaf tree
//! - **Round**: one batch of concurrent fetches against a single root;
//!   rounds run strictly in sequence
//! - **Sentinel latency**: a failed fetch keeps its slot in the series,
//!   holding the maximum representable duration
//!
//! ## Example
//!
//! ```ignore
//! use leafprobe::{HttpStore, Sampler, SamplerConfig};
//!
//! let sampler = Sampler::new(SamplerConfig::default(), HttpStore::local())?;
//! let results = sampler.run(&roots).await?;
//! results.flush(Path::new("leafprobe-results"))?;
//! ```

pub mod config;
pub mod report;
pub mod runner;
pub mod sample;
pub mod store;

mod error;

pub use config::{load_roots, SamplerConfig, MAX_LEAF_COUNT, MIN_LEAF_COUNT};
pub use error::{Error, Result};
pub use report::{ResultAggregator, FAILED_SAMPLE_LATENCY};
pub use runner::Sampler;
pub use sample::{render_path, FetchOutcome, LeafFetcher, PathSampler, RoundReport, SamplingRound};
pub use store::{HttpStore, LeafNode, LeafStore, MockStore, DEFAULT_API_URL};
