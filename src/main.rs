//! leafprobe CLI - Measures leaf retrieval latency over a content-addressed store
//!
//! Reads a JSON list of tree roots, samples random leaves of each tree
//! concurrently against a running store daemon, and writes the per-sample
//! and per-round latency series to the output directory.

use anyhow::Context;
use clap::Parser;
use leafprobe::{load_roots, HttpStore, Sampler, SamplerConfig, DEFAULT_API_URL};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "leafprobe")]
#[command(about = "Measures leaf retrieval latency over a content-addressed store")]
#[command(version)]
struct Cli {
    /// File with the CIDs (tree roots) to sample paths for
    #[arg(long, default_value = "testfiles/cids.json")]
    cids_file: PathBuf,

    /// Number of leaves per tree; a power of two, at most 256
    #[arg(long, default_value_t = 32)]
    num_leaves: u32,

    /// Number of samples per tree; each runs as its own task
    #[arg(long, default_value_t = 15)]
    num_samples: usize,

    /// Directory to save measurements to
    #[arg(long, default_value = "leafprobe-results")]
    out_dir: PathBuf,

    /// Store API endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    api: String,

    /// Seconds to pause between rounds (store cool-down)
    #[arg(long, default_value_t = 30)]
    round_pause: u64,

    /// Per-fetch deadline in seconds
    #[arg(long, default_value_t = 60)]
    fetch_timeout: u64,

    /// Seconds to wait before the first round
    #[arg(long, default_value_t = 0)]
    warmup: u64,

    /// Fixed RNG seed for reproducible path selection
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = SamplerConfig {
        leaf_count: cli.num_leaves,
        samples_per_round: cli.num_samples,
        fetch_timeout: Duration::from_secs(cli.fetch_timeout),
        round_pause: Duration::from_secs(cli.round_pause),
        warmup: Duration::from_secs(cli.warmup),
        seed: cli.seed,
    };

    let roots = load_roots(&cli.cids_file)?;
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("cannot create output directory {}", cli.out_dir.display()))?;

    info!(
        roots = roots.len(),
        leaves = cli.num_leaves,
        samples = cli.num_samples,
        api = %cli.api,
        "starting sampling run"
    );

    let sampler = Sampler::new(config, HttpStore::new(cli.api))?;
    let results = sampler.run(&roots).await?;
    results.flush(&cli.out_dir)?;

    info!(dir = %cli.out_dir.display(), "sampling run finished");
    Ok(())
}
