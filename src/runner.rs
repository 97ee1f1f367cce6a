//! Whole-run orchestration: sequential rounds over the root list

use crate::report::ResultAggregator;
use crate::sample::{LeafFetcher, PathSampler, SamplingRound};
use crate::store::LeafStore;
use crate::{Result, SamplerConfig};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::info;

/// Runs one sampling round per root, strictly in sequence
///
/// A round must fully drain before the next root's round begins; a
/// configurable cool-down pause separates consecutive rounds so the store
/// can settle between bursts.
pub struct Sampler<S> {
    config: SamplerConfig,
    store: Arc<S>,
}

impl<S: LeafStore + 'static> Sampler<S> {
    /// Build a sampler, validating the configuration up front.
    ///
    /// An unsupported leaf count or an over-subscribed round never starts
    /// sampling.
    pub fn new(config: SamplerConfig, store: S) -> Result<Self> {
        config.validate()?;
        Ok(Sampler {
            config,
            store: Arc::new(store),
        })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Sample every root and collect both latency series.
    pub async fn run(&self, roots: &[String]) -> Result<ResultAggregator> {
        let mut aggregator = ResultAggregator::new(roots.len(), self.config.samples_per_round);
        let mut sampler = match self.config.seed {
            Some(seed) => PathSampler::with_seed(seed),
            None => PathSampler::new(),
        };
        let fetcher = LeafFetcher::new(Arc::clone(&self.store), self.config.fetch_timeout);

        if !self.config.warmup.is_zero() {
            info!(warmup = ?self.config.warmup, "waiting before the first round");
            sleep(self.config.warmup).await;
        }

        for (round_index, root) in roots.iter().enumerate() {
            let round = SamplingRound::new(
                root.clone(),
                self.config.leaf_count,
                self.config.samples_per_round,
            );
            let report = round.run(&mut sampler, &fetcher).await?;

            for (sample_index, outcome) in report.samples.iter().enumerate() {
                aggregator.record_sample(round_index, sample_index, outcome);
            }
            aggregator.record_round(round_index, report.elapsed);
            info!(
                root = %root,
                elapsed = ?report.elapsed,
                failures = report.failures(),
                "round recorded"
            );

            // Cool-down between rounds, skipped after the last one
            if round_index + 1 < roots.len() && !self.config.round_pause.is_zero() {
                sleep(self.config.round_pause).await;
            }
        }

        Ok(aggregator)
    }
}
