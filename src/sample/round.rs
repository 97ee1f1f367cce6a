//! One round of concurrent leaf sampling against a single root
//!
//! A round fans out one task per sampled path, all launched before any
//! result is awaited, then drains exactly one result per task from a
//! bounded channel. Each task carries its launch index, so results slot
//! into launch order no matter when they arrive.

use crate::sample::{FetchOutcome, LeafFetcher, PathSampler};
use crate::store::LeafStore;
use crate::Result;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::info;

/// The recorded results of one completed round
#[derive(Clone, Debug)]
pub struct RoundReport {
    /// Root identifier the round sampled under
    pub root: String,
    /// Wall-clock span from fan-out start to the last drained result
    pub elapsed: Duration,
    /// One outcome per sample, indexed by launch order
    pub samples: Vec<FetchOutcome>,
}

impl RoundReport {
    /// Number of failed fetches in this round.
    pub fn failures(&self) -> usize {
        self.samples.iter().filter(|s| s.is_failed()).count()
    }
}

/// Orchestrates the fan-out and drain for one root
pub struct SamplingRound {
    root: String,
    leaf_count: u32,
    samples_per_round: usize,
}

impl SamplingRound {
    pub fn new(root: impl Into<String>, leaf_count: u32, samples_per_round: usize) -> Self {
        SamplingRound {
            root: root.into(),
            leaf_count,
            samples_per_round,
        }
    }

    /// Run the round to completion.
    ///
    /// Blocks until every launched fetch has reported; a failing fetch
    /// occupies its slot in the report and never aborts the round or its
    /// siblings. The path set lives only for this round.
    pub async fn run<S>(
        &self,
        sampler: &mut PathSampler,
        fetcher: &LeafFetcher<S>,
    ) -> Result<RoundReport>
    where
        S: LeafStore + 'static,
    {
        let paths = sampler.draw_distinct(&self.root, self.leaf_count, self.samples_per_round)?;
        let (tx, mut rx) = mpsc::channel(self.samples_per_round);

        let start = Instant::now();
        for (index, path) in paths.into_iter().enumerate() {
            let fetcher = fetcher.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = fetcher.fetch(&path).await;
                // The drain loop outlives the senders; a send only fails
                // if the round itself was dropped.
                let _ = tx.send((index, outcome)).await;
            });
        }
        drop(tx);

        let mut samples =
            vec![FetchOutcome::Failed("no result received".to_string()); self.samples_per_round];
        let mut received = 0;
        while received < self.samples_per_round {
            match rx.recv().await {
                Some((index, outcome)) => {
                    samples[index] = outcome;
                    received += 1;
                }
                // Every sender is gone; a task must have died without
                // reporting. Its slot keeps the failure marker.
                None => break,
            }
        }
        let elapsed = start.elapsed();

        info!(root = %self.root, ?elapsed, samples = self.samples_per_round, "round complete");
        Ok(RoundReport {
            root: self.root.clone(),
            elapsed,
            samples,
        })
    }
}
