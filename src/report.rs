//! Latency series aggregation and persistence
//!
//! Two series for the whole run: one duration per (round, sample) pair and
//! one per round. Both are pre-sized at construction and written out once
//! at the end; there is no mid-run persistence.

use crate::sample::FetchOutcome;
use crate::Result;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Latency recorded for a failed fetch: the maximum representable
/// duration, so failures keep their slot and stand out as extreme
/// outliers in the series.
pub const FAILED_SAMPLE_LATENCY: Duration = Duration::from_nanos(u64::MAX);

/// File name for the per-sample latency series
pub const SAMPLE_LATENCIES_FILE: &str = "sample_latencies.json";

/// File name for the per-round latency series
pub const ROUND_LATENCIES_FILE: &str = "round_latencies.json";

/// Accumulates both latency series for a run
///
/// The per-sample slot for (round, sample) is
/// `round_index * samples_per_round + sample_index`, where `sample_index`
/// is the fetch's launch index within its round. The series length is
/// always rounds × samples_per_round: failed fetches hold
/// [`FAILED_SAMPLE_LATENCY`] instead of being dropped.
pub struct ResultAggregator {
    sample_latencies: Vec<Duration>,
    round_latencies: Vec<Duration>,
    samples_per_round: usize,
}

impl ResultAggregator {
    pub fn new(rounds: usize, samples_per_round: usize) -> Self {
        ResultAggregator {
            sample_latencies: vec![FAILED_SAMPLE_LATENCY; rounds * samples_per_round],
            round_latencies: vec![Duration::ZERO; rounds],
            samples_per_round,
        }
    }

    /// Record one sample outcome at its (round, launch-index) slot.
    pub fn record_sample(
        &mut self,
        round_index: usize,
        sample_index: usize,
        outcome: &FetchOutcome,
    ) {
        let slot = round_index * self.samples_per_round + sample_index;
        self.sample_latencies[slot] = match outcome {
            FetchOutcome::Fetched(elapsed) => *elapsed,
            FetchOutcome::Failed(_) => FAILED_SAMPLE_LATENCY,
        };
    }

    /// Record a round's wall-clock span.
    pub fn record_round(&mut self, round_index: usize, elapsed: Duration) {
        self.round_latencies[round_index] = elapsed;
    }

    pub fn sample_latencies(&self) -> &[Duration] {
        &self.sample_latencies
    }

    pub fn round_latencies(&self) -> &[Duration] {
        &self.round_latencies
    }

    /// Write both series to `out_dir` as JSON arrays of nanoseconds.
    ///
    /// Either write failing fails the run.
    pub fn flush(&self, out_dir: &Path) -> Result<()> {
        write_series(&out_dir.join(SAMPLE_LATENCIES_FILE), &self.sample_latencies)?;
        write_series(&out_dir.join(ROUND_LATENCIES_FILE), &self.round_latencies)?;
        info!(dir = %out_dir.display(), "latency series written");
        Ok(())
    }
}

fn write_series(path: &Path, series: &[Duration]) -> Result<()> {
    let nanos: Vec<u64> = series.iter().map(duration_nanos).collect();
    let file = File::create(path)?;
    serde_json::to_writer(file, &nanos)?;
    Ok(())
}

/// Nanosecond rendering used in the artifacts, saturating at the sentinel.
fn duration_nanos(d: &Duration) -> u64 {
    d.as_nanos().min(u64::MAX as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_series_are_presized() {
        let agg = ResultAggregator::new(3, 5);
        assert_eq!(agg.sample_latencies().len(), 15);
        assert_eq!(agg.round_latencies().len(), 3);
    }

    #[test]
    fn test_record_sample_slot_arithmetic() {
        let mut agg = ResultAggregator::new(2, 3);
        agg.record_sample(1, 2, &FetchOutcome::Fetched(Duration::from_millis(7)));

        assert_eq!(agg.sample_latencies()[5], Duration::from_millis(7));
        // Untouched slots keep the sentinel
        assert_eq!(agg.sample_latencies()[0], FAILED_SAMPLE_LATENCY);
    }

    #[test]
    fn test_failed_sample_holds_sentinel() {
        let mut agg = ResultAggregator::new(1, 2);
        agg.record_sample(0, 0, &FetchOutcome::Fetched(Duration::from_millis(1)));
        agg.record_sample(0, 1, &FetchOutcome::Failed("boom".to_string()));

        assert_eq!(agg.sample_latencies()[0], Duration::from_millis(1));
        assert_eq!(agg.sample_latencies()[1], FAILED_SAMPLE_LATENCY);
    }

    #[test]
    fn test_record_round() {
        let mut agg = ResultAggregator::new(2, 1);
        agg.record_round(1, Duration::from_secs(3));
        assert_eq!(agg.round_latencies()[1], Duration::from_secs(3));
    }

    #[test]
    fn test_flush_writes_both_artifacts() {
        let dir = tempdir().unwrap();
        let mut agg = ResultAggregator::new(1, 2);
        agg.record_sample(0, 0, &FetchOutcome::Fetched(Duration::from_nanos(42)));
        agg.record_sample(0, 1, &FetchOutcome::Failed("boom".to_string()));
        agg.record_round(0, Duration::from_nanos(99));

        agg.flush(dir.path()).unwrap();

        let samples: Vec<u64> = serde_json::from_slice(
            &std::fs::read(dir.path().join(SAMPLE_LATENCIES_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(samples, vec![42, u64::MAX]);

        let rounds: Vec<u64> = serde_json::from_slice(
            &std::fs::read(dir.path().join(ROUND_LATENCIES_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(rounds, vec![99]);
    }

    #[test]
    fn test_flush_to_missing_dir_fails() {
        let agg = ResultAggregator::new(1, 1);
        let err = agg.flush(Path::new("/nonexistent/out")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
