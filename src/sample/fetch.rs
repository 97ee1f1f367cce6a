//! Timed single-leaf retrieval

use crate::store::LeafStore;
use crate::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Outcome of a single leaf fetch
#[derive(Clone, Debug)]
pub enum FetchOutcome {
    /// The leaf arrived; carries the observed retrieval latency
    Fetched(Duration),
    /// The fetch failed; carries the error text for diagnostics
    Failed(String),
}

impl FetchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// The observed latency, if the fetch succeeded.
    pub fn latency(&self) -> Option<Duration> {
        match self {
            FetchOutcome::Fetched(elapsed) => Some(*elapsed),
            FetchOutcome::Failed(_) => None,
        }
    }
}

/// Performs one timed retrieval per call against the store.
///
/// Every call yields exactly one [`FetchOutcome`]: a store error or a
/// blown deadline becomes `Failed`, never a panic or a hang, so a round
/// draining results can always count on one message per launched fetch.
pub struct LeafFetcher<S> {
    store: Arc<S>,
    timeout: Duration,
}

impl<S> Clone for LeafFetcher<S> {
    fn clone(&self) -> Self {
        LeafFetcher {
            store: Arc::clone(&self.store),
            timeout: self.timeout,
        }
    }
}

impl<S: LeafStore> LeafFetcher<S> {
    pub fn new(store: Arc<S>, timeout: Duration) -> Self {
        LeafFetcher { store, timeout }
    }

    /// Retrieve the leaf at `path`, measuring wall-clock latency.
    ///
    /// No retries: a failure is reported as-is, wrapped with the attempted
    /// path.
    pub async fn fetch(&self, path: &str) -> FetchOutcome {
        debug!(path, "requesting leaf");
        let start = Instant::now();

        match tokio::time::timeout(self.timeout, self.store.get_leaf(path)).await {
            Ok(Ok(_leaf)) => {
                let elapsed = start.elapsed();
                debug!(path, ?elapsed, "leaf fetched");
                FetchOutcome::Fetched(elapsed)
            }
            Ok(Err(err)) => {
                warn!(path, %err, "leaf fetch failed");
                FetchOutcome::Failed(err.to_string())
            }
            Err(_) => {
                let err = Error::Timeout {
                    path: path.to_string(),
                    timeout: self.timeout,
                };
                warn!(path, %err, "leaf fetch timed out");
                FetchOutcome::Failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::render_path;
    use crate::store::MockStore;

    #[tokio::test]
    async fn test_fetch_success_reports_latency() {
        let store = Arc::new(MockStore::new().with_tree("root", 8));
        let fetcher = LeafFetcher::new(store, Duration::from_secs(5));

        let outcome = fetcher.fetch(&render_path("root", 8, 3)).await;
        assert!(outcome.latency().is_some());
    }

    #[tokio::test]
    async fn test_fetch_missing_leaf_fails() {
        let store = Arc::new(MockStore::new());
        let fetcher = LeafFetcher::new(store, Duration::from_secs(5));

        let outcome = fetcher.fetch("root/0/0/0").await;
        assert!(outcome.is_failed());
        match outcome {
            FetchOutcome::Failed(reason) => assert!(reason.contains("root/0/0/0")),
            FetchOutcome::Fetched(_) => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_fetch_injected_failure() {
        let path = render_path("root", 8, 0);
        let store = Arc::new(MockStore::new().with_tree("root", 8).with_failure(&path));
        let fetcher = LeafFetcher::new(store, Duration::from_secs(5));

        assert!(fetcher.fetch(&path).await.is_failed());
    }

    #[tokio::test]
    async fn test_fetch_deadline_yields_failure() {
        let store = Arc::new(
            MockStore::new()
                .with_tree("root", 8)
                .with_delay(Duration::from_millis(200)),
        );
        let fetcher = LeafFetcher::new(store, Duration::from_millis(10));

        let outcome = fetcher.fetch(&render_path("root", 8, 1)).await;
        assert!(outcome.is_failed());
        match outcome {
            FetchOutcome::Failed(reason) => assert!(reason.contains("timed out")),
            FetchOutcome::Fetched(_) => unreachable!(),
        }
    }
}
