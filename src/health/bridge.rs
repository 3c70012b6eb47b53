//! Callback-to-stream bridge for monitoring callers.
//!
//! # Responsibilities
//! - Trigger one probe per subscription
//! - Deliver exactly one result, then end the stream
//! - Report a dropped completion as a DOWN result instead of hanging
//!
//! # Design Decisions
//! - A oneshot channel is the single-slot buffer between callback and stream
//! - No mid-flight cancellation: dropping the subscription discards the
//!   result, the request itself runs to completion in the transport

use futures_util::stream::{FusedStream, Stream, StreamExt};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

use crate::error::TransportError;
use crate::health::probe::HealthProbe;
use crate::health::result::HealthResult;
use crate::observability::metrics;

/// Single-shot health check as consumed by a monitoring collaborator.
pub trait HealthIndicator: Send + Sync {
    fn name(&self) -> &str;

    /// Start a check and return its one-result stream.
    fn result(&self) -> HealthSubscription;
}

/// Adapts [`HealthProbe`]'s callback completion into a [`HealthSubscription`].
#[derive(Debug, Clone)]
pub struct HealthBridge {
    probe: HealthProbe,
}

impl HealthBridge {
    pub fn new(probe: HealthProbe) -> Self {
        Self { probe }
    }

    /// Issue one check now.
    pub fn subscribe(&self) -> HealthSubscription {
        let (tx, rx) = oneshot::channel();
        self.probe.check_health(move |result| {
            // The receiver may be gone if the caller lost interest.
            let _ = tx.send(result);
        });
        HealthSubscription {
            name: self.probe.name().to_string(),
            rx: Some(rx),
        }
    }

    /// Issue one check and wait for its result.
    pub async fn check(&self) -> HealthResult {
        self.subscribe().result().await
    }
}

impl HealthIndicator for HealthBridge {
    fn name(&self) -> &str {
        self.probe.name()
    }

    fn result(&self) -> HealthSubscription {
        self.subscribe()
    }
}

/// Stream yielding exactly one [`HealthResult`], then `None`.
#[derive(Debug)]
pub struct HealthSubscription {
    name: String,
    rx: Option<oneshot::Receiver<HealthResult>>,
}

impl HealthSubscription {
    /// Wait for the terminal result.
    pub async fn result(mut self) -> HealthResult {
        match self.next().await {
            Some(result) => result,
            None => HealthResult::failed(&self.name, TransportError::Dropped),
        }
    }
}

impl Stream for HealthSubscription {
    type Item = HealthResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(rx) = self.rx.as_mut() else {
            return Poll::Ready(None);
        };

        let result = match Pin::new(rx).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(Ok(result)) => result,
            Poll::Ready(Err(_)) => {
                tracing::warn!(indicator = %self.name, "Health probe completion dropped without a result");
                let result = HealthResult::failed(&self.name, TransportError::Dropped);
                metrics::record_health(&self.name, result.status());
                result
            }
        };

        self.rx = None;
        Poll::Ready(Some(result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.rx.is_some());
        (remaining, Some(remaining))
    }
}

impl FusedStream for HealthSubscription {
    fn is_terminated(&self) -> bool {
        self.rx.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthStatus;
    use crate::transport::{ClusterHealthApi, HealthCallback};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Completes on a separate thread after a short delay.
    struct ThreadedApi {
        outcome: Result<Value, TransportError>,
        calls: AtomicUsize,
    }

    impl ClusterHealthApi for ThreadedApi {
        fn cluster_health(&self, on_complete: HealthCallback) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                on_complete(outcome);
            });
        }
    }

    /// Drops the callback without calling it.
    struct DroppingApi;

    impl ClusterHealthApi for DroppingApi {
        fn cluster_health(&self, on_complete: HealthCallback) {
            drop(on_complete);
        }
    }

    /// Holds the callback until released by the test.
    #[derive(Default)]
    struct ParkedApi {
        parked: Mutex<Option<HealthCallback>>,
    }

    impl ClusterHealthApi for ParkedApi {
        fn cluster_health(&self, on_complete: HealthCallback) {
            *self.parked.lock().unwrap() = Some(on_complete);
        }
    }

    fn bridge(api: Arc<dyn ClusterHealthApi>) -> HealthBridge {
        HealthBridge::new(HealthProbe::new("search", api))
    }

    async fn collect(subscription: HealthSubscription) -> Vec<HealthResult> {
        subscription.collect().await
    }

    #[tokio::test]
    async fn test_exactly_one_result_on_success() {
        let api = Arc::new(ThreadedApi {
            outcome: Ok(json!({"cluster_name": "c", "status": "green"})),
            calls: AtomicUsize::new(0),
        });
        let results = collect(bridge(api.clone()).subscribe()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status(), HealthStatus::Up);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exactly_one_result_on_transport_failure() {
        let api = Arc::new(ThreadedApi {
            outcome: Err(TransportError::Connect {
                node: "http://search-1:9200".into(),
                message: "connection refused".into(),
            }),
            calls: AtomicUsize::new(0),
        });
        let results = collect(bridge(api).subscribe()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status(), HealthStatus::Down);
        assert!(results[0].cause().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_exactly_one_result_on_detail_failure() {
        let api = Arc::new(ThreadedApi {
            outcome: Ok(json!({"status": ["green"]})),
            calls: AtomicUsize::new(0),
        });
        let results = collect(bridge(api).subscribe()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status(), HealthStatus::Down);
        assert!(results[0].cause().is_some());
    }

    #[tokio::test]
    async fn test_dropped_completion_still_yields_one_result() {
        let mut subscription = bridge(Arc::new(DroppingApi)).subscribe();

        let first = subscription.next().await.unwrap();
        assert_eq!(first.status(), HealthStatus::Down);
        assert_eq!(first.cause(), Some("Health probe completion was dropped"));
        assert!(subscription.is_terminated());
        assert!(subscription.next().await.is_none());
        assert!(subscription.next().await.is_none());
    }

    #[tokio::test]
    async fn test_each_subscription_triggers_its_own_check() {
        let api = Arc::new(ThreadedApi {
            outcome: Ok(json!({"status": "yellow"})),
            calls: AtomicUsize::new(0),
        });
        let indicator = bridge(api.clone());

        let (a, b) = tokio::join!(indicator.check(), indicator.result().result());
        assert_eq!(a.status(), HealthStatus::Up);
        assert_eq!(b.status(), HealthStatus::Up);
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_abandoned_subscription_does_not_block_completion() {
        let api = Arc::new(ParkedApi::default());
        let subscription = bridge(api.clone()).subscribe();
        drop(subscription);

        let callback = api.parked.lock().unwrap().take().unwrap();
        // Completing after the caller left is a silent no-op.
        callback(Ok(json!({"status": "green"})));
    }

    #[tokio::test]
    async fn test_pending_until_completion() {
        let api = Arc::new(ParkedApi::default());
        let mut subscription = bridge(api.clone()).subscribe();
        assert_eq!(subscription.size_hint(), (1, Some(1)));

        let pending = tokio::time::timeout(Duration::from_millis(20), subscription.next()).await;
        assert!(pending.is_err());

        let callback = api.parked.lock().unwrap().take().unwrap();
        callback(Ok(json!({"status": "red"})));

        let result = subscription.next().await.unwrap();
        assert_eq!(result.status(), HealthStatus::Down);
        assert!(subscription.next().await.is_none());
        assert_eq!(subscription.size_hint(), (0, Some(0)));
    }
}
