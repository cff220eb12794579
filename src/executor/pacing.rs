//! Pause primitive used between units of simulated work.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

/// Suspends the executor for a requested duration.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Real wall-clock pauses on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Resolves immediately after yielding, recording what was requested.
#[derive(Debug, Default)]
pub struct InstantPacer {
    calls: AtomicU64,
    requested_nanos: AtomicU64,
}

impl InstantPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Sum of all requested pause durations.
    pub fn requested(&self) -> Duration {
        Duration::from_nanos(self.requested_nanos.load(Ordering::Relaxed))
    }
}

#[async_trait]
impl Pacer for InstantPacer {
    async fn pause(&self, duration: Duration) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.requested_nanos.fetch_add(nanos, Ordering::Relaxed);
        tokio::task::yield_now().await;
    }
}

#[async_trait]
impl<P: Pacer + ?Sized> Pacer for std::sync::Arc<P> {
    async fn pause(&self, duration: Duration) {
        (**self).pause(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[tokio::test]
    async fn test_instant_pacer_records_requests() {
        let pacer = InstantPacer::new();
        pacer.pause(Duration::from_millis(30)).await;
        pacer.pause(Duration::from_millis(20)).await;
        assert_eq!(pacer.calls(), 2);
        assert_eq!(pacer.requested(), Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_instant_pacer_does_not_sleep() {
        let pacer = InstantPacer::new();
        let started = Instant::now();
        pacer.pause(Duration::from_secs(60)).await;
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_tokio_pacer_sleeps() {
        let started = Instant::now();
        TokioPacer.pause(Duration::from_millis(20)).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_shared_pacer_counts_through_arc() {
        let pacer = Arc::new(InstantPacer::new());
        let shared = Arc::clone(&pacer);
        shared.pause(Duration::from_millis(1)).await;
        assert_eq!(pacer.calls(), 1);
    }
}
