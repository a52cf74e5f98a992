//! Request throttle shared by every outbound call of one client.
//!
//! The provider enforces a single per-client rate limit, so catalog, price
//! and history requests all queue on the same gate.

use async_lock::Mutex;
use std::sync::Mutex as SyncMutex;
use std::time::{Duration, Instant};

/// Serialized gate enforcing a minimum spacing between request dispatches.
#[derive(Debug)]
pub struct ThrottleGate {
    spacing: Duration,
    /// Held by the caller currently waiting for its slot.
    turn: Mutex<()>,
    /// Dispatch time of the most recent attempt, retries included.
    last_dispatch: SyncMutex<Option<Instant>>,
}

impl ThrottleGate {
    pub fn new(spacing: Duration) -> Self {
        Self {
            spacing,
            turn: Mutex::new(()),
            last_dispatch: SyncMutex::new(None),
        }
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    /// Wait until `spacing` has passed since the last dispatch, then claim the
    /// slot. Callers are served one at a time; every attempt of every request
    /// goes through here.
    pub async fn acquire(&self) {
        let _turn = self.turn.lock().await;
        if let Some(wait) = self.remaining() {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "Throttling request");
            futures_timer::Delay::new(wait).await;
        }
        self.stamp();
    }

    fn stamp(&self) {
        *self.last_dispatch.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }

    /// Time left before the next dispatch is allowed.
    pub fn remaining(&self) -> Option<Duration> {
        let last = *self.last_dispatch.lock().unwrap_or_else(|e| e.into_inner());
        let elapsed = last?.elapsed();
        if elapsed < self.spacing {
            Some(self.spacing - elapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_acquire_does_not_wait() {
        let gate = ThrottleGate::new(Duration::from_secs(5));
        let start = Instant::now();
        gate.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_second_acquire_waits_for_spacing() {
        let gate = ThrottleGate::new(Duration::from_millis(150));
        gate.acquire().await;
        let start = Instant::now();
        gate.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(140));
    }

    #[tokio::test]
    async fn test_acquire_pushes_next_slot() {
        let gate = ThrottleGate::new(Duration::from_millis(100));
        assert!(gate.remaining().is_none());
        gate.acquire().await;
        assert!(gate.remaining().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_callers_are_spaced() {
        let gate = std::sync::Arc::new(ThrottleGate::new(Duration::from_millis(100)));
        let start = Instant::now();
        let a = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.acquire().await })
        };
        let b = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.acquire().await })
        };
        let c = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.acquire().await })
        };
        let _ = tokio::join!(a, b, c);
        assert!(start.elapsed() >= Duration::from_millis(190));
    }
}
