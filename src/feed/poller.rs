//! Native price poller: background tokio task.
//!
//! One task per handle fetches prices for the portfolio's coins right away
//! and then on every interval tick. Manual refreshes go through the same
//! task, so polls never overlap and never pile up on the throttle gate.

use std::pin::Pin;
use std::time::Duration;

use chrono::Utc;
use futures_util::stream::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::MarketDataClient;
use crate::feed::FeedEvent;

// ─── Commands from the handle to the background task ────────────────────────

enum Command {
    Refresh,
    Stop,
}

// ─── Background task state ───────────────────────────────────────────────────

/// Polling task state. Created and driven by [`PricePoller::spawn`].
pub struct PricePoller {
    client: MarketDataClient,
    interval: Duration,
    event_tx: mpsc::Sender<FeedEvent>,
    cmd_rx: mpsc::Receiver<Command>,
}

impl PricePoller {
    /// Start polling on the current tokio runtime.
    ///
    /// The portfolio is re-read from `client`'s store before every poll.
    pub fn spawn(client: MarketDataClient, interval: Duration) -> PollHandle {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (cmd_tx, cmd_rx) = mpsc::channel(1);

        let poller = PricePoller {
            client,
            interval: interval.max(Duration::from_millis(1)),
            event_tx,
            cmd_rx,
        };
        let handle = tokio::spawn(poller.run());

        PollHandle {
            cmd_tx,
            event_rx: tokio::sync::Mutex::new(event_rx),
            task_handle: Some(handle),
        }
    }

    async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(Command::Refresh) => ticker.reset(),
                    Some(Command::Stop) | None => {
                        tracing::debug!("Price poller stopped");
                        return;
                    }
                },
                _ = ticker.tick() => {}
            }

            if !self.poll_once().await {
                tracing::debug!("Price feed receiver gone, stopping poller");
                return;
            }
        }
    }

    /// Poll and emit one event. Returns false once nobody can receive events.
    async fn poll_once(&self) -> bool {
        let portfolio = self.client.store().load_portfolio();
        let event = if portfolio.is_empty() {
            FeedEvent::Cleared
        } else {
            match self.client.prices().for_portfolio(&portfolio).await {
                Ok(prices) => FeedEvent::Updated {
                    prices,
                    at: Utc::now(),
                },
                Err(e) => {
                    tracing::warn!("Price poll failed: {}", e);
                    FeedEvent::Failed {
                        message: e.to_string(),
                    }
                }
            }
        };
        self.emit(event)
    }

    fn emit(&self, event: FeedEvent) -> bool {
        match self.event_tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!("Price feed backlog full, dropping event");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }
}

// ─── Public handle ───────────────────────────────────────────────────────────

/// Control handle of a running [`PricePoller`]. Dropping it aborts the task.
pub struct PollHandle {
    cmd_tx: mpsc::Sender<Command>,
    event_rx: tokio::sync::Mutex<mpsc::Receiver<FeedEvent>>,
    task_handle: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Poll now and restart the interval. A refresh requested while another
    /// is still queued is merged into it.
    pub fn refresh(&self) {
        let _ = self.cmd_tx.try_send(Command::Refresh);
    }

    /// Stop polling and wait for the task to finish. An in-flight poll is
    /// given a few seconds to complete before the task is aborted.
    pub async fn stop(&mut self) {
        let Some(mut handle) = self.task_handle.take() else {
            return;
        };
        // A full command slot means a refresh is pending; the task sees the
        // closed channel instead.
        let _ = self.cmd_tx.try_send(Command::Stop);
        let (closed_tx, _) = mpsc::channel(1);
        self.cmd_tx = closed_tx;

        if tokio::time::timeout(Duration::from_secs(5), &mut handle)
            .await
            .is_err()
        {
            handle.abort();
        }
    }

    /// Whether the polling task is still running.
    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stream of feed events in poll order.
    ///
    /// The returned stream borrows `self`, so it must be dropped before
    /// calling `stop()`.
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = FeedEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }

    /// Receive the next event, or `None` once the task has ended.
    pub async fn next_event(&self) -> Option<FeedEvent> {
        self.event_rx.lock().await.recv().await
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}
