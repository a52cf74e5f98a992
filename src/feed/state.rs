//! Price feed state container: app-owned, SDK-provided update logic.

use super::FeedEvent;
use crate::domain::market::{PriceMap, PriceSnapshot};
use chrono::{DateTime, Utc};

/// Where the feed stands after the last applied event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedStatus {
    /// No poll has completed yet.
    #[default]
    Idle,
    /// The last poll succeeded.
    Live,
    /// The last poll failed; prices are from an earlier poll, if any.
    Stale,
    /// The portfolio was empty at the last poll.
    Empty,
}

/// Latest prices as seen by one consumer.
///
/// The app owns instances of this type. The SDK provides update methods.
#[derive(Debug, Clone, Default)]
pub struct PriceFeedState {
    prices: PriceMap,
    status: FeedStatus,
    last_updated: Option<DateTime<Utc>>,
    error: Option<String>,
}

impl PriceFeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Updated { prices, at } => {
                self.prices = prices;
                self.last_updated = Some(at);
                self.error = None;
                self.status = FeedStatus::Live;
            }
            FeedEvent::Failed { message } => {
                self.error = Some(message);
                self.status = FeedStatus::Stale;
            }
            FeedEvent::Cleared => {
                self.prices.clear();
                self.error = None;
                self.status = FeedStatus::Empty;
            }
        }
    }

    pub fn prices(&self) -> &PriceMap {
        &self.prices
    }

    pub fn get(&self, coin_id: &str) -> Option<&PriceSnapshot> {
        self.prices.get(coin_id)
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    /// Time of the last successful poll.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Message of the last failed poll, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
