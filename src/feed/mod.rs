//! Live price feed: periodic polling for the portfolio's coins.
//!
//! The polling task lives in `poller.rs` (tokio, `poller` feature). Its
//! events are folded by the app into a [`PriceFeedState`] it owns.

pub mod state;

#[cfg(feature = "poller")]
pub mod poller;

use crate::domain::market::PriceMap;
use chrono::{DateTime, Utc};

pub use state::{FeedStatus, PriceFeedState};

#[cfg(feature = "poller")]
pub use poller::{PollHandle, PricePoller};

/// Outcome of one poll, delivered in poll order.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Fresh snapshots for every priced coin in the portfolio.
    Updated {
        prices: PriceMap,
        at: DateTime<Utc>,
    },
    /// The poll failed after retries; earlier snapshots remain valid.
    Failed { message: String },
    /// The portfolio is empty, so nothing was fetched.
    Cleared,
}
