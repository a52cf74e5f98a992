//! # Coinfolio
//!
//! Data layer of a crypto portfolio tracker: a throttled CoinGecko client,
//! coin search, portfolio valuation and durable local state.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Types, search ranking, valuation (always available, WASM-safe)
//! 2. **Store**: Portfolio + catalog cache over a key/value backend (files, memory, `localStorage`)
//! 3. **HTTP API**: `CoinGeckoHttp` behind one throttle gate with a retry policy
//! 4. **High-Level Client**: `MarketDataClient` with nested sub-clients and caching
//! 5. **Price Feed**: Background tokio poller + app-owned feed state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinfolio::prelude::*;
//!
//! let client = MarketDataClient::builder()
//!     .store(LocalStore::open_default()?)
//!     .build()?;
//!
//! let hits = client.catalog().search("eth", 10).await;
//! let portfolio = client.store().add_holding(&hits[0], 1.5)?;
//! let prices = client.prices().for_portfolio(&portfolio).await?;
//! let summary = summarize(&portfolio, &prices);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatters.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants and pacing defaults.
pub mod network;

// ── Layer 2: Store ───────────────────────────────────────────────────────────

/// Durable portfolio and catalog cache.
pub mod store;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with throttling and retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `MarketDataClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Price Feed ──────────────────────────────────────────────────────

/// Price polling events and state.
pub mod feed;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + formatters
    pub use crate::shared::fmt::{
        format_chart_date, format_compact, format_currency, format_date_time, format_percentage,
        format_quantity,
    };
    pub use crate::shared::CoinId;

    // Domain types: catalog
    pub use crate::domain::catalog::{rank, score, Coin, TrendingCoin};

    // Domain types: market, history
    pub use crate::domain::history::{ChartRange, HistoricalSeries, PricePoint};
    pub use crate::domain::market::{PriceMap, PriceSnapshot};

    // Domain types: portfolio + valuation
    pub use crate::domain::portfolio::{
        holding_value, summarize, total_value, weighted_24h_change, Holding, Portfolio,
        PortfolioSummary,
    };

    // Errors
    pub use crate::error::{HttpError, SdkError, StoreError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Store
    pub use crate::store::{FileStore, KeyValueStore, LocalStore, MemoryStore};
    #[cfg(feature = "web-storage")]
    pub use crate::store::WebStorage;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        CatalogClient, HistoryClient, MarketDataClient, MarketDataClientBuilder, PricesClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{Backoff, RetryConfig};

    // Price feed
    pub use crate::feed::{FeedEvent, FeedStatus, PriceFeedState};
    #[cfg(feature = "poller")]
    pub use crate::feed::{PollHandle, PricePoller};
}
