//! High-level client: `MarketDataClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::catalog::client::Catalog;
use crate::domain::history::client::History;
use crate::domain::history::HistoryCache;
use crate::domain::market::client::Prices;
use crate::error::SdkError;
use crate::http::{CoinGeckoHttp, HttpOptions, RetryConfig};
use crate::network;
use crate::store::LocalStore;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::catalog::client::Catalog as CatalogClient;
pub use crate::domain::history::client::History as HistoryClient;
pub use crate::domain::market::client::Prices as PricesClient;

/// The primary entry point for market data.
///
/// Provides nested sub-client accessors for each domain:
/// `client.catalog()`, `client.prices()`, `client.history()`.
///
/// Clones share the throttle gate, the history cache and the store.
pub struct MarketDataClient {
    pub(crate) http: CoinGeckoHttp,
    pub(crate) store: LocalStore,
    /// (coin, range) → series, fresh for the history TTL
    pub(crate) history_cache: Arc<RwLock<HistoryCache>>,
}

impl MarketDataClient {
    pub fn builder() -> MarketDataClientBuilder {
        MarketDataClientBuilder::default()
    }

    /// Client configured from `COINGECKO_API_URL` / `COINGECKO_API_KEY`,
    /// persisting to the per-user data directory.
    pub fn from_env() -> Result<Self, SdkError> {
        let mut builder = Self::builder().store(LocalStore::open_default()?);
        if let Ok(url) = std::env::var(network::ENV_API_URL) {
            builder = builder.base_url(&url);
        }
        if let Ok(key) = std::env::var(network::ENV_API_KEY) {
            if !key.is_empty() {
                builder = builder.api_key(&key);
            }
        }
        builder.build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog { client: self }
    }

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    /// The store backing the catalog cache and the portfolio.
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn http(&self) -> &CoinGeckoHttp {
        &self.http
    }

    /// Clear the history cache and the persisted catalog cache.
    pub async fn clear_all_caches(&self) {
        self.history_cache.write().await.clear();
        self.store.clear_cached_catalog();
    }
}

impl Clone for MarketDataClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            store: self.store.clone(),
            history_cache: self.history_cache.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MarketDataClientBuilder {
    base_url: String,
    options: HttpOptions,
    history_ttl: Duration,
    store: Option<LocalStore>,
}

impl Default for MarketDataClientBuilder {
    fn default() -> Self {
        Self {
            base_url: network::DEFAULT_API_URL.to_string(),
            options: HttpOptions::default(),
            history_ttl: network::DEFAULT_HISTORY_TTL,
            store: None,
        }
    }
}

impl MarketDataClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Demo-plan key, sent with every request.
    pub fn api_key(mut self, key: &str) -> Self {
        self.options.api_key = Some(key.to_string());
        self
    }

    pub fn request_spacing(mut self, spacing: Duration) -> Self {
        self.options.request_spacing = spacing;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options.request_timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.options.retry = retry;
        self
    }

    pub fn history_ttl(mut self, ttl: Duration) -> Self {
        self.history_ttl = ttl;
        self
    }

    /// Persistence for the catalog cache. Defaults to an in-memory store.
    pub fn store(mut self, store: LocalStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<MarketDataClient, SdkError> {
        Ok(MarketDataClient {
            http: CoinGeckoHttp::with_options(&self.base_url, self.options)?,
            store: self.store.unwrap_or_else(LocalStore::in_memory),
            history_cache: Arc::new(RwLock::new(HistoryCache::new(self.history_ttl))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = MarketDataClient::builder().build().unwrap();
        assert_eq!(client.http().base_url(), network::DEFAULT_API_URL);
        assert_eq!(client.http().gate().spacing(), network::DEFAULT_REQUEST_SPACING);
        assert_eq!(client.store().catalog_ttl(), network::DEFAULT_CATALOG_TTL);
    }

    #[test]
    fn test_builder_overrides() {
        let client = MarketDataClient::builder()
            .base_url("http://127.0.0.1:9/api/")
            .request_spacing(Duration::from_millis(10))
            .history_ttl(Duration::from_secs(1))
            .build()
            .unwrap();
        assert_eq!(client.http().base_url(), "http://127.0.0.1:9/api");
        assert_eq!(client.http().gate().spacing(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_clones_share_history_cache() {
        let client = MarketDataClient::builder().build().unwrap();
        let other = client.clone();
        other.history_cache.write().await.insert(
            "bitcoin".into(),
            crate::domain::history::ChartRange::Day1,
            Vec::new(),
        );
        assert_eq!(client.history_cache.read().await.len(), 1);

        client.clear_all_caches().await;
        assert!(other.history_cache.read().await.is_empty());
    }
}
