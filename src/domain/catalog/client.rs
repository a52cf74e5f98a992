//! Catalog sub-client: coin list, trending, search.

use crate::client::MarketDataClient;
use crate::domain::catalog::{search, Coin, TrendingCoin};
use crate::error::SdkError;

/// Sub-client for catalog operations.
pub struct Catalog<'a> {
    pub(crate) client: &'a MarketDataClient,
}

impl<'a> Catalog<'a> {
    /// The full coin catalog. Served from the store while the cached copy
    /// is younger than the catalog TTL; otherwise fetched and re-cached.
    pub async fn get(&self) -> Result<Vec<Coin>, SdkError> {
        if let Some(coins) = self.client.store.get_cached_catalog() {
            tracing::debug!(count = coins.len(), "Catalog served from cache");
            return Ok(coins);
        }

        let entries = self
            .client
            .http
            .get_coins_list()
            .await
            .map_err(SdkError::CatalogUnavailable)?;
        let coins: Vec<Coin> = entries.into_iter().map(Coin::from).collect();

        if let Err(e) = self.client.store.set_cached_catalog(&coins) {
            tracing::warn!("Failed to cache catalog: {}", e);
        }
        Ok(coins)
    }

    /// Like [`get`](Self::get), but a failed fetch yields an empty catalog.
    pub async fn get_or_empty(&self) -> Vec<Coin> {
        match self.get().await {
            Ok(coins) => coins,
            Err(e) => {
                tracing::warn!("Catalog unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// Rank the catalog against `query`. An empty query returns nothing
    /// without touching the catalog.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Coin> {
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }
        let coins = self.get_or_empty().await;
        search::rank(&coins, query, limit)
    }

    /// Coins currently trending on the provider. Never cached.
    pub async fn trending(&self) -> Result<Vec<TrendingCoin>, SdkError> {
        let resp = self.client.http.get_trending().await?;
        Ok(resp
            .coins
            .into_iter()
            .map(|entry| TrendingCoin::from(entry.item))
            .collect())
    }

    /// Drop the cached catalog so the next [`get`](Self::get) refetches.
    pub fn invalidate(&self) {
        self.client.store.clear_cached_catalog();
    }
}
