//! Prices sub-client: batched live price snapshots.

use crate::client::MarketDataClient;
use crate::domain::market::{price_map_from_markets, PriceMap};
use crate::domain::portfolio::Portfolio;
use crate::error::SdkError;
use crate::shared::CoinId;
use std::collections::HashSet;

/// Sub-client for live prices.
pub struct Prices<'a> {
    pub(crate) client: &'a MarketDataClient,
}

impl<'a> Prices<'a> {
    /// Current snapshots for `coin_ids` in one provider request.
    ///
    /// An empty id list returns an empty map without a request. Coins the
    /// provider has no usable price for are absent from the result.
    pub async fn get(&self, coin_ids: &[CoinId]) -> Result<PriceMap, SdkError> {
        let mut seen = HashSet::with_capacity(coin_ids.len());
        let ids: Vec<CoinId> = coin_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();
        if ids.is_empty() {
            return Ok(PriceMap::new());
        }

        let rows = self
            .client
            .http
            .get_markets(&ids)
            .await
            .map_err(SdkError::PriceFetchFailed)?;

        let mut prices = price_map_from_markets(rows);
        prices.retain(|id, _| seen.contains(id.as_str()));
        Ok(prices)
    }

    /// Snapshots for every coin held in `portfolio`.
    pub async fn for_portfolio(&self, portfolio: &Portfolio) -> Result<PriceMap, SdkError> {
        self.get(&portfolio.coin_ids()).await
    }
}
