//! History sub-client: chart series with a short TTL cache.

use crate::client::MarketDataClient;
use crate::domain::history::{series_from_market_chart, ChartRange, HistoricalSeries};
use crate::error::SdkError;
use crate::shared::CoinId;

/// Sub-client for historical price series.
pub struct History<'a> {
    pub(crate) client: &'a MarketDataClient,
}

impl<'a> History<'a> {
    /// Price series for `coin_id` over `range`. Uses TTL cache.
    pub async fn get(&self, coin_id: &str, range: ChartRange) -> Result<HistoricalSeries, SdkError> {
        let coin_id = CoinId::from(coin_id);
        {
            let cache = self.client.history_cache.read().await;
            if let Some(series) = cache.get(&coin_id, range) {
                return Ok(series);
            }
        }

        let body = self
            .client
            .http
            .get_market_chart(&coin_id, range)
            .await
            .map_err(SdkError::HistoryFetchFailed)?;
        let series = series_from_market_chart(body).map_err(SdkError::HistoryFetchFailed)?;

        let mut cache = self.client.history_cache.write().await;
        cache.prune();
        cache.insert(coin_id, range, series.clone());
        Ok(series)
    }

    /// Drop every cached range of `coin_id`.
    pub async fn invalidate(&self, coin_id: &str) {
        self.client
            .history_cache
            .write()
            .await
            .invalidate(&CoinId::from(coin_id));
    }

    pub async fn clear_cache(&self) {
        self.client.history_cache.write().await.clear();
    }
}
