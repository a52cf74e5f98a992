//! Low-level HTTP client: `CoinGeckoHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the domain sub-clients). Every attempt, retries included,
//! passes the shared [`ThrottleGate`]; failures are retried per [`RetryConfig`].

use crate::domain::catalog::wire::{CoinListEntry, TrendingResponse};
use crate::domain::history::ChartRange;
use crate::domain::market::wire::MarketResponse;
use crate::error::HttpError;
use crate::http::retry::RetryConfig;
use crate::http::throttle::ThrottleGate;
use crate::network;
use crate::shared::CoinId;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Transport settings for [`CoinGeckoHttp`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub api_key: Option<String>,
    /// Minimum spacing between two dispatches.
    pub request_spacing: Duration,
    /// Bound on a single attempt.
    pub request_timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            request_spacing: network::DEFAULT_REQUEST_SPACING,
            request_timeout: network::DEFAULT_REQUEST_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }
}

/// Low-level HTTP client for the CoinGecko REST API.
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
    api_key: Option<String>,
    gate: Arc<ThrottleGate>,
    retry: RetryConfig,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    request_timeout: Duration,
}

impl CoinGeckoHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_options(base_url, HttpOptions::default())
    }

    pub fn with_options(base_url: &str, options: HttpOptions) -> Result<Self, HttpError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(options.request_timeout)
                .pool_max_idle_per_host(4);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            api_key: options.api_key,
            gate: Arc::new(ThrottleGate::new(options.request_spacing)),
            retry: options.retry,
            request_timeout: options.request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The gate shared by every request of this client (and its clones).
    pub fn gate(&self) -> &ThrottleGate {
        &self.gate
    }

    // ── Catalog ──────────────────────────────────────────────────────────

    pub async fn get_coins_list(&self) -> Result<Vec<CoinListEntry>, HttpError> {
        let url = format!("{}/coins/list", self.base_url);
        self.get(&url).await
    }

    pub async fn get_trending(&self) -> Result<TrendingResponse, HttpError> {
        let url = format!("{}/search/trending", self.base_url);
        self.get(&url).await
    }

    // ── Markets ──────────────────────────────────────────────────────────

    /// One page of market rows for `ids`. A single page is assumed to cover
    /// every requested id.
    pub async fn get_markets(&self, ids: &[CoinId]) -> Result<Vec<MarketResponse>, HttpError> {
        let ids = ids
            .iter()
            .map(|id| urlencoding::encode(id.as_str()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/coins/markets?vs_currency={}&ids={}&order=market_cap_desc&per_page={}&page=1&sparkline=false&price_change_percentage=24h",
            self.base_url,
            network::VS_CURRENCY,
            ids,
            network::MARKETS_PAGE_SIZE
        );
        self.get(&url).await
    }

    // ── Price History ────────────────────────────────────────────────────

    /// Raw chart body; validated by the history domain.
    pub async fn get_market_chart(
        &self,
        coin_id: &CoinId,
        range: ChartRange,
    ) -> Result<serde_json::Value, HttpError> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(coin_id.as_str()),
            network::VS_CURRENCY,
            range.days()
        );
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            // After a backoff the gate only waits for whatever spacing is left.
            self.gate.acquire().await;
            let err = match self.do_request::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            let Some(delay) = self.retry.delay_for(&err, attempt) else {
                return Err(err);
            };
            if attempt + 1 >= max_attempts {
                if max_attempts == 1 {
                    return Err(err);
                }
                tracing::debug!(attempts = max_attempts, "Giving up on {}", url);
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: max_attempts,
                    last_error: err.to_string(),
                });
            }

            tracing::debug!(
                attempt = attempt + 1,
                max = max_attempts,
                delay_ms = delay.as_millis() as u64,
                rate_limited = err.is_rate_limited(),
                "Retrying request to {}",
                url
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn do_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        // The native client carries its own timeout; the browser fetch does not.
        #[cfg(target_arch = "wasm32")]
        {
            use futures_util::future::{select, Either};

            let attempt = std::pin::pin!(self.send_once::<T>(url));
            let deadline = futures_timer::Delay::new(self.request_timeout);
            return match select(attempt, deadline).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => Err(HttpError::Timeout {
                    after_ms: self.request_timeout.as_millis() as u64,
                }),
            };
        }
        #[cfg(not(target_arch = "wasm32"))]
        self.send_once(url).await
    }

    async fn send_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let mut req = self.client.get(url);
        if let Some(key) = &self.api_key {
            req = req.header(network::API_KEY_HEADER, key);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let text = resp.text().await?;
            return serde_json::from_str::<T>(&text)
                .map_err(|e| HttpError::MalformedResponse(e.to_string()));
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            s if s >= 500 => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
            _ => Err(HttpError::ClientError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for CoinGeckoHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            gate: self.gate.clone(),
            retry: self.retry.clone(),
            request_timeout: self.request_timeout,
        }
    }
}
