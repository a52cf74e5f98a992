//! Wire types for `GET /coins/{id}/market_chart`.
//!
//! The body is decoded as raw JSON first and validated by
//! [`series_from_market_chart`](super::series_from_market_chart), so shape
//! violations surface as `MalformedResponse` instead of a decode error.

use serde::Deserialize;

/// Typed view of the chart body. Only `prices` is consumed; `market_caps`
/// and `total_volumes` are skipped unread.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
}
