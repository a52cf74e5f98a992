use super::wire::MarketChartResponse;
use super::{HistoricalSeries, PricePoint};
use crate::error::HttpError;

/// Validate a raw market-chart body and turn it into a series.
///
/// `prices` must be a list of numeric `[timestamp, price]` pairs in
/// ascending timestamp order.
pub fn series_from_market_chart(body: serde_json::Value) -> Result<HistoricalSeries, HttpError> {
    let chart: MarketChartResponse = serde_json::from_value(body)
        .map_err(|e| HttpError::MalformedResponse(format!("market_chart: {}", e)))?;

    let mut series = HistoricalSeries::with_capacity(chart.prices.len());
    for (index, (timestamp, price)) in chart.prices.into_iter().enumerate() {
        if !timestamp.is_finite() || !price.is_finite() {
            return Err(HttpError::MalformedResponse(format!(
                "market_chart: non-finite pair at index {}",
                index
            )));
        }
        let point = PricePoint {
            timestamp: timestamp as i64,
            price,
        };
        if let Some(prev) = series.last() {
            if point.timestamp < prev.timestamp {
                return Err(HttpError::MalformedResponse(format!(
                    "market_chart: timestamps out of order at index {}",
                    index
                )));
            }
        }
        series.push(point);
    }
    Ok(series)
}
