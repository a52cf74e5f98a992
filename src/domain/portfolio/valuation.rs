//! Portfolio valuation against a price snapshot map.
//!
//! Pure functions; called on every render or poll tick.

use super::{Holding, Portfolio};
use crate::domain::market::PriceMap;
use serde::{Deserialize, Serialize};

/// `quantity * price` for one holding, or `None` when its coin has no price.
pub fn holding_value(holding: &Holding, prices: &PriceMap) -> Option<f64> {
    prices
        .get(holding.coin_id.as_str())
        .map(|snapshot| holding.quantity * snapshot.price)
}

/// Sum of holding values. Coins without a price contribute nothing.
pub fn total_value(portfolio: &Portfolio, prices: &PriceMap) -> f64 {
    portfolio
        .iter()
        .filter_map(|holding| holding_value(holding, prices))
        .sum()
}

/// Value-weighted average of the 24h change, in percent.
///
/// Only holdings with both a price and a 24h change take part, in the
/// numerator and the denominator alike. Returns 0 when nothing qualifies or
/// the qualifying value is 0.
pub fn weighted_24h_change(portfolio: &Portfolio, prices: &PriceMap) -> f64 {
    let (weighted, total) = portfolio
        .iter()
        .filter_map(|holding| {
            let snapshot = prices.get(holding.coin_id.as_str())?;
            let change = snapshot.change_24h?;
            Some((holding.quantity * snapshot.price, change))
        })
        .fold((0.0, 0.0), |(weighted, total), (value, change)| {
            (weighted + value * change, total + value)
        });

    if total == 0.0 {
        0.0
    } else {
        weighted / total
    }
}

/// Headline numbers for a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    /// Percent, see [`weighted_24h_change`].
    pub change_24h: f64,
    pub coin_count: usize,
}

pub fn summarize(portfolio: &Portfolio, prices: &PriceMap) -> PortfolioSummary {
    PortfolioSummary {
        total_value: total_value(portfolio, prices),
        change_24h: weighted_24h_change(portfolio, prices),
        coin_count: portfolio.len(),
    }
}
