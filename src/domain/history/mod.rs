//! Price history domain: chart ranges, series points, TTL cache.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use serde::{Deserialize, Serialize};

pub use convert::series_from_market_chart;
pub use state::HistoryCache;

/// A single point on a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    /// USD price.
    pub price: f64,
}

/// Points in ascending timestamp order.
pub type HistoricalSeries = Vec<PricePoint>;

// ─── ChartRange ──────────────────────────────────────────────────────────────

/// Lookback window of a historical series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "24h")]
    Day1,
    #[default]
    #[serde(rename = "7d")]
    Week1,
    #[serde(rename = "30d")]
    Month1,
    #[serde(rename = "90d")]
    Month3,
}

impl ChartRange {
    pub const ALL: [ChartRange; 4] = [Self::Day1, Self::Week1, Self::Month1, Self::Month3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "24h",
            Self::Week1 => "7d",
            Self::Month1 => "30d",
            Self::Month3 => "90d",
        }
    }

    /// Value of the provider's `days` parameter.
    pub fn days(&self) -> u32 {
        match self {
            Self::Day1 => 1,
            Self::Week1 => 7,
            Self::Month1 => 30,
            Self::Month3 => 90,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            1 => Some(Self::Day1),
            7 => Some(Self::Week1),
            30 => Some(Self::Month1),
            90 => Some(Self::Month3),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChartRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
