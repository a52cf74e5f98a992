//! Market domain: live price snapshots per coin.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::CoinId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub use convert::price_map_from_markets;

// ─── PriceSnapshot ───────────────────────────────────────────────────────────

/// A point-in-time market reading for one coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    /// USD price, never negative.
    pub price: f64,
    /// 24h price change in percent; `None` when the provider has no data.
    pub change_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub image: Option<String>,
}

impl PriceSnapshot {
    /// Snapshot with only a price and a 24h change.
    pub fn new(price: f64, change_24h: Option<f64>) -> Self {
        Self {
            price,
            change_24h,
            market_cap: None,
            volume: None,
            high_24h: None,
            low_24h: None,
            image: None,
        }
    }
}

/// Snapshots keyed by coin id. Each poll replaces the whole map.
pub type PriceMap = HashMap<CoinId, PriceSnapshot>;

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
pub enum ValidationError {
    MissingPrice(CoinId),
    InvalidPrice(CoinId, f64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingPrice(id) => write!(f, "Missing price for {}", id),
            ValidationError::InvalidPrice(id, price) => {
                write!(f, "Invalid price {} for {}", price, id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
