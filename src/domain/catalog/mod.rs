//! Catalog domain: the provider's coin list, trending coins, search.

#[cfg(feature = "http")]
pub mod client;
pub mod search;
pub mod wire;

use crate::shared::CoinId;
use serde::{Deserialize, Serialize};

pub use search::{rank, score};

// ─── Coin ────────────────────────────────────────────────────────────────────

/// One catalog entry. Sourced and cached wholesale from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
}

impl Coin {
    pub fn new(id: impl Into<CoinId>, symbol: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }
}

impl From<wire::CoinListEntry> for Coin {
    fn from(entry: wire::CoinListEntry) -> Self {
        Self {
            id: entry.id,
            symbol: entry.symbol,
            name: entry.name,
        }
    }
}

// ─── TrendingCoin ────────────────────────────────────────────────────────────

/// A coin from the provider's trending list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
}

impl TrendingCoin {
    /// The catalog view of this coin, ready to be added as a holding.
    pub fn as_coin(&self) -> Coin {
        Coin {
            id: self.id.clone(),
            symbol: self.symbol.clone(),
            name: self.name.clone(),
        }
    }
}

impl From<wire::TrendingItem> for TrendingCoin {
    fn from(item: wire::TrendingItem) -> Self {
        Self {
            id: item.id,
            symbol: item.symbol,
            name: item.name,
            market_cap_rank: item.market_cap_rank,
            thumb: item.thumb,
        }
    }
}
