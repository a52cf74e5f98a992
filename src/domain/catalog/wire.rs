//! Wire types for catalog responses (REST).

use crate::shared::CoinId;
use serde::{Deserialize, Serialize};

/// One row of `GET /coins/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinListEntry {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
}

/// `GET /search/trending`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingEntry {
    pub item: TrendingItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingItem {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub thumb: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_list_ignores_extra_fields() {
        let json = r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin","platforms":{}}]"#;
        let entries: Vec<CoinListEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].id.as_str(), "bitcoin");
        assert_eq!(entries[0].symbol, "btc");
    }

    #[test]
    fn test_trending_response() {
        let json = r#"{
            "coins": [
                {"item": {"id": "pepe", "coin_id": 29850, "name": "Pepe", "symbol": "PEPE",
                          "market_cap_rank": 34, "thumb": "https://img/pepe.png", "score": 0}},
                {"item": {"id": "newcoin", "name": "New", "symbol": "NEW", "market_cap_rank": null}}
            ],
            "nfts": []
        }"#;
        let resp: TrendingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.coins.len(), 2);
        assert_eq!(resp.coins[0].item.market_cap_rank, Some(34));
        assert_eq!(resp.coins[1].item.market_cap_rank, None);
        assert_eq!(resp.coins[1].item.thumb, None);
    }
}
