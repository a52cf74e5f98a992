use super::wire::MarketResponse;
use super::{PriceMap, PriceSnapshot, ValidationError};

impl TryFrom<MarketResponse> for PriceSnapshot {
    type Error = ValidationError;

    fn try_from(row: MarketResponse) -> Result<Self, Self::Error> {
        let price = row
            .current_price
            .ok_or_else(|| ValidationError::MissingPrice(row.id.clone()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(row.id, price));
        }
        Ok(Self {
            price,
            change_24h: row.price_change_percentage_24h.filter(|c| c.is_finite()),
            market_cap: row.market_cap,
            volume: row.total_volume,
            high_24h: row.high_24h,
            low_24h: row.low_24h,
            image: row.image,
        })
    }
}

/// Key provider rows by coin id. Rows without a usable price are dropped, so
/// the coin reads as "no price" downstream.
pub fn price_map_from_markets(rows: Vec<MarketResponse>) -> PriceMap {
    let mut map = PriceMap::with_capacity(rows.len());
    for row in rows {
        let id = row.id.clone();
        match PriceSnapshot::try_from(row) {
            Ok(snapshot) => {
                map.insert(id, snapshot);
            }
            Err(e) => tracing::debug!("Skipping market row: {}", e),
        }
    }
    map
}
