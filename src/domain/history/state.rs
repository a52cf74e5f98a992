//! In-memory TTL cache for historical series.

use super::{ChartRange, HistoricalSeries};
use crate::shared::CoinId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CachedSeries {
    stored_at: Instant,
    series: HistoricalSeries,
}

/// Series keyed by `(coin, range)`, each valid for `ttl` after it was stored.
///
/// Owned by one client instance; lives as long as the process.
pub struct HistoryCache {
    ttl: Duration,
    entries: HashMap<(CoinId, ChartRange), CachedSeries>,
}

impl HistoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A fresh copy of the cached series, or `None` when absent or stale.
    pub fn get(&self, coin_id: &CoinId, range: ChartRange) -> Option<HistoricalSeries> {
        let hit = self.entries.get(&(coin_id.clone(), range))?;
        if hit.stored_at.elapsed() < self.ttl {
            Some(hit.series.clone())
        } else {
            None
        }
    }

    pub fn insert(&mut self, coin_id: CoinId, range: ChartRange, series: HistoricalSeries) {
        self.entries.insert(
            (coin_id, range),
            CachedSeries {
                stored_at: Instant::now(),
                series,
            },
        );
    }

    /// Drop every range cached for one coin.
    pub fn invalidate(&mut self, coin_id: &CoinId) {
        self.entries.retain(|(id, _), _| id != coin_id);
    }

    /// Drop entries whose TTL has passed.
    pub fn prune(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, hit| hit.stored_at.elapsed() < ttl);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
