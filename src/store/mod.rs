//! Durable local state: the portfolio and the time-boxed coin catalog.
//!
//! Both records live under fixed string keys of a [`KeyValueStore`].
//! Portfolio edits are load-modify-save of the whole list. Unparsable
//! records are logged and read back as the empty state.

mod file;
mod memory;
#[cfg(feature = "web-storage")]
mod web;

pub use file::{default_data_dir, FileStore};
pub use memory::MemoryStore;
#[cfg(feature = "web-storage")]
pub use web::WebStorage;

use crate::domain::catalog::Coin;
use crate::domain::portfolio::{Holding, Portfolio};
use crate::error::{SdkError, StoreError};
use crate::network;
use crate::shared::now_millis;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Key holding the JSON array of holdings.
pub const PORTFOLIO_KEY: &str = "crypto_portfolio";

/// Key holding the `{ coins, timestamp }` catalog record.
pub const CATALOG_CACHE_KEY: &str = "coin_list_cache";

/// String key/value persistence backend.
///
/// `set` must replace the previous value as a whole: readers never observe
/// a partially written value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Persisted catalog cache record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCacheRecord {
    pub coins: Vec<Coin>,
    /// Epoch milliseconds of the write.
    pub timestamp: i64,
}

/// Portfolio and catalog persistence on top of a [`KeyValueStore`].
#[derive(Clone)]
pub struct LocalStore {
    kv: Arc<dyn KeyValueStore>,
    catalog_ttl: Duration,
    /// Serializes load-modify-save sequences of this handle and its clones.
    edit_lock: Arc<Mutex<()>>,
}

impl LocalStore {
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        Self {
            kv: Arc::new(kv),
            catalog_ttl: network::DEFAULT_CATALOG_TTL,
            edit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A store that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// File-backed store under the per-user data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(FileStore::new(default_data_dir())?))
    }

    pub fn with_catalog_ttl(mut self, ttl: Duration) -> Self {
        self.catalog_ttl = ttl;
        self
    }

    pub fn catalog_ttl(&self) -> Duration {
        self.catalog_ttl
    }

    // ── Portfolio ────────────────────────────────────────────────────────

    /// The persisted portfolio; empty when absent, unreadable or corrupt.
    pub fn load_portfolio(&self) -> Portfolio {
        let raw = match self.kv.get(PORTFOLIO_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Portfolio::new(),
            Err(e) => {
                tracing::warn!("Failed to read portfolio: {}", e);
                return Portfolio::new();
            }
        };
        match serde_json::from_str::<Vec<Holding>>(&raw) {
            Ok(holdings) => Portfolio::from_holdings(holdings),
            Err(e) => {
                tracing::warn!("Stored portfolio is corrupt, starting empty: {}", e);
                Portfolio::new()
            }
        }
    }

    /// Replace the persisted portfolio as a whole.
    pub fn save_portfolio(&self, portfolio: &Portfolio) -> Result<(), StoreError> {
        let json = serde_json::to_string(portfolio)?;
        self.kv.set(PORTFOLIO_KEY, &json)
    }

    /// Add `quantity` of `coin`, merging into an existing holding.
    pub fn add_holding(&self, coin: &Coin, quantity: f64) -> Result<Portfolio, SdkError> {
        self.edit(|portfolio| {
            portfolio
                .add(coin, quantity)
                .map(|_| true)
                .map_err(|e| SdkError::Validation(e.to_string()))
        })
    }

    /// Overwrite a holding's quantity. Zero or less removes the holding; an
    /// unknown coin leaves the portfolio untouched.
    pub fn set_quantity(&self, coin_id: &str, quantity: f64) -> Result<Portfolio, SdkError> {
        self.edit(|portfolio| Ok(portfolio.set_quantity(coin_id, quantity)))
    }

    pub fn remove_holding(&self, coin_id: &str) -> Result<Portfolio, SdkError> {
        self.edit(|portfolio| Ok(portfolio.remove(coin_id)))
    }

    pub fn clear_portfolio(&self) -> Result<(), StoreError> {
        let _guard = self.edit_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.save_portfolio(&Portfolio::new())
    }

    /// Load, apply `f`, and save when `f` reports a change.
    fn edit<F>(&self, f: F) -> Result<Portfolio, SdkError>
    where
        F: FnOnce(&mut Portfolio) -> Result<bool, SdkError>,
    {
        let _guard = self.edit_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut portfolio = self.load_portfolio();
        if f(&mut portfolio)? {
            self.save_portfolio(&portfolio)?;
        }
        Ok(portfolio)
    }

    // ── Catalog cache ────────────────────────────────────────────────────

    /// The cached catalog if present and younger than the catalog TTL.
    /// Expired or corrupt records are deleted.
    pub fn get_cached_catalog(&self) -> Option<Vec<Coin>> {
        let raw = match self.kv.get(CATALOG_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read catalog cache: {}", e);
                return None;
            }
        };
        let record = match serde_json::from_str::<CatalogCacheRecord>(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Catalog cache is corrupt, discarding: {}", e);
                self.clear_cached_catalog();
                return None;
            }
        };

        let age_ms = now_millis().saturating_sub(record.timestamp);
        if age_ms > self.catalog_ttl.as_millis() as i64 {
            tracing::debug!(age_ms, "Catalog cache expired");
            self.clear_cached_catalog();
            return None;
        }
        Some(record.coins)
    }

    /// Store `coins` stamped with the current time.
    pub fn set_cached_catalog(&self, coins: &[Coin]) -> Result<(), StoreError> {
        let record = CatalogCacheRecord {
            coins: coins.to_vec(),
            timestamp: now_millis(),
        };
        self.kv.set(CATALOG_CACHE_KEY, &serde_json::to_string(&record)?)
    }

    /// Drop the cached catalog so the next read misses.
    pub fn clear_cached_catalog(&self) {
        if let Err(e) = self.kv.remove(CATALOG_CACHE_KEY) {
            tracing::warn!("Failed to remove catalog cache: {}", e);
        }
    }

    /// Remove both the portfolio and the catalog cache.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let _guard = self.edit_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.kv.remove(PORTFOLIO_KEY)?;
        self.kv.remove(CATALOG_CACHE_KEY)
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("catalog_ttl", &self.catalog_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitcoin() -> Coin {
        Coin::new("bitcoin", "btc", "Bitcoin")
    }

    fn ethereum() -> Coin {
        Coin::new("ethereum", "eth", "Ethereum")
    }

    fn store_with(raw_portfolio: &str) -> LocalStore {
        let kv = MemoryStore::new();
        kv.set(PORTFOLIO_KEY, raw_portfolio).unwrap();
        LocalStore::new(kv)
    }

    #[test]
    fn test_load_absent_portfolio_is_empty() {
        assert!(LocalStore::in_memory().load_portfolio().is_empty());
    }

    #[test]
    fn test_load_corrupt_portfolio_is_empty() {
        assert!(store_with("{not json").load_portfolio().is_empty());
        assert!(store_with(r#"{"coinId":"bitcoin"}"#).load_portfolio().is_empty());
        assert!(store_with(r#"[{"coinId":"bitcoin"}]"#).load_portfolio().is_empty());
    }

    #[test]
    fn test_add_then_re_add_merges() {
        let store = LocalStore::in_memory();
        store.add_holding(&bitcoin(), 0.5).unwrap();
        let p = store.add_holding(&bitcoin(), 1.0).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("bitcoin").unwrap().quantity, 1.5);
        assert_eq!(store.load_portfolio(), p);
    }

    #[test]
    fn test_add_rejects_invalid_quantity() {
        let store = LocalStore::in_memory();
        let err = store.add_holding(&bitcoin(), -1.0).unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
        assert!(store.load_portfolio().is_empty());
    }

    #[test]
    fn test_set_quantity_to_zero_removes_exactly_one() {
        let store = LocalStore::in_memory();
        store.add_holding(&bitcoin(), 1.0).unwrap();
        store.add_holding(&ethereum(), 2.0).unwrap();
        let p = store.set_quantity("bitcoin", 0.0).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(store.load_portfolio().len(), 1);
        assert!(store.load_portfolio().get("ethereum").is_some());
    }

    #[test]
    fn test_set_quantity_keeps_position() {
        let store = LocalStore::in_memory();
        store.add_holding(&bitcoin(), 1.0).unwrap();
        store.add_holding(&ethereum(), 2.0).unwrap();
        let p = store.set_quantity("bitcoin", 7.0).unwrap();
        assert_eq!(p.holdings()[0].coin_id.as_str(), "bitcoin");
        assert_eq!(p.holdings()[0].quantity, 7.0);
    }

    #[test]
    fn test_set_quantity_unknown_is_noop() {
        let store = LocalStore::in_memory();
        store.add_holding(&bitcoin(), 1.0).unwrap();
        let p = store.set_quantity("dogecoin", 3.0).unwrap();
        assert_eq!(p, store.load_portfolio());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = LocalStore::in_memory();
        store.add_holding(&bitcoin(), 1.0).unwrap();
        store.add_holding(&ethereum(), 1.0).unwrap();
        assert_eq!(store.remove_holding("bitcoin").unwrap().len(), 1);
        store.clear_portfolio().unwrap();
        assert!(store.load_portfolio().is_empty());
    }

    #[test]
    fn test_catalog_round_trip() {
        let store = LocalStore::in_memory();
        assert_eq!(store.get_cached_catalog(), None);
        store.set_cached_catalog(&[bitcoin(), ethereum()]).unwrap();
        assert_eq!(store.get_cached_catalog(), Some(vec![bitcoin(), ethereum()]));
    }

    #[test]
    fn test_expired_catalog_is_deleted() {
        let kv = Arc::new(MemoryStore::new());
        let record = CatalogCacheRecord {
            coins: vec![bitcoin()],
            timestamp: now_millis() - 25 * 60 * 60 * 1000,
        };
        kv.set(CATALOG_CACHE_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();
        let store = LocalStore::new(kv.clone());
        assert_eq!(store.get_cached_catalog(), None);
        assert_eq!(kv.get(CATALOG_CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_fresh_catalog_respects_custom_ttl() {
        let store = LocalStore::in_memory().with_catalog_ttl(Duration::ZERO);
        let kv_record = CatalogCacheRecord {
            coins: vec![bitcoin()],
            timestamp: now_millis() - 10,
        };
        store
            .kv
            .set(CATALOG_CACHE_KEY, &serde_json::to_string(&kv_record).unwrap())
            .unwrap();
        assert_eq!(store.get_cached_catalog(), None);
    }

    #[test]
    fn test_corrupt_catalog_is_a_miss_and_deleted() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(CATALOG_CACHE_KEY, "[1,2,3]").unwrap();
        let store = LocalStore::new(kv.clone());
        assert_eq!(store.get_cached_catalog(), None);
        assert_eq!(kv.get(CATALOG_CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_clear_all() {
        let store = LocalStore::in_memory();
        store.add_holding(&bitcoin(), 1.0).unwrap();
        store.set_cached_catalog(&[bitcoin()]).unwrap();
        store.clear_all().unwrap();
        assert!(store.load_portfolio().is_empty());
        assert_eq!(store.get_cached_catalog(), None);
    }
}
