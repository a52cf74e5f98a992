//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the provider sends and the store persists.

pub mod fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::str::FromStr;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Provider-assigned coin identifier (e.g. `"bitcoin"`).
///
/// Stable and opaque; never derived from the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CoinId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl Borrow<str> for CoinId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CoinId(s))
    }
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_coin_id_serde() {
        let id = CoinId::from("bitcoin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bitcoin\"");
        let back: CoinId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_coin_id_map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(CoinId::from("ethereum"), 1);
        assert_eq!(map.get("ethereum"), Some(&1));
        assert_eq!(map.get("bitcoin"), None);
    }
}
