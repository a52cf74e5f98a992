//! Portfolio domain: holdings, collection invariants, valuation.

pub mod valuation;

use crate::domain::catalog::Coin;
use crate::shared::CoinId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use valuation::{holding_value, summarize, total_value, weighted_24h_change, PortfolioSummary};

// ─── Holding ─────────────────────────────────────────────────────────────────

/// A user's recorded quantity of one catalog coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub coin_id: CoinId,
    pub symbol: String,
    pub name: String,
    /// Always positive.
    pub quantity: f64,
}

impl Holding {
    pub fn from_coin(coin: &Coin, quantity: f64) -> Self {
        Self {
            coin_id: coin.id.clone(),
            symbol: coin.symbol.clone(),
            name: coin.name.clone(),
            quantity,
        }
    }
}

// ─── Portfolio ───────────────────────────────────────────────────────────────

/// Ordered holdings with at most one entry per coin.
///
/// Persisted as a plain JSON array. New coins are appended; edits keep
/// their position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw holdings, restoring the collection invariants:
    /// non-positive quantities are dropped and duplicate coins are merged
    /// into the first occurrence.
    pub fn from_holdings(holdings: Vec<Holding>) -> Self {
        let mut portfolio = Self::new();
        for holding in holdings {
            if !is_valid_quantity(holding.quantity) {
                tracing::debug!(coin = %holding.coin_id, "Dropping holding with invalid quantity");
                continue;
            }
            match portfolio.position(&holding.coin_id) {
                Some(i) => portfolio.holdings[i].quantity += holding.quantity,
                None => portfolio.holdings.push(holding),
            }
        }
        portfolio
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn get(&self, coin_id: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.coin_id.as_str() == coin_id)
    }

    /// Ids to request prices for, in portfolio order.
    pub fn coin_ids(&self) -> Vec<CoinId> {
        self.holdings.iter().map(|h| h.coin_id.clone()).collect()
    }

    fn position(&self, coin_id: &CoinId) -> Option<usize> {
        self.holdings.iter().position(|h| &h.coin_id == coin_id)
    }

    /// Add `quantity` of `coin`: increments an existing holding, otherwise
    /// appends a new one.
    pub fn add(&mut self, coin: &Coin, quantity: f64) -> Result<(), QuantityError> {
        if !is_valid_quantity(quantity) {
            return Err(QuantityError(quantity));
        }
        match self.position(&coin.id) {
            Some(i) => self.holdings[i].quantity += quantity,
            None => self.holdings.push(Holding::from_coin(coin, quantity)),
        }
        Ok(())
    }

    /// Overwrite the quantity of a held coin. A quantity of zero or less
    /// removes the holding. Returns `false` when the coin is not held.
    pub fn set_quantity(&mut self, coin_id: &str, quantity: f64) -> bool {
        if quantity.is_nan() {
            return false;
        }
        if quantity <= 0.0 {
            return self.remove(coin_id);
        }
        match self.holdings.iter_mut().find(|h| h.coin_id.as_str() == coin_id) {
            Some(holding) if quantity.is_finite() => {
                holding.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove a coin. Returns `false` when it was not held.
    pub fn remove(&mut self, coin_id: &str) -> bool {
        let before = self.holdings.len();
        self.holdings.retain(|h| h.coin_id.as_str() != coin_id);
        self.holdings.len() != before
    }

    pub fn clear(&mut self) {
        self.holdings.clear();
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}

fn is_valid_quantity(quantity: f64) -> bool {
    quantity.is_finite() && quantity > 0.0
}

/// A quantity that is zero, negative, or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityError(pub f64);

impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quantity must be a positive number, got {}", self.0)
    }
}

impl std::error::Error for QuantityError {}
