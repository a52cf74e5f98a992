//! Client-side catalog search.
//!
//! The provider's search endpoint has a tighter rate limit than the rest of
//! the API, so queries are ranked locally against the cached catalog.

use super::Coin;

pub const SCORE_EXACT_SYMBOL: u8 = 100;
pub const SCORE_SYMBOL_PREFIX: u8 = 80;
pub const SCORE_NAME_PREFIX: u8 = 60;
pub const SCORE_SYMBOL_CONTAINS: u8 = 40;
pub const SCORE_NAME_CONTAINS: u8 = 20;

/// Score one coin against an already lowercased query. `None` means no match.
fn score_lowered(coin: &Coin, query: &str) -> Option<u8> {
    let symbol = coin.symbol.to_lowercase();
    let name = coin.name.to_lowercase();

    if symbol == query {
        Some(SCORE_EXACT_SYMBOL)
    } else if symbol.starts_with(query) {
        Some(SCORE_SYMBOL_PREFIX)
    } else if name.starts_with(query) {
        Some(SCORE_NAME_PREFIX)
    } else if symbol.contains(query) {
        Some(SCORE_SYMBOL_CONTAINS)
    } else if name.contains(query) {
        Some(SCORE_NAME_CONTAINS)
    } else {
        None
    }
}

/// Case-insensitive match score of `coin` for `query`; the first matching
/// rule wins. An empty query matches nothing.
pub fn score(coin: &Coin, query: &str) -> Option<u8> {
    if query.is_empty() {
        return None;
    }
    score_lowered(coin, &query.to_lowercase())
}

/// Rank `catalog` against `query`, best match first, at most `limit` results.
///
/// Equal scores keep catalog order. An empty query yields no results.
pub fn rank(catalog: &[Coin], query: &str, limit: usize) -> Vec<Coin> {
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }
    let query = query.to_lowercase();

    let mut scored: Vec<(u8, &Coin)> = catalog
        .iter()
        .filter_map(|coin| score_lowered(coin, &query).map(|s| (s, coin)))
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, coin)| coin.clone())
        .collect()
}
