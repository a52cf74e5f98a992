//! Network URL constants and request pacing defaults.

use std::time::Duration;

/// Default REST API base URL (CoinGecko public v3).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying an optional demo-plan API key.
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Quote currency for every price request.
pub const VS_CURRENCY: &str = "usd";

/// Provider page size for `/coins/markets`; one page is assumed to cover a portfolio.
pub const MARKETS_PAGE_SIZE: u32 = 250;

/// Minimum spacing between two outbound requests.
pub const DEFAULT_REQUEST_SPACING: Duration = Duration::from_millis(3000);

/// Upper bound for a single request attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Historical series stay fresh for five minutes.
pub const DEFAULT_HISTORY_TTL: Duration = Duration::from_secs(5 * 60);

/// The coin catalog stays fresh for a day.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default interval of the background price poll.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const ENV_API_URL: &str = "COINGECKO_API_URL";

/// Environment variable holding the optional API key.
pub const ENV_API_KEY: &str = "COINGECKO_API_KEY";
