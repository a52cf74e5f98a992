//! HTTP client layer: `CoinGeckoHttp` behind a shared throttle gate and retry policy.

pub mod client;
pub mod retry;
pub mod throttle;

pub use client::{CoinGeckoHttp, HttpOptions};
pub use retry::{Backoff, RetryConfig};
pub use throttle::ThrottleGate;
