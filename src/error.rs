//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// The coin catalog could not be fetched and no cached copy was usable.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[source] HttpError),

    /// The batched price request failed after retries.
    #[error("Price fetch failed: {0}")]
    PriceFetchFailed(#[source] HttpError),

    /// A historical series request failed after retries.
    #[error("History fetch failed: {0}")]
    HistoryFetchFailed(#[source] HttpError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Connection failure, timeout, or any other transport error.
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// An attempt outlived the request timeout on a target whose HTTP
    /// client has no timeout of its own (wasm).
    #[error("Request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Client error {status}: {body}")]
    ClientError { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// Whether the retry loop may try this request again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HttpError::RateLimited { .. } | HttpError::ServerError { .. }
        )
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, HttpError::RateLimited { .. })
    }
}

/// Local persistence errors.
///
/// Unparsable stored data is not an error: readers log it and fall back to
/// the empty state.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(HttpError::RateLimited { retry_after_ms: None }.is_retryable());
        assert!(HttpError::ServerError {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!HttpError::ClientError {
            status: 404,
            body: String::new()
        }
        .is_retryable());
        assert!(!HttpError::MalformedResponse("x".into()).is_retryable());
    }

    #[test]
    fn test_operation_errors_keep_cause() {
        use std::error::Error as _;
        let err = SdkError::PriceFetchFailed(HttpError::ServerError {
            status: 502,
            body: "bad gateway".into(),
        });
        assert!(err.to_string().starts_with("Price fetch failed"));
        assert!(err.source().is_some());
    }
}
