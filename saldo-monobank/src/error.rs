use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error type surfaced by the provider connector. All variants are fatal on
/// the startup path; callers on the steady-state path decide what to do.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {status} from {endpoint}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),
}
