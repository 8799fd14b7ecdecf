use thiserror::Error;

use bazaar_orders::TransitionError;

/// Failure talking to (or refused by) the order backend.
///
/// Backend responses are mapped to the closest typed category; anything
/// unclassifiable surfaces as [`BackendError::Api`] or, for transport
/// failures, [`BackendError::Network`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// Expired or missing credential (401/403).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The order does not exist on the backend.
    #[error("order not found")]
    NotFound,

    /// The backend refused the request as invalid (400/422).
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    /// A status change was refused, locally or by the backend (409).
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Transport-level failure; safe to retry.
    #[error("network error: {0}")]
    Network(String),

    /// A response we could not classify.
    #[error("unexpected API response ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("response parse error: {0}")]
    Parse(String),
}

impl BackendError {
    /// Whether retrying the same call can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BackendError::Network(_))
    }
}
