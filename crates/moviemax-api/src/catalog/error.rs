//! Catalog client error types.

use thiserror::Error;

/// Failure to obtain response bytes from the network.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TransportError {
    /// The request URL could not be constructed.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP request failed (connect, TLS, timeout or body read).
    #[error("request failed: {endpoint}")]
    Request {
        /// Endpoint path, without query (the query carries the API key).
        endpoint: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The request completed without error but returned no bytes.
    #[error("empty response body: {endpoint}")]
    EmptyBody {
        /// Endpoint path, without query.
        endpoint: String,
    },
}

/// Failure to map response bytes onto a typed record.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum DecodeError {
    /// The payload is not valid JSON, or a required field is missing or mistyped.
    #[error("failed to decode JSON response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The list payload has no top-level `results` array.
    #[error("invalid JSON structure: expected an object with a `results` array")]
    InvalidStructure,
}

/// Terminal outcome of a failed catalog call.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// Network-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Structural mismatch in the response payload.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl CatalogError {
    /// Returns `true` for transport failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` for decode failures.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
