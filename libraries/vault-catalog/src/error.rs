//! Error types for the catalog client.

use thiserror::Error;
use vault_core::CatalogError;

/// Errors that can occur when talking to the catalog service.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The credential was rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid base URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Service is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl From<CatalogClientError> for CatalogError {
    fn from(err: CatalogClientError) -> Self {
        match err {
            CatalogClientError::AuthFailed(msg) => CatalogError::Unauthorized(msg),
            CatalogClientError::ParseError(msg) => CatalogError::InvalidResponse(msg),
            other => CatalogError::Network(other.to_string()),
        }
    }
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;
