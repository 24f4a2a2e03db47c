/// Core error types for Music Vault
use thiserror::Error;

/// Result type alias using `VaultError`
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type shared by collaborator implementations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Session storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl VaultError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Failure modes of a catalog fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The credential was rejected by the catalog service
    #[error("Catalog rejected credential: {0}")]
    Unauthorized(String),

    /// The catalog service could not be reached or answered with an error
    #[error("Catalog unreachable: {0}")]
    Network(String),

    /// The catalog service answered with a body that is not a track list
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    /// Whether the user has to (re)link their account
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
