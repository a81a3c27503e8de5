//! Crypto errors.

use thiserror::Error;

/// Crypto error.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Jwt creation error: {source}")]
    JwtCreationFailed { source: jsonwebtoken::errors::Error },
    #[error("Invalid encoding key: {source}")]
    InvalidEncodingKey { source: jsonwebtoken::errors::Error },
    #[error("Could not read private key file '{path}': {source}")]
    PrivateKeyUnreadable {
        path: String,
        source: std::io::Error,
    },
}

/// Result alias for `CryptoError`.
pub type Result<T, E = CryptoError> = ::core::result::Result<T, E>;
