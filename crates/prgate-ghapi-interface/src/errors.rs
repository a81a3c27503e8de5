//! API errors.

use thiserror::Error;

/// Boxed error source.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// API error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credentials could not be turned into an authenticated transport.
    #[error("Authentication failed: {source}")]
    AuthError { source: BoxedError },

    /// Malformed hostname or static input.
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Failed network call or non-success platform response.
    #[error("API request failed: {source}")]
    RequestError { source: BoxedError },

    /// The platform answered but did not merge.
    #[error(
        "Could not merge pull request #{} on repository {}: {}",
        pr_number,
        repository_path,
        message
    )]
    MergeRejected {
        pr_number: u64,
        repository_path: String,
        message: String,
    },

    /// A listing failed midway; entries gathered so far are kept.
    #[error("Listing interrupted after {} entries: {}", collected.len(), source)]
    PartialListing {
        collected: Vec<String>,
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// Entries gathered before a listing failed, if any.
    pub fn partial_result(&self) -> Option<&[String]> {
        match self {
            Self::PartialListing { collected, .. } => Some(collected),
            _ => None,
        }
    }
}

/// Result alias for `ApiError`.
pub type Result<T, E = ApiError> = core::result::Result<T, E>;
