use prgate_crypto::CryptoError;
use prgate_ghapi_interface::ApiError;

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum GitHubError {
    #[error(transparent)]
    HttpError { source: reqwest::Error },

    #[error("Unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Invalid GitHub hostname '{hostname}': {reason}")]
    InvalidHostname { hostname: String, reason: String },

    #[error("Invalid credentials: {reason}")]
    InvalidCredentials { reason: String },

    #[error("Installation identifier '{value}' is not an integer")]
    InvalidInstallationId { value: String },

    #[error(transparent)]
    CryptoError { source: CryptoError },

    #[error("Could not get an access token for installation {installation_id}: {source}")]
    InstallationTokenFailed {
        installation_id: u64,
        source: Box<GitHubError>,
    },

    #[error("Could not authenticate as GitHub App {app_id}: {source}")]
    AppAuthenticationFailed {
        app_id: u64,
        source: Box<GitHubError>,
    },

    #[error(
        "Could not merge pull request #{} on repository {}: {}",
        pr_number,
        repository_path,
        message
    )]
    MergeError {
        pr_number: u64,
        repository_path: String,
        message: String,
    },
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        GitHubError::HttpError { source: e }
    }
}

impl From<CryptoError> for GitHubError {
    fn from(e: CryptoError) -> Self {
        GitHubError::CryptoError { source: e }
    }
}

impl From<GitHubError> for ApiError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::MergeError {
                pr_number,
                repository_path,
                message,
            } => ApiError::MergeRejected {
                pr_number,
                repository_path,
                message,
            },
            e @ (GitHubError::InvalidHostname { .. } | GitHubError::InvalidCredentials { .. }) => {
                ApiError::ConfigError {
                    message: e.to_string(),
                }
            }
            e @ (GitHubError::InvalidInstallationId { .. }
            | GitHubError::CryptoError { .. }
            | GitHubError::InstallationTokenFailed { .. }
            | GitHubError::AppAuthenticationFailed { .. }) => {
                ApiError::AuthError { source: e.into() }
            }
            e @ (GitHubError::HttpError { .. } | GitHubError::UnexpectedStatus { .. }) => {
                ApiError::RequestError { source: e.into() }
            }
        }
    }
}
