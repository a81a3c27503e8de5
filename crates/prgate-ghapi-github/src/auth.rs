//! Credential providers.

use std::path::PathBuf;

use async_trait::async_trait;
use prgate_config::Config;
use prgate_crypto::PrivateRsaKey;
use prgate_ghapi_interface::{ApiError, Result};
use tracing::{debug, error};

use crate::{
    api_root::ConnectionSettings,
    errors::GitHubError,
    installation::InstallationResolver,
    transport::{AppSigner, RequestSigner, Transport},
};

/// Something able to produce an authenticated transport.
#[async_trait]
pub trait Credentials: Send + Sync {
    /// Build a transport signing every request with these credentials.
    async fn derive_transport(&self, settings: &ConnectionSettings) -> Result<Transport>;
}

/// Username and personal token, sent as basic auth.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    token: String,
}

impl StaticCredentials {
    /// Creates static credentials, trimming surrounding whitespace.
    pub fn new<U: AsRef<str>, T: AsRef<str>>(username: U, token: T) -> Self {
        Self {
            username: username.as_ref().trim().into(),
            token: token.as_ref().trim().into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

#[async_trait]
impl Credentials for StaticCredentials {
    async fn derive_transport(&self, settings: &ConnectionSettings) -> Result<Transport> {
        if self.token.is_empty() {
            return Err(GitHubError::InvalidCredentials {
                reason: "personal token is empty".into(),
            }
            .into());
        }

        let client = settings
            .client_builder()
            .build()
            .map_err(GitHubError::from)?;

        Ok(Transport::new(
            client,
            settings.api_root.clone(),
            RequestSigner::Basic {
                username: self.username.clone(),
                password: self.token.clone(),
            },
        ))
    }
}

/// Where to find the application private key.
#[derive(Debug, Clone)]
pub enum PrivateKeySource {
    Pem(PrivateRsaKey),
    Path(PathBuf),
}

impl PrivateKeySource {
    fn load(&self) -> std::result::Result<PrivateRsaKey, GitHubError> {
        match self {
            Self::Pem(key) => Ok(key.clone()),
            Self::Path(path) => PrivateRsaKey::from_file(path).map_err(Into::into),
        }
    }
}

/// GitHub App identity, exchanged for an installation token.
#[derive(Debug, Clone)]
pub struct AppCredentials {
    app_id: u64,
    key: PrivateKeySource,
}

impl AppCredentials {
    pub fn new(app_id: u64, key: PrivateKeySource) -> Self {
        Self { app_id, key }
    }

    pub fn app_id(&self) -> u64 {
        self.app_id
    }

    /// Build a transport authenticated as the application itself.
    pub fn app_transport(
        &self,
        settings: &ConnectionSettings,
    ) -> std::result::Result<Transport, GitHubError> {
        let key = self.key.load()?.to_encoding_key()?;
        let client = settings.client_builder().build()?;

        Ok(Transport::new(
            client,
            settings.api_root.clone(),
            RequestSigner::App(AppSigner::new(self.app_id, key)),
        ))
    }

    async fn installation_transport(
        &self,
        settings: &ConnectionSettings,
    ) -> std::result::Result<Transport, GitHubError> {
        let resolver = InstallationResolver::new(self.app_transport(settings)?);
        resolver.resolve().await
    }
}

#[async_trait]
impl Credentials for AppCredentials {
    #[tracing::instrument(skip_all, fields(app_id = self.app_id))]
    async fn derive_transport(&self, settings: &ConnectionSettings) -> Result<Transport> {
        debug!(message = "Resolving GitHub App installation");

        self.installation_transport(settings).await.map_err(|e| {
            error!(error = %e, message = "GitHub App authentication failed");
            ApiError::from(GitHubError::AppAuthenticationFailed {
                app_id: self.app_id,
                source: Box::new(e),
            })
        })
    }
}

/// Pick credentials from configuration.
///
/// A personal token takes precedence over a GitHub App.
pub fn credentials_from_config(config: &Config) -> Result<Box<dyn Credentials>> {
    let github = &config.api.github;

    if github.has_token() {
        return Ok(Box::new(StaticCredentials::new(&github.user, &github.token)));
    }

    if github.app_id != 0 && github.has_private_key() {
        let key = if github.app_private_key.is_empty() {
            PrivateKeySource::Path(PathBuf::from(&github.app_key_path))
        } else {
            PrivateKeySource::Pem(PrivateRsaKey::from_pem(github.app_private_key.clone()))
        };

        return Ok(Box::new(AppCredentials::new(github.app_id, key)));
    }

    Err(GitHubError::InvalidCredentials {
        reason: "configure either a personal token or a GitHub App identifier and private key"
            .into(),
    }
    .into())
}
