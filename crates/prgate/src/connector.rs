//! Lazy API access.

use async_trait::async_trait;
use prgate_config::Config;
use prgate_ghapi_github::{exchange_manifest_code, ConnectionSettings, GitHubApiService};
use prgate_ghapi_interface::{types::GhAppManifestConversion, ApiService};
use tracing::info;

use crate::Result;

/// Gives commands access to the platform API.
///
/// Connecting may mint tokens, so it only happens for commands needing it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait ApiConnector: Send + Sync {
    /// Authenticate with configured credentials.
    async fn connect(&self) -> Result<Box<dyn ApiService>>;
    /// Exchange a manifest flow code for new app credentials.
    async fn exchange_manifest_code(&self, code: &str) -> Result<GhAppManifestConversion>;
}

pub(crate) struct GitHubConnector {
    config: Config,
}

impl GitHubConnector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ApiConnector for GitHubConnector {
    async fn connect(&self) -> Result<Box<dyn ApiService>> {
        info!(
            hostname = %self.config.api.github.hostname,
            message = "Using GitHubApiService API driver"
        );

        Ok(Box::new(GitHubApiService::from_config(&self.config).await?))
    }

    async fn exchange_manifest_code(&self, code: &str) -> Result<GhAppManifestConversion> {
        let settings = ConnectionSettings::from_config(&self.config)?;
        Ok(exchange_manifest_code(&settings, code).await?)
    }
}
