//! GitHub App installation resolution.

use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    errors::GitHubError,
    transport::{InstallationSigner, RequestSigner, Transport},
};

/// Identifier as returned by the identity endpoint, string or number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct AppIdentity {
    id: RawIdentifier,
}

impl RawIdentifier {
    fn parse(self) -> Result<u64, GitHubError> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(value) => value
                .trim()
                .parse()
                .map_err(|_| GitHubError::InvalidInstallationId { value }),
        }
    }
}

/// Resolves the installation of a GitHub App and builds installation-scoped transports.
pub struct InstallationResolver {
    app_transport: Transport,
}

impl InstallationResolver {
    /// Creates a resolver from a transport authenticated as the application.
    pub fn new(app_transport: Transport) -> Self {
        Self { app_transport }
    }

    /// Fetch the installation identifier from the application identity endpoint.
    #[tracing::instrument(skip(self), ret)]
    pub async fn resolve_installation_id(&self) -> Result<u64, GitHubError> {
        let request = self.app_transport.request(Method::GET, "/app").await?;
        let identity: AppIdentity = self.app_transport.send(request).await?.json().await?;

        identity.id.parse()
    }

    /// Build a transport acting as an installation.
    ///
    /// The access token is minted before returning, then renewed on demand.
    #[tracing::instrument(skip(self))]
    pub async fn installation_transport(
        &self,
        installation_id: u64,
    ) -> Result<Transport, GitHubError> {
        let app = self
            .app_transport
            .app_signer()
            .cloned()
            .ok_or_else(|| GitHubError::InvalidCredentials {
                reason: "installation tokens require an application transport".into(),
            })?;

        let transport = self
            .app_transport
            .with_signer(RequestSigner::Installation(InstallationSigner::new(
                app,
                installation_id,
            )));
        transport.warm_up().await?;

        info!(installation_id = installation_id, message = "Installation token acquired");
        Ok(transport)
    }

    /// Resolve the installation then build its transport.
    pub async fn resolve(&self) -> Result<Transport, GitHubError> {
        let installation_id = self.resolve_installation_id().await?;
        debug!(installation_id = installation_id, message = "Resolved installation");

        self.installation_transport(installation_id).await
    }
}
