//! Authenticated HTTP transport.

use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use jsonwebtoken::EncodingKey;
use prgate_crypto::{AppClaims, JwtUtils};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{api_root::ApiRoot, errors::GitHubError};

const INSTALLATION_TOKEN_LIFETIME_IN_SECONDS: u64 = 3600;
const INSTALLATION_TOKEN_RENEW_THRESHOLD: f32 = 0.5;

/// HTTP client signing every request with credentials.
///
/// Cloning is cheap and clones share the same installation token.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    api_root: ApiRoot,
    signer: Arc<RequestSigner>,
}

pub(crate) enum RequestSigner {
    Basic { username: String, password: String },
    App(AppSigner),
    Installation(InstallationSigner),
}

#[derive(Clone)]
pub(crate) struct AppSigner {
    app_id: u64,
    key: EncodingKey,
}

pub(crate) struct InstallationSigner {
    app: AppSigner,
    installation_id: u64,
    token: RwLock<Option<InstallationToken>>,
}

#[derive(Debug, Clone)]
struct InstallationToken {
    value: String,
    expires_at: u64,
}

#[derive(Debug, Deserialize)]
struct InstallationTokenResponse {
    token: String,
    #[serde(with = "time::serde::rfc3339")]
    expires_at: OffsetDateTime,
}

impl Transport {
    pub(crate) fn new(client: Client, api_root: ApiRoot, signer: RequestSigner) -> Self {
        Self {
            client,
            api_root,
            signer: Arc::new(signer),
        }
    }

    /// Get the API root this transport targets.
    pub fn api_root(&self) -> &ApiRoot {
        &self.api_root
    }

    /// Get the installation this transport acts as, if any.
    pub fn installation_id(&self) -> Option<u64> {
        match self.signer.as_ref() {
            RequestSigner::Installation(signer) => Some(signer.installation_id),
            _ => None,
        }
    }

    /// Build a signed request for an API path.
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, GitHubError> {
        let builder = self.client.request(method, self.api_root.join(path));

        Ok(match self.signer.as_ref() {
            RequestSigner::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            RequestSigner::App(signer) => builder.bearer_auth(signer.create_token()?),
            RequestSigner::Installation(signer) => {
                builder.bearer_auth(signer.token(&self.client, &self.api_root).await?)
            }
        })
    }

    /// Send a request, turning non-success responses into errors.
    ///
    /// A 401 drops the held installation token, so the next request mints a new one.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, GitHubError> {
        let response = builder.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidate().await;
        }

        check_response(response).await
    }

    /// Forget the held installation token.
    pub async fn invalidate(&self) {
        if let RequestSigner::Installation(signer) = self.signer.as_ref() {
            warn!(
                installation_id = signer.installation_id,
                message = "Dropping installation token"
            );
            *signer.token.write().await = None;
        }
    }

    /// Build a transport sharing this client but signing differently.
    pub(crate) fn with_signer(&self, signer: RequestSigner) -> Self {
        Self::new(self.client.clone(), self.api_root.clone(), signer)
    }

    pub(crate) fn app_signer(&self) -> Option<&AppSigner> {
        match self.signer.as_ref() {
            RequestSigner::App(signer) => Some(signer),
            RequestSigner::Installation(signer) => Some(&signer.app),
            RequestSigner::Basic { .. } => None,
        }
    }

    /// Mint the installation token now instead of on first request.
    pub(crate) async fn warm_up(&self) -> Result<(), GitHubError> {
        if let RequestSigner::Installation(signer) = self.signer.as_ref() {
            signer.token(&self.client, &self.api_root).await?;
        }

        Ok(())
    }
}

impl AppSigner {
    pub(crate) fn new(app_id: u64, key: EncodingKey) -> Self {
        Self { app_id, key }
    }

    /// Create a short-lived JWT authenticating as the application.
    pub(crate) fn create_token(&self) -> Result<String, GitHubError> {
        // https://docs.github.com/en/apps/creating-github-apps/authenticating-with-a-github-app/authenticating-as-a-github-app
        let claims = AppClaims::new(self.app_id, now_timestamp());
        JwtUtils::create_jwt_with_key(&self.key, &claims).map_err(Into::into)
    }
}

impl InstallationSigner {
    pub(crate) fn new(app: AppSigner, installation_id: u64) -> Self {
        Self {
            app,
            installation_id,
            token: RwLock::new(None),
        }
    }

    async fn token(&self, client: &Client, api_root: &ApiRoot) -> Result<String, GitHubError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if !token.needs_renewal(now_timestamp()) {
                return Ok(token.value.clone());
            }
        }

        let mut held = self.token.write().await;
        if let Some(token) = held.as_ref() {
            if !token.needs_renewal(now_timestamp()) {
                return Ok(token.value.clone());
            }
        }

        let token = self
            .create_token(client, api_root)
            .await
            .map_err(|e| GitHubError::InstallationTokenFailed {
                installation_id: self.installation_id,
                source: Box::new(e),
            })?;
        let value = token.value.clone();
        *held = Some(token);

        Ok(value)
    }

    #[tracing::instrument(skip_all, fields(installation_id = self.installation_id))]
    async fn create_token(
        &self,
        client: &Client,
        api_root: &ApiRoot,
    ) -> Result<InstallationToken, GitHubError> {
        debug!(message = "Creating installation access token");

        let url = api_root.join(&format!(
            "/app/installations/{}/access_tokens",
            self.installation_id
        ));
        let response = client
            .post(url)
            .bearer_auth(self.app.create_token()?)
            .send()
            .await?;
        let response = check_response(response)
            .await?
            .json::<InstallationTokenResponse>()
            .await?;

        Ok(InstallationToken {
            value: response.token,
            expires_at: u64::try_from(response.expires_at.unix_timestamp()).unwrap_or(0),
        })
    }
}

impl InstallationToken {
    fn needs_renewal(&self, now_ts: u64) -> bool {
        let margin = (INSTALLATION_TOKEN_LIFETIME_IN_SECONDS as f32
            * INSTALLATION_TOKEN_RENEW_THRESHOLD) as u64;
        now_ts > self.expires_at.saturating_sub(margin)
    }
}

pub(crate) async fn check_response(response: Response) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(GitHubError::UnexpectedStatus {
        status: status.as_u16(),
        url,
        body,
    })
}

pub(crate) fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_renewal() {
        let token = InstallationToken {
            value: "token".into(),
            expires_at: 10_000,
        };

        assert!(!token.needs_renewal(10_000 - 3600));
        assert!(!token.needs_renewal(10_000 - 1800));
        assert!(token.needs_renewal(10_000 - 1799));
        assert!(token.needs_renewal(20_000));
    }
}
