//! API root resolution.

use std::time::Duration;

use http::{header, HeaderMap};
use prgate_config::{Config, DEFAULT_GITHUB_HOSTNAME};
use reqwest::{ClientBuilder, Url};

use crate::errors::GitHubError;

const PUBLIC_API_ROOT: &str = "https://api.github.com";
const ENTERPRISE_API_PATH: &str = "/api/v3/";
const DEFAULT_CONNECT_TIMEOUT_IN_MILLISECONDS: u64 = 5000;

/// Check if a hostname is the public GitHub host.
pub fn is_default_hostname(hostname: &str) -> bool {
    hostname.trim().eq_ignore_ascii_case(DEFAULT_GITHUB_HOSTNAME)
}

/// Root URL of a GitHub REST API, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoot(String);

impl ApiRoot {
    /// Public GitHub API root.
    pub fn public() -> Self {
        Self(PUBLIC_API_ROOT.into())
    }

    /// Resolve the API root of a GitHub host.
    ///
    /// Enterprise hosts are served under `https://<hostname>/api/v3`.
    pub fn from_hostname(hostname: &str) -> Result<Self, GitHubError> {
        let hostname = hostname.trim();
        if is_default_hostname(hostname) {
            return Ok(Self::public());
        }

        let invalid = |reason: String| GitHubError::InvalidHostname {
            hostname: hostname.into(),
            reason,
        };

        let url = Url::parse(&format!("https://{hostname}{ENTERPRISE_API_PATH}"))
            .map_err(|e| invalid(e.to_string()))?;
        if url.path() != ENTERPRISE_API_PATH
            || !url.username().is_empty()
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(invalid("not a host authority".into()));
        }

        Ok(Self(url.as_str().trim_end_matches('/').into()))
    }

    /// Use an explicit API root URL.
    pub fn from_url(url: &str) -> Result<Self, GitHubError> {
        let parsed = Url::parse(url).map_err(|e| GitHubError::InvalidHostname {
            hostname: url.into(),
            reason: e.to_string(),
        })?;

        Ok(Self(parsed.as_str().trim_end_matches('/').into()))
    }

    /// Get root as string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build an API URL from a path starting with `/`.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

/// Where and how to reach the GitHub API.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub api_root: ApiRoot,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl ConnectionSettings {
    /// Build settings targeting an API root, with default options.
    pub fn new(api_root: ApiRoot) -> Self {
        Self {
            api_root,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_IN_MILLISECONDS),
            user_agent: format!("prgate/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Build settings from configuration.
    pub fn from_config(config: &Config) -> Result<Self, GitHubError> {
        Ok(Self {
            api_root: ApiRoot::from_hostname(&config.api.github.hostname)?,
            connect_timeout: Duration::from_millis(config.api.github.connect_timeout),
            user_agent: format!("prgate/{}", config.version),
        })
    }

    /// Get an unauthenticated client builder.
    pub fn client_builder(&self) -> ClientBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        ClientBuilder::new()
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.clone())
            .default_headers(headers)
    }
}
