//! Config module.

use std::env;

/// Public GitHub hostname.
pub const DEFAULT_GITHUB_HOSTNAME: &str = "github.com";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// GitHub options.
    pub github: ApiGitHubConfig,
}

#[derive(Debug, Clone)]
pub struct ApiGitHubConfig {
    /// GitHub hostname (`github.com` or an Enterprise host).
    pub hostname: String,
    /// GitHub API connect timeout (in milliseconds).
    pub connect_timeout: u64,
    /// GitHub username, used with the personal token.
    pub user: String,
    /// GitHub API personal token.
    pub token: String,
    /// GitHub App ID.
    pub app_id: u64,
    /// GitHub App private key, as PEM.
    pub app_private_key: String,
    /// Path to a file containing the GitHub App private key.
    pub app_key_path: String,
    /// Organization owning the GitHub App, if any.
    pub org: String,
}

impl ApiGitHubConfig {
    /// Check if a personal token is configured.
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Check if a private key is configured, inline or as a path.
    pub fn has_private_key(&self) -> bool {
        !self.app_private_key.is_empty() || !self.app_key_path.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API options.
    pub api: ApiConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Config {
        Config {
            api: ApiConfig {
                github: ApiGitHubConfig {
                    hostname: env_to_str("PRGATE_GITHUB_HOSTNAME", DEFAULT_GITHUB_HOSTNAME),
                    connect_timeout: env_to_u64("PRGATE_GITHUB_CONNECT_TIMEOUT", 5000),
                    user: env_to_str("PRGATE_GITHUB_USER", ""),
                    token: env_to_str("PRGATE_GITHUB_TOKEN", ""),
                    app_id: env_to_u64("PRGATE_GITHUB_APP_ID", 0),
                    app_private_key: env_to_str("PRGATE_GITHUB_APP_PRIVATE_KEY", ""),
                    app_key_path: env_to_str("PRGATE_GITHUB_APP_KEY_PATH", ""),
                    org: env_to_str("PRGATE_GITHUB_ORG", ""),
                },
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("PRGATE_LOGGING_USE_BUNYAN", false),
            },
            version,
        }
    }

    pub fn from_env_no_version() -> Self {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
