//! Validation utilities.

use std::fmt::Write;

use prgate_config::Config;
use prgate_crypto::RsaUtils;
use prgate_ghapi_github::ApiRoot;
use thiserror::Error;

enum ApiConfigError {
    MissingToken,
    MissingAppId,
    MissingPrivateKey,
    InvalidPrivateKey,
    UnreadablePrivateKey,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    fn _missing(error: &mut String, name: &str) {
        let _ = write!(error, "\n  - Missing env. var.: {}", name);
    }

    fn _invalid(error: &mut String, name: &str, reason: &str) {
        let _ = write!(error, "\n  - Invalid env. var.: {} ({})", name, reason);
    }

    let mut error = String::new();

    if let Err(e) = ApiRoot::from_hostname(&config.api.github.hostname) {
        _invalid(&mut error, "PRGATE_GITHUB_HOSTNAME", &e.to_string());
    }

    // Check API credentials: token or private key
    match validate_api_credentials(config) {
        Err(ApiConfigError::MissingToken) => {
            _missing(&mut error, "PRGATE_GITHUB_TOKEN");
        }
        Err(ApiConfigError::MissingAppId) => {
            _missing(&mut error, "PRGATE_GITHUB_APP_ID");
        }
        Err(ApiConfigError::MissingPrivateKey) => {
            _missing(&mut error, "PRGATE_GITHUB_APP_PRIVATE_KEY");
        }
        Err(ApiConfigError::InvalidPrivateKey) => {
            _invalid(
                &mut error,
                "PRGATE_GITHUB_APP_PRIVATE_KEY",
                "not a RSA private key",
            );
        }
        Err(ApiConfigError::UnreadablePrivateKey) => {
            _invalid(
                &mut error,
                "PRGATE_GITHUB_APP_KEY_PATH",
                "unreadable or not a RSA private key",
            );
        }
        Ok(()) => (),
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

fn validate_api_credentials(config: &Config) -> Result<(), ApiConfigError> {
    // Check token first
    if config.api.github.has_token() {
        return Ok(());
    }

    match validate_github_app_config(config) {
        // Nothing about an app is configured, a token is the simplest fix.
        Err(ApiConfigError::MissingPrivateKey) if config.api.github.app_id == 0 => {
            Err(ApiConfigError::MissingToken)
        }
        res => res,
    }
}

fn validate_github_app_config(config: &Config) -> Result<(), ApiConfigError> {
    let github = &config.api.github;

    if !github.app_private_key.is_empty() {
        if !RsaUtils::is_valid_private_key(&github.app_private_key) {
            return Err(ApiConfigError::InvalidPrivateKey);
        }
    } else if !github.app_key_path.is_empty() {
        match std::fs::read_to_string(&github.app_key_path) {
            Ok(pem) if RsaUtils::is_valid_private_key(&pem) => (),
            _ => return Err(ApiConfigError::UnreadablePrivateKey),
        }
    } else {
        return Err(ApiConfigError::MissingPrivateKey);
    }

    if github.app_id == 0 {
        Err(ApiConfigError::MissingAppId)
    } else {
        Ok(())
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
