//! GitHub App manifest code exchange.

use prgate_ghapi_interface::{types::GhAppManifestConversion, ApiError, Result};
use serde::Serialize;
use tracing::debug;

use crate::{api_root::ConnectionSettings, errors::GitHubError, transport::check_response};

/// Exchange the temporary code of a manifest flow for the new app credentials.
///
/// The request is not authenticated: the code is the only proof needed.
#[tracing::instrument(skip(settings, code))]
pub async fn exchange_manifest_code(
    settings: &ConnectionSettings,
    code: &str,
) -> Result<GhAppManifestConversion> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ApiError::ConfigError {
            message: "manifest code is empty".into(),
        });
    }

    let client = settings.client_builder().build().map_err(GitHubError::from)?;
    let response = client
        .post(settings.api_root.join(&format!("/app-manifests/{code}/conversions")))
        .send()
        .await
        .map_err(GitHubError::from)?;
    let conversion: GhAppManifestConversion = check_response(response)
        .await?
        .json()
        .await
        .map_err(GitHubError::from)?;

    debug!(
        app_id = conversion.id,
        app_name = %conversion.name,
        message = "Found credentials for GitHub App"
    );
    Ok(conversion)
}

/// Credentials to hand back to the operator after a manifest exchange.
#[derive(Serialize, PartialEq, Eq)]
pub struct AppRegistration {
    #[serde(rename = "_comment")]
    pub comment: String,
    #[serde(rename = "gh-app-id")]
    pub app_id: u64,
    #[serde(rename = "gh-app-key")]
    pub private_key: String,
    #[serde(rename = "gh-webhook-secret")]
    pub webhook_secret: Option<String>,
}

impl From<GhAppManifestConversion> for AppRegistration {
    fn from(conversion: GhAppManifestConversion) -> Self {
        Self {
            comment: "Update these values in your prgate configuration and restart".into(),
            app_id: conversion.id,
            private_key: conversion.pem,
            webhook_secret: conversion.webhook_secret,
        }
    }
}
