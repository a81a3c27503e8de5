use serde::{Deserialize, Serialize};

/// Credentials returned once a GitHub App manifest has been converted.
#[derive(Deserialize, Serialize, PartialEq, Eq, Default, Clone)]
pub struct GhAppManifestConversion {
    /// App ID.
    pub id: u64,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Private key, as PEM.
    pub pem: String,
    /// Webhook secret.
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

impl std::fmt::Debug for GhAppManifestConversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GhAppManifestConversion")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
