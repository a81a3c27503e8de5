use serde::{Deserialize, Serialize};

/// GitHub pull request merge result.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhMergeResult {
    /// Merge commit SHA.
    #[serde(default)]
    pub sha: Option<String>,
    /// Merged?
    #[serde(default)]
    pub merged: bool,
    /// Message.
    #[serde(default)]
    pub message: String,
}
