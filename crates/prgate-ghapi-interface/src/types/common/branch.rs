use serde::{Deserialize, Serialize};

/// GitHub Branch short format.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhBranchShort {
    /// Reference.
    pub r#ref: String,
    /// SHA.
    pub sha: String,
}
