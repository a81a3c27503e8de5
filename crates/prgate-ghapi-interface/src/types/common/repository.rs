use prgate_models::MergeMethodFlags;
use serde::{Deserialize, Serialize};

use super::GhUser;

/// GitHub Repository.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhRepository {
    /// Name.
    pub name: String,
    /// Full name.
    pub full_name: String,
    /// Owner.
    pub owner: GhUser,
    /// Allow merge commits.
    #[serde(default)]
    pub allow_merge_commit: bool,
    /// Allow rebase merging.
    #[serde(default)]
    pub allow_rebase_merge: bool,
    /// Allow squash merging.
    #[serde(default)]
    pub allow_squash_merge: bool,
}

impl GhRepository {
    /// Get the merge methods allowed on this repository.
    pub fn merge_method_flags(&self) -> MergeMethodFlags {
        MergeMethodFlags {
            allow_merge_commit: self.allow_merge_commit,
            allow_rebase: self.allow_rebase_merge,
            allow_squash: self.allow_squash_merge,
        }
    }
}
