use serde::{Deserialize, Serialize};

use super::{GhMergeableState, GhPullRequestState};
use crate::types::common::{GhBranchShort, GhUser};

/// GitHub Pull request.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequest {
    /// Number.
    pub number: u64,
    /// State.
    #[serde(default)]
    pub state: GhPullRequestState,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// User.
    #[serde(default)]
    pub user: GhUser,
    /// Head branch.
    pub head: GhBranchShort,
    /// Base branch.
    pub base: GhBranchShort,
    /// Draft.
    #[serde(default)]
    pub draft: bool,
    /// Merged?
    #[serde(default)]
    pub merged: Option<bool>,
    /// Mergeable?
    #[serde(default)]
    pub mergeable: Option<bool>,
    /// Merge-readiness state.
    #[serde(default)]
    pub mergeable_state: GhMergeableState,
}
