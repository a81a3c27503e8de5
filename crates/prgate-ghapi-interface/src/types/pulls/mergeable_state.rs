use serde::{Deserialize, Serialize};

/// GitHub computed merge-readiness of a pull request.
///
/// See <https://docs.github.com/en/graphql/reference/enums#mergestatestatus>.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhMergeableState {
    /// No conflicts, requirements satisfied (green box).
    Clean,
    /// Failing or pending non-required statuses (yellow box).
    Unstable,
    /// Enterprise pre-receive hooks present (green box).
    HasHooks,
    /// Merge conflicts.
    Dirty,
    /// Blocked by branch protection.
    Blocked,
    /// Head branch is behind base.
    Behind,
    /// Draft pull request.
    Draft,
    /// Not computed yet, or unknown value.
    #[default]
    #[serde(other)]
    Unknown,
}

impl GhMergeableState {
    /// Check if the merge button is clickable in this state.
    pub fn is_merge_clickable(self) -> bool {
        matches!(self, Self::Clean | Self::Unstable | Self::HasHooks)
    }
}
