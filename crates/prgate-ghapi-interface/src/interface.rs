use async_trait::async_trait;
use prgate_models::CommitStatus;

use crate::{types::GhPullRequest, Result};

/// Pull request platform interface.
///
/// Each code-hosting platform provides its own implementation.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Get a pull request from its number.
    async fn pulls_get(&self, owner: &str, name: &str, pr_number: u64) -> Result<GhPullRequest>;
    /// List files changed by a pull request, relative to the repository root.
    ///
    /// Renamed files contribute both their new and previous path. On failure,
    /// files collected so far are available through
    /// [`ApiError::partial_result`](crate::ApiError::partial_result).
    async fn pull_files_list(&self, owner: &str, name: &str, pr_number: u64)
        -> Result<Vec<String>>;
    /// Check if at least one submitted review approves the pull request.
    async fn pull_is_approved(&self, owner: &str, name: &str, pr_number: u64) -> Result<bool>;
    /// Check if the pull request merge control is currently actionable.
    async fn pull_is_mergeable(&self, owner: &str, name: &str, pr_number: u64) -> Result<bool>;
    /// Post a comment on a pull request, split in several comments if needed.
    async fn comments_post(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<()>;
    /// Update commit status.
    #[allow(clippy::too_many_arguments)]
    async fn commit_statuses_update(
        &self,
        owner: &str,
        name: &str,
        git_ref: &str,
        status: CommitStatus,
        context: &str,
        description: &str,
        target_url: &str,
    ) -> Result<()>;
    /// Merge a pull request using a merge method allowed by the repository.
    async fn pulls_merge(&self, owner: &str, name: &str, pr_number: u64) -> Result<()>;
}
