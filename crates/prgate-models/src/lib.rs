//! Platform-neutral pull request models.

mod commit_status;
mod merge_method;
mod pull_request_handle;
mod repository_path;

pub use commit_status::{CommitStatus, CommitStatusError};
pub use merge_method::{MergeMethod, MergeMethodError, MergeMethodFlags};
pub use pull_request_handle::{PullRequestHandle, PullRequestHandleError};
pub use repository_path::{RepositoryPath, RepositoryPathError};
