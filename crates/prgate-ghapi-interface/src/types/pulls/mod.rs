mod merge_result;
mod merge_strategy;
mod mergeable_state;
mod pull_file;
mod pull_request;
mod pull_request_state;

pub use merge_result::GhMergeResult;
pub use merge_strategy::GhMergeStrategy;
pub use mergeable_state::GhMergeableState;
pub use pull_file::{GhPullFile, GhPullFileStatus};
pub use pull_request::GhPullRequest;
pub use pull_request_state::GhPullRequestState;
