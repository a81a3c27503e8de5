use prgate_models::CommitStatus;
use serde::{Deserialize, Serialize};

/// GitHub commit status state
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum GhCommitStatusState {
    /// Error.
    Error,
    /// Failure.
    Failure,
    /// Pending.
    #[default]
    Pending,
    /// Success.
    Success,
}

impl GhCommitStatusState {
    /// Convert status state to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl From<GhCommitStatusState> for &'static str {
    fn from(status_state: GhCommitStatusState) -> Self {
        match status_state {
            GhCommitStatusState::Error => "error",
            GhCommitStatusState::Failure => "failure",
            GhCommitStatusState::Pending => "pending",
            GhCommitStatusState::Success => "success",
        }
    }
}

impl From<CommitStatus> for GhCommitStatusState {
    fn from(status: CommitStatus) -> Self {
        match status {
            CommitStatus::Pending => Self::Pending,
            CommitStatus::Success => Self::Success,
            CommitStatus::Failed => Self::Failure,
            CommitStatus::Errored => Self::Error,
        }
    }
}
