use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommitStatusError {
    /// Unknown commit status.
    #[error("Unknown commit status: {}", status)]
    UnknownCommitStatus { status: String },
}

/// Commit status, written against a commit SHA.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommitStatus {
    /// Pending.
    #[default]
    Pending,
    /// Success.
    Success,
    /// Failed.
    Failed,
    /// Errored.
    Errored,
}

impl CommitStatus {
    /// Convert commit status to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl Display for CommitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl std::str::FromStr for CommitStatus {
    type Err = CommitStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl TryFrom<&str> for CommitStatus {
    type Error = CommitStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "errored" => Ok(Self::Errored),
            e => Err(CommitStatusError::UnknownCommitStatus {
                status: e.to_string(),
            }),
        }
    }
}

impl From<CommitStatus> for &'static str {
    fn from(commit_status: CommitStatus) -> Self {
        match commit_status {
            CommitStatus::Pending => "pending",
            CommitStatus::Success => "success",
            CommitStatus::Failed => "failed",
            CommitStatus::Errored => "errored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(CommitStatus::try_from("pending").unwrap(), CommitStatus::Pending);
        assert_eq!(CommitStatus::try_from("failed").unwrap(), CommitStatus::Failed);
        assert!(CommitStatus::try_from("failure").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CommitStatus::Errored.to_string(), "errored");
    }
}
