use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeMethodError {
    /// Unknown merge method.
    #[error("Unknown merge method: {}", method)]
    UnknownMergeMethod { method: String },
}

#[derive(Debug, Serialize, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MergeMethod {
    /// Merge commit
    #[default]
    Merge,
    /// Rebase
    Rebase,
    /// Squash
    Squash,
}

/// Merge methods allowed by a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeMethodFlags {
    pub allow_merge_commit: bool,
    pub allow_rebase: bool,
    pub allow_squash: bool,
}

impl MergeMethod {
    /// Pick a merge method allowed by the repository.
    ///
    /// Order of preference is merge commit, rebase, then squash. When nothing
    /// is allowed, merge commit is returned and the platform decides.
    pub fn select(flags: MergeMethodFlags) -> Self {
        if flags.allow_merge_commit {
            Self::Merge
        } else if flags.allow_rebase {
            Self::Rebase
        } else if flags.allow_squash {
            Self::Squash
        } else {
            Self::Merge
        }
    }
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Merge => "merge",
            Self::Rebase => "rebase",
            Self::Squash => "squash",
        };

        f.write_str(value)
    }
}

impl FromStr for MergeMethod {
    type Err = MergeMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl TryFrom<&str> for MergeMethod {
    type Error = MergeMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "merge" => Ok(Self::Merge),
            "rebase" => Ok(Self::Rebase),
            "squash" => Ok(Self::Squash),
            other => Err(MergeMethodError::UnknownMergeMethod {
                method: other.into(),
            }),
        }
    }
}
