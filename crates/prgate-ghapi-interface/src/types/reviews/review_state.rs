use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// GitHub Review state.
#[derive(Debug, Deserialize, Serialize, PartialEq, Default, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GhReviewState {
    /// Approved.
    Approved,
    /// Changes requested.
    ChangesRequested,
    /// Commented.
    Commented,
    /// Dismissed.
    Dismissed,
    /// Pending.
    #[default]
    Pending,
    /// Unknown value.
    #[serde(other)]
    Unknown,
}

impl Display for GhReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Approved => "APPROVED",
            Self::ChangesRequested => "CHANGES_REQUESTED",
            Self::Commented => "COMMENTED",
            Self::Dismissed => "DISMISSED",
            Self::Pending => "PENDING",
            Self::Unknown => "UNKNOWN",
        };

        f.write_str(value)
    }
}
