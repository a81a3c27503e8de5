use serde::{Deserialize, Serialize};

/// GitHub pull request file status.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhPullFileStatus {
    /// Added.
    Added,
    /// Removed.
    Removed,
    /// Modified.
    #[default]
    Modified,
    /// Renamed.
    Renamed,
    /// Copied.
    Copied,
    /// Changed.
    Changed,
    /// Unchanged.
    Unchanged,
    /// Unknown value.
    #[serde(other)]
    Unknown,
}

/// GitHub pull request file.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullFile {
    /// Path, relative to the repository root.
    pub filename: String,
    /// Status.
    pub status: GhPullFileStatus,
    /// Path before a rename.
    #[serde(default)]
    pub previous_filename: Option<String>,
}

impl GhPullFile {
    /// Paths touched by this file: renamed files also yield their previous path.
    pub fn touched_paths(&self) -> impl Iterator<Item = &str> {
        let previous = match self.status {
            GhPullFileStatus::Renamed => self.previous_filename.as_deref(),
            _ => None,
        };

        std::iter::once(self.filename.as_str()).chain(previous)
    }
}
