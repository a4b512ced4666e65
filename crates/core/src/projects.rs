//! Project status values.

use serde::{Deserialize, Serialize};

/// Project lifecycle status, stored as TEXT in the `projects` table.
///
/// New projects always start as `NotStarted`; only admins move a project
/// through the remaining states (enforced at the API layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Done,
}

impl ProjectStatus {
    /// The TEXT value persisted in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "not_started",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a value is not a known project status. Also used to
/// reject invalid admin status updates before any write.
#[derive(Debug, thiserror::Error)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(String);

impl TryFrom<String> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "not_started" => Ok(ProjectStatus::NotStarted),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "done" => Ok(ProjectStatus::Done),
            _ => Err(ParseProjectStatusError(value)),
        }
    }
}
