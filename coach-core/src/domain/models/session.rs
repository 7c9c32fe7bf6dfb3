use serde::{Deserialize, Serialize};
use strum::Display;
use time::{Duration, OffsetDateTime};

use super::{ExerciseId, SessionId};

/// Lifecycle of a single workout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SessionState {
    NotStarted,
    Active,
    Completed,
    Abandoned,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Abandoned)
    }
}

/// How the caller ends a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SessionOutcome {
    Completed,
    Abandoned,
}

impl From<SessionOutcome> for SessionState {
    fn from(outcome: SessionOutcome) -> Self {
        match outcome {
            SessionOutcome::Completed => SessionState::Completed,
            SessionOutcome::Abandoned => SessionState::Abandoned,
        }
    }
}

/// Summary produced once when a session is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub outcome: SessionOutcome,
    pub completed: usize,
    pub total: usize,
    pub completed_exercises: Vec<ExerciseId>,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    /// Wall-clock time between `start` and `finish`.
    pub elapsed: Duration,
}

impl SessionSummary {
    pub fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    pub fn is_fully_completed(&self) -> bool {
        self.outcome == SessionOutcome::Completed && self.completed == self.total
    }
}
