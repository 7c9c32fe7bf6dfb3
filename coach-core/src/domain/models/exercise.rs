use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::ExerciseId;

/// What an exercise asks of the athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseTarget {
    SetsReps { sets: u32, reps: u32 },
    Duration { seconds: u32 },
}

impl std::fmt::Display for ExerciseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseTarget::SetsReps { sets, reps } => write!(f, "{}x{}", sets, reps),
            ExerciseTarget::Duration { seconds } => write!(f, "{}s", seconds),
        }
    }
}

/// Immutable definition of one exercise within a session plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSpec {
    pub id: ExerciseId,
    pub name: String,
    pub target: ExerciseTarget,
    /// Position within the session. Unique per plan.
    pub ordinal: u32,
}

impl ExerciseSpec {
    pub fn new(
        id: impl Into<ExerciseId>,
        name: impl Into<String>,
        target: ExerciseTarget,
        ordinal: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target,
            ordinal,
        }
    }

    pub fn sets_reps(
        id: impl Into<ExerciseId>,
        name: impl Into<String>,
        sets: u32,
        reps: u32,
        ordinal: u32,
    ) -> Self {
        Self::new(id, name, ExerciseTarget::SetsReps { sets, reps }, ordinal)
    }

    pub fn timed(
        id: impl Into<ExerciseId>,
        name: impl Into<String>,
        seconds: u32,
        ordinal: u32,
    ) -> Self {
        Self::new(id, name, ExerciseTarget::Duration { seconds }, ordinal)
    }
}

/// Work the athlete actually performed, recorded at completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Performance {
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub duration_secs: Option<u32>,
}

impl Performance {
    pub fn sets_reps(sets: u32, reps: u32) -> Self {
        Self {
            sets: Some(sets),
            reps: Some(reps),
            duration_secs: None,
        }
    }

    pub fn timed(duration_secs: u32) -> Self {
        Self {
            duration_secs: Some(duration_secs),
            ..Self::default()
        }
    }
}

/// Per-session progress for one exercise.
///
/// Only `SessionEngine` mutates these; callers get shared references or clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseProgress {
    pub spec: ExerciseSpec,
    pub completed: bool,
    pub completed_at: Option<OffsetDateTime>,
    pub performed: Option<Performance>,
}

impl ExerciseProgress {
    pub fn new(spec: ExerciseSpec) -> Self {
        Self {
            spec,
            completed: false,
            completed_at: None,
            performed: None,
        }
    }

    pub fn id(&self) -> &ExerciseId {
        &self.spec.id
    }

    pub(crate) fn mark_completed(&mut self, at: OffsetDateTime, performed: Option<Performance>) {
        self.completed = true;
        self.completed_at = Some(at);
        self.performed = performed;
    }
}
