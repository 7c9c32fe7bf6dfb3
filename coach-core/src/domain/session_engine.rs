//! Lifecycle of a single workout session.
//!
//! `NotStarted -> Active -> {Completed, Abandoned}`. Completing every exercise
//! does not finish the session; the caller decides when to call `finish`.

use std::collections::HashSet;
use std::sync::Arc;

use time::OffsetDateTime;

use super::{
    models::{
        ExerciseId, ExerciseProgress, ExerciseSpec, Performance, SessionId, SessionOutcome,
        SessionState, SessionSummary,
    },
    ports::outbound::{Clock, SystemClock},
    SessionError,
};

pub struct SessionEngine {
    clock: Arc<dyn Clock>,
    state: SessionState,
    session_id: Option<SessionId>,
    /// Held in ordinal order.
    progress: Vec<ExerciseProgress>,
    started_at: Option<OffsetDateTime>,
}

impl SessionEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: SessionState::NotStarted,
            session_id: None,
            progress: Vec::new(),
            started_at: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn progress(&self) -> &[ExerciseProgress] {
        &self.progress
    }

    pub fn started_at(&self) -> Option<OffsetDateTime> {
        self.started_at
    }

    /// Begin the session with an ordered exercise plan.
    pub fn start(
        &mut self,
        session_id: impl Into<SessionId>,
        exercises: Vec<ExerciseSpec>,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::NotStarted {
            return Err(SessionError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }

        validate_definition(&exercises)?;

        let mut exercises = exercises;
        exercises.sort_by_key(|spec| spec.ordinal);

        let session_id = session_id.into();
        tracing::debug!(
            session = %session_id,
            exercises = exercises.len(),
            "Session started"
        );

        self.progress = exercises.into_iter().map(ExerciseProgress::new).collect();
        self.session_id = Some(session_id);
        self.started_at = Some(self.clock.now());
        self.state = SessionState::Active;
        Ok(())
    }

    /// Mark an exercise done. Returns the new completion ratio.
    pub fn complete_exercise(&mut self, exercise_id: &ExerciseId) -> Result<f64, SessionError> {
        self.complete(exercise_id, None)
    }

    /// Like `complete_exercise`, also recording what was actually performed.
    pub fn complete_exercise_with(
        &mut self,
        exercise_id: &ExerciseId,
        performed: Performance,
    ) -> Result<f64, SessionError> {
        self.complete(exercise_id, Some(performed))
    }

    fn complete(
        &mut self,
        exercise_id: &ExerciseId,
        performed: Option<Performance>,
    ) -> Result<f64, SessionError> {
        if self.state != SessionState::Active {
            return Err(SessionError::InvalidState {
                operation: "complete exercise",
                state: self.state,
            });
        }

        let now = self.clock.now();
        let entry = self
            .progress
            .iter_mut()
            .find(|p| p.id() == exercise_id)
            .ok_or_else(|| SessionError::UnknownExercise(exercise_id.clone()))?;

        if entry.completed {
            return Err(SessionError::AlreadyCompleted(exercise_id.clone()));
        }

        entry.mark_completed(now, performed);

        let ratio = self.completion_ratio();
        tracing::debug!(exercise = %exercise_id, ratio, "Exercise completed");
        Ok(ratio)
    }

    /// First uncompleted exercise in ordinal order.
    pub fn current_exercise(&self) -> Option<&ExerciseProgress> {
        self.progress.iter().find(|p| !p.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.progress.iter().filter(|p| p.completed).count()
    }

    /// `completed / total`, or 0 before the session has exercises.
    pub fn completion_ratio(&self) -> f64 {
        if self.progress.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.progress.len() as f64
    }

    /// Move to a terminal state and summarise the session.
    pub fn finish(&mut self, outcome: SessionOutcome) -> Result<SessionSummary, SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::AlreadyTerminal(self.state));
        }
        let (Some(session_id), Some(started_at)) = (self.session_id.clone(), self.started_at)
        else {
            return Err(SessionError::InvalidState {
                operation: "finish",
                state: self.state,
            });
        };

        let finished_at = self.clock.now();
        self.state = outcome.into();

        let summary = SessionSummary {
            session_id,
            outcome,
            completed: self.completed_count(),
            total: self.progress.len(),
            completed_exercises: self
                .progress
                .iter()
                .filter(|p| p.completed)
                .map(|p| p.id().clone())
                .collect(),
            started_at,
            finished_at,
            elapsed: finished_at - started_at,
        };

        tracing::debug!(
            session = %summary.session_id,
            outcome = %outcome,
            completed = summary.completed,
            total = summary.total,
            "Session finished"
        );

        Ok(summary)
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

fn validate_definition(exercises: &[ExerciseSpec]) -> Result<(), SessionError> {
    if exercises.is_empty() {
        return Err(SessionError::InvalidSessionDefinition(
            "session has no exercises".to_string(),
        ));
    }

    let mut ordinals = HashSet::new();
    let mut ids = HashSet::new();
    for spec in exercises {
        if !ordinals.insert(spec.ordinal) {
            return Err(SessionError::InvalidSessionDefinition(format!(
                "duplicate ordinal {}",
                spec.ordinal
            )));
        }
        if !ids.insert(&spec.id) {
            return Err(SessionError::InvalidSessionDefinition(format!(
                "duplicate exercise id {}",
                spec.id
            )));
        }
    }

    Ok(())
}
