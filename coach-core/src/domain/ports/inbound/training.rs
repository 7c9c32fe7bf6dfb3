use async_trait::async_trait;

use crate::domain::{
    models::{
        ExerciseId, ExerciseProgress, ExerciseSpec, Generation, Performance, RestTicket,
        SessionId, SessionOutcome, SessionState, SessionSummary, TickOutcome, TimerSnapshot,
    },
    TrainingError,
};

/// Inbound port for training operations.
///
/// This trait defines the intents a presentation layer forwards into the core.
/// It owns one session and at most one live rest timer, and reports results to
/// the outbound ports (gamification, history, feedback).
///
/// Note: The service is created per athlete, so the athlete id is not passed
/// to individual methods.
#[async_trait]
pub trait TrainingService: Send + Sync + 'static {
    // ========================================================================
    // Session Operations
    // ========================================================================

    /// Start a session. A previously finished session is discarded first.
    async fn start_session(
        &self,
        session_id: SessionId,
        exercises: Vec<ExerciseSpec>,
    ) -> Result<(), TrainingError>;

    /// Mark an exercise done, returning the completion ratio.
    async fn complete_exercise(
        &self,
        exercise_id: &ExerciseId,
        performed: Option<Performance>,
    ) -> Result<f64, TrainingError>;

    /// First exercise not yet completed, in ordinal order.
    async fn current_exercise(&self) -> Option<ExerciseProgress>;

    async fn session_state(&self) -> SessionState;

    async fn completion_ratio(&self) -> f64;

    /// Finish the session. Cancels a live rest timer.
    async fn finish_session(&self, outcome: SessionOutcome)
        -> Result<SessionSummary, TrainingError>;

    /// Finished sessions recorded for this athlete.
    async fn history(&self) -> Result<Vec<SessionSummary>, TrainingError>;

    // ========================================================================
    // Rest Timer Operations
    // ========================================================================

    /// Start a rest period of the named catalog type.
    async fn start_rest(&self, rest_type: &str) -> Result<RestTicket, TrainingError>;

    async fn pause_rest(&self) -> Result<(), TrainingError>;

    async fn resume_rest(&self) -> Result<(), TrainingError>;

    async fn extend_rest(&self, seconds: i64) -> Result<(), TrainingError>;

    /// Cancel the rest period. Harmless when nothing is running.
    async fn cancel_rest(&self);

    /// Deliver a scheduled tick tagged with the generation it was scheduled for.
    async fn tick_rest(&self, generation: Generation) -> TickOutcome;

    async fn rest_snapshot(&self) -> TimerSnapshot;
}
