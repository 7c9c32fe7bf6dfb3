//! Gamification port (outbound).
//!
//! Points and streak counters live outside the core; the service only reports
//! what happened.

use async_trait::async_trait;

use crate::domain::{
    models::{AthleteId, ExerciseId, SessionSummary},
    TrainingError,
};

#[async_trait]
impl GamificationClient for () {
    async fn exercise_completed(
        &self,
        _athlete_id: &AthleteId,
        _exercise_id: &ExerciseId,
        _ratio: f64,
    ) -> Result<(), TrainingError> {
        Ok(())
    }

    async fn session_finished(
        &self,
        _athlete_id: &AthleteId,
        _summary: &SessionSummary,
    ) -> Result<(), TrainingError> {
        Ok(())
    }
}

/// Outbound port for point awards and streak updates.
#[async_trait]
pub trait GamificationClient: Send + Sync + 'static {
    /// Called after every successful exercise completion.
    async fn exercise_completed(
        &self,
        athlete_id: &AthleteId,
        exercise_id: &ExerciseId,
        ratio: f64,
    ) -> Result<(), TrainingError>;

    /// Called once per session, after it reaches a terminal state.
    async fn session_finished(
        &self,
        athlete_id: &AthleteId,
        summary: &SessionSummary,
    ) -> Result<(), TrainingError>;
}
