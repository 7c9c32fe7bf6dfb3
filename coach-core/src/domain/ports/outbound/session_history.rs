//! Session history repository port (outbound).
//!
//! Defines the interface for persisting finished session summaries.

use async_trait::async_trait;

use crate::domain::{
    models::{AthleteId, SessionSummary},
    TrainingError,
};

/// No-op implementation of SessionHistoryRepository.
///
/// Used when the service is created without a history store.
#[async_trait]
impl SessionHistoryRepository for () {
    async fn record_session(
        &self,
        _athlete_id: &AthleteId,
        _summary: &SessionSummary,
    ) -> Result<(), TrainingError> {
        Ok(())
    }

    async fn get_history(
        &self,
        _athlete_id: &AthleteId,
    ) -> Result<Vec<SessionSummary>, TrainingError> {
        Ok(Vec::new())
    }
}

/// Outbound port for session history persistence.
#[async_trait]
pub trait SessionHistoryRepository: Send + Sync + 'static {
    /// Store a finished session for an athlete.
    async fn record_session(
        &self,
        athlete_id: &AthleteId,
        summary: &SessionSummary,
    ) -> Result<(), TrainingError>;

    /// Get all finished sessions for an athlete, oldest first.
    async fn get_history(&self, athlete_id: &AthleteId)
        -> Result<Vec<SessionSummary>, TrainingError>;
}
