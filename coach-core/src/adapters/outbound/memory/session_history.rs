//! In-memory implementation of the SessionHistoryRepository port.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{AthleteId, SessionSummary},
    ports::outbound::SessionHistoryRepository,
    TrainingError,
};

#[derive(Default)]
pub struct InMemorySessionHistory {
    sessions: RwLock<HashMap<AthleteId, Vec<SessionSummary>>>,
}

impl InMemorySessionHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionHistoryRepository for InMemorySessionHistory {
    async fn record_session(
        &self,
        athlete_id: &AthleteId,
        summary: &SessionSummary,
    ) -> Result<(), TrainingError> {
        self.sessions
            .write()
            .await
            .entry(athlete_id.clone())
            .or_default()
            .push(summary.clone());
        Ok(())
    }

    async fn get_history(
        &self,
        athlete_id: &AthleteId,
    ) -> Result<Vec<SessionSummary>, TrainingError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(athlete_id)
            .cloned()
            .unwrap_or_default())
    }
}
