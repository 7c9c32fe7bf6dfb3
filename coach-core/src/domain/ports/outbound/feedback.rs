use async_trait::async_trait;

use crate::domain::{models::RestTypeConfig, TrainingError};

#[async_trait]
impl FeedbackSink for () {
    async fn timer_expired(&self, _config: &RestTypeConfig) -> Result<(), TrainingError> {
        Ok(())
    }
}

/// Outbound port for notifications and haptic feedback.
#[async_trait]
pub trait FeedbackSink: Send + Sync + 'static {
    /// A rest period ran out.
    async fn timer_expired(&self, config: &RestTypeConfig) -> Result<(), TrainingError>;
}
