use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{models::RestTypeConfig, ports::outbound::FeedbackSink, TrainingError};

/// Feedback sink that reports expiries as log events.
///
/// Stands in for a notification or haptic device on hosts without one.
#[derive(Debug, Default)]
pub struct TracingFeedbackSink {
    delivered: AtomicUsize,
}

impl TracingFeedbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of expiries delivered so far.
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackSink for TracingFeedbackSink {
    async fn timer_expired(&self, config: &RestTypeConfig) -> Result<(), TrainingError> {
        self.delivered.fetch_add(1, Ordering::SeqCst);
        tracing::info!(
            rest_type = %config.name,
            category = %config.category,
            duration_secs = config.default_duration_secs,
            "Rest is over"
        );
        Ok(())
    }
}
