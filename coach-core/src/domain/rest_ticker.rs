//! Periodic tick delivery for rest timers.
//!
//! This is the only place the core waits on time. Each ticker is bound to the
//! generation returned by `start_rest`; once that generation is superseded
//! (cancel, restart, finished session) the next tick comes back `Stale` and
//! the ticker exits without touching the newer timer.

use std::{sync::Arc, time::Duration};

use tokio::time::MissedTickBehavior;

use super::{
    models::{Generation, RestTypeConfig, TickOutcome},
    ports::inbound::TrainingService,
};

/// Why a ticker stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerExit {
    Expired(RestTypeConfig),
    Superseded,
}

/// Deliver a tick every `period` until the timer for `generation` expires or
/// is superseded. Paused timers keep the ticker alive.
pub async fn run_rest_ticker<S>(
    service: Arc<S>,
    generation: Generation,
    period: Duration,
) -> TickerExit
where
    S: TrainingService + ?Sized,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match service.tick_rest(generation).await {
            TickOutcome::Running { remaining_secs } => {
                tracing::trace!(generation = %generation, remaining_secs, "Rest tick");
            }
            TickOutcome::Inactive(state) => {
                tracing::trace!(generation = %generation, state = %state, "Rest timer idle");
            }
            TickOutcome::Expired(config) => {
                tracing::debug!(
                    generation = %generation,
                    rest_type = %config.name,
                    "Rest ticker done"
                );
                return TickerExit::Expired(config);
            }
            TickOutcome::Stale => {
                tracing::debug!(generation = %generation, "Rest ticker superseded");
                return TickerExit::Superseded;
            }
        }
    }
}
