//! Drives one configured session through the training service.
//!
//! Each exercise takes `work` time, then a rest of the plan's rest type runs
//! to expiry before the next exercise. The final exercise is not followed by
//! a rest. A cancellation future (Ctrl-C in the binary) abandons the session.

use std::{future::Future, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use coach_core::domain::{
    models::{SessionId, SessionOutcome, SessionSummary},
    ports::inbound::TrainingService,
    run_rest_ticker, TickerExit,
};

use crate::config::PlanSettings;

pub struct Pacing {
    pub work: Duration,
    pub tick_interval: Duration,
}

pub async fn run_plan<S, C>(
    service: Arc<S>,
    plan: &PlanSettings,
    pacing: &Pacing,
    cancelled: C,
) -> Result<SessionSummary>
where
    S: TrainingService,
    C: Future<Output = ()>,
{
    service
        .start_session(SessionId::new(&plan.session_id), plan.exercises.clone())
        .await
        .context("Failed to start session")?;

    tokio::select! {
        result = drive(service.clone(), plan, pacing) => result?,
        _ = cancelled => {
            tracing::warn!(session = %plan.session_id, "Interrupted, abandoning session");
            return service
                .finish_session(SessionOutcome::Abandoned)
                .await
                .context("Failed to abandon session");
        }
    }

    service
        .finish_session(SessionOutcome::Completed)
        .await
        .context("Failed to finish session")
}

async fn drive<S: TrainingService>(
    service: Arc<S>,
    plan: &PlanSettings,
    pacing: &Pacing,
) -> Result<()> {
    while let Some(current) = service.current_exercise().await {
        let exercise = current.spec;
        tracing::info!(
            exercise = %exercise.id,
            name = %exercise.name,
            target = %exercise.target,
            "Starting exercise"
        );
        tokio::time::sleep(pacing.work).await;

        let ratio = service
            .complete_exercise(&exercise.id, None)
            .await
            .with_context(|| format!("Failed to complete exercise {}", exercise.id))?;
        tracing::info!(
            exercise = %exercise.id,
            percent = (ratio * 100.0).round() as u32,
            "Exercise done"
        );

        if service.current_exercise().await.is_none() {
            break;
        }

        let ticket = service
            .start_rest(&plan.rest_type)
            .await
            .context("Failed to start rest")?;
        tracing::info!(
            rest_type = %ticket.config.name,
            seconds = ticket.remaining_secs,
            "Resting"
        );

        match run_rest_ticker(service.clone(), ticket.generation, pacing.tick_interval).await {
            TickerExit::Expired(_) => {}
            TickerExit::Superseded => {
                tracing::warn!(generation = %ticket.generation, "Rest was cancelled elsewhere");
            }
        }
    }

    Ok(())
}
