mod config;
mod runner;

use std::sync::Arc;

use anyhow::{Context, Result};
use coach_core::{
    adapters::outbound::{
        memory::{InMemoryGamification, InMemorySessionHistory},
        TracingFeedbackSink,
    },
    domain::{
        models::AthleteId, ports::outbound::SystemClock, services::TrainingServiceImpl,
        RestTypeCatalog,
    },
};
use tracing_subscriber::EnvFilter;

use crate::{
    config::read_config,
    runner::{run_plan, Pacing},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = read_config().context("Failed to read configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.application.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = RestTypeCatalog::new(settings.rest_types.clone())
        .context("Invalid rest type catalog")?;
    tracing::info!(rest_types = catalog.len(), "Loaded rest type catalog");

    let athlete_id = AthleteId::new(settings.athlete.id.clone());
    let gamification = Arc::new(InMemoryGamification::new(settings.gamification.rules()));
    let history = Arc::new(InMemorySessionHistory::new());
    let feedback = Arc::new(TracingFeedbackSink::new());

    let service = Arc::new(
        TrainingServiceImpl::new(athlete_id.clone(), catalog, Arc::new(SystemClock))
            .with_gamification(gamification.clone())
            .with_history(history)
            .with_feedback(feedback.clone()),
    );

    let pacing = Pacing {
        work: settings.application.simulated_work(),
        tick_interval: settings.application.tick_interval(),
    };
    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    let summary = run_plan(service, &settings.plan, &pacing, interrupted).await?;

    let profile = gamification.profile(&athlete_id).await;
    tracing::info!(
        athlete = %athlete_id,
        points = profile.points,
        streak_days = profile.streak_days,
        rests = feedback.delivered(),
        "Athlete profile"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
    );

    Ok(())
}
