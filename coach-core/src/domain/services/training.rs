use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    catalog::RestTypeCatalog,
    models::{
        AthleteId, ExerciseId, ExerciseProgress, ExerciseSpec, Generation, Performance,
        RestTicket, SessionId, SessionOutcome, SessionState, SessionSummary, TickOutcome,
        TimerSnapshot,
    },
    ports::{
        inbound::TrainingService,
        outbound::{Clock, FeedbackSink, GamificationClient, SessionHistoryRepository},
    },
    rest_timer::RestTimer,
    session_engine::SessionEngine,
    TrainingError,
};

/// Implementation of the TrainingService inbound port.
///
/// Owns one `SessionEngine` and one `RestTimer` for a single athlete. State
/// transitions happen first; the outbound ports are told afterwards, and
/// their failures are logged rather than returned, because the transition has
/// already been applied.
pub struct TrainingServiceImpl<G = (), H = (), F = ()> {
    athlete_id: AthleteId,
    catalog: RestTypeCatalog,
    clock: Arc<dyn Clock>,
    engine: Mutex<SessionEngine>,
    timer: Mutex<RestTimer>,
    gamification: Arc<G>,
    history: Arc<H>,
    feedback: Arc<F>,
}

impl TrainingServiceImpl<(), (), ()> {
    pub fn new(athlete_id: AthleteId, catalog: RestTypeCatalog, clock: Arc<dyn Clock>) -> Self {
        Self {
            athlete_id,
            catalog,
            engine: Mutex::new(SessionEngine::new(clock.clone())),
            timer: Mutex::new(RestTimer::new(clock.clone())),
            clock,
            gamification: Arc::new(()),
            history: Arc::new(()),
            feedback: Arc::new(()),
        }
    }
}

impl<G, H, F> TrainingServiceImpl<G, H, F> {
    pub fn with_gamification<G2>(self, gamification: Arc<G2>) -> TrainingServiceImpl<G2, H, F> {
        TrainingServiceImpl {
            athlete_id: self.athlete_id,
            catalog: self.catalog,
            clock: self.clock,
            engine: self.engine,
            timer: self.timer,
            gamification,
            history: self.history,
            feedback: self.feedback,
        }
    }

    pub fn with_history<H2>(self, history: Arc<H2>) -> TrainingServiceImpl<G, H2, F> {
        TrainingServiceImpl {
            athlete_id: self.athlete_id,
            catalog: self.catalog,
            clock: self.clock,
            engine: self.engine,
            timer: self.timer,
            gamification: self.gamification,
            history,
            feedback: self.feedback,
        }
    }

    pub fn with_feedback<F2>(self, feedback: Arc<F2>) -> TrainingServiceImpl<G, H, F2> {
        TrainingServiceImpl {
            athlete_id: self.athlete_id,
            catalog: self.catalog,
            clock: self.clock,
            engine: self.engine,
            timer: self.timer,
            gamification: self.gamification,
            history: self.history,
            feedback,
        }
    }

    pub fn athlete_id(&self) -> &AthleteId {
        &self.athlete_id
    }

    pub fn catalog(&self) -> &RestTypeCatalog {
        &self.catalog
    }
}

#[async_trait]
impl<G, H, F> TrainingService for TrainingServiceImpl<G, H, F>
where
    G: GamificationClient,
    H: SessionHistoryRepository,
    F: FeedbackSink,
{
    async fn start_session(
        &self,
        session_id: SessionId,
        exercises: Vec<ExerciseSpec>,
    ) -> Result<(), TrainingError> {
        let mut engine = self.engine.lock().await;
        if engine.state().is_terminal() {
            *engine = SessionEngine::new(self.clock.clone());
        }
        engine.start(session_id, exercises)?;

        tracing::info!(
            athlete = %self.athlete_id,
            session = ?engine.session_id(),
            exercises = engine.progress().len(),
            "Training session started"
        );
        Ok(())
    }

    async fn complete_exercise(
        &self,
        exercise_id: &ExerciseId,
        performed: Option<Performance>,
    ) -> Result<f64, TrainingError> {
        let ratio = {
            let mut engine = self.engine.lock().await;
            match performed {
                Some(performed) => engine.complete_exercise_with(exercise_id, performed)?,
                None => engine.complete_exercise(exercise_id)?,
            }
        };

        if let Err(e) = self
            .gamification
            .exercise_completed(&self.athlete_id, exercise_id, ratio)
            .await
        {
            tracing::error!("Failed to report completed exercise: {:?}", e);
        }

        Ok(ratio)
    }

    async fn current_exercise(&self) -> Option<ExerciseProgress> {
        self.engine.lock().await.current_exercise().cloned()
    }

    async fn session_state(&self) -> SessionState {
        self.engine.lock().await.state()
    }

    async fn completion_ratio(&self) -> f64 {
        self.engine.lock().await.completion_ratio()
    }

    async fn finish_session(
        &self,
        outcome: SessionOutcome,
    ) -> Result<SessionSummary, TrainingError> {
        let summary = self.engine.lock().await.finish(outcome)?;
        self.timer.lock().await.cancel();

        tracing::info!(
            athlete = %self.athlete_id,
            session = %summary.session_id,
            outcome = %summary.outcome,
            completed = summary.completed,
            total = summary.total,
            elapsed_secs = summary.elapsed.whole_seconds(),
            "Training session finished"
        );

        if let Err(e) = self.history.record_session(&self.athlete_id, &summary).await {
            tracing::error!("Failed to persist session to history: {:?}", e);
        }
        if let Err(e) = self
            .gamification
            .session_finished(&self.athlete_id, &summary)
            .await
        {
            tracing::error!("Failed to report finished session: {:?}", e);
        }

        Ok(summary)
    }

    async fn history(&self) -> Result<Vec<SessionSummary>, TrainingError> {
        self.history.get_history(&self.athlete_id).await
    }

    async fn start_rest(&self, rest_type: &str) -> Result<RestTicket, TrainingError> {
        let config = self
            .catalog
            .get(rest_type)
            .cloned()
            .ok_or_else(|| TrainingError::UnknownRestType(rest_type.to_string()))?;

        let mut timer = self.timer.lock().await;
        let generation = timer.start(config.clone())?;

        Ok(RestTicket {
            generation,
            remaining_secs: timer.remaining_secs(),
            config,
        })
    }

    async fn pause_rest(&self) -> Result<(), TrainingError> {
        Ok(self.timer.lock().await.pause()?)
    }

    async fn resume_rest(&self) -> Result<(), TrainingError> {
        Ok(self.timer.lock().await.resume()?)
    }

    async fn extend_rest(&self, seconds: i64) -> Result<(), TrainingError> {
        Ok(self.timer.lock().await.extend(seconds)?)
    }

    async fn cancel_rest(&self) {
        self.timer.lock().await.cancel();
    }

    async fn tick_rest(&self, generation: Generation) -> TickOutcome {
        let outcome = self.timer.lock().await.tick(generation);

        if let TickOutcome::Expired(config) = &outcome {
            if let Err(e) = self.feedback.timer_expired(config).await {
                tracing::error!("Failed to deliver rest expiry feedback: {:?}", e);
            }
        }

        outcome
    }

    async fn rest_snapshot(&self) -> TimerSnapshot {
        self.timer.lock().await.snapshot()
    }
}
