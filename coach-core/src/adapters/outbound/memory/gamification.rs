//! In-memory implementation of the GamificationClient port.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use time::Date;
use tokio::sync::RwLock;

use crate::domain::{
    models::{AthleteId, ExerciseId, SessionOutcome, SessionSummary},
    ports::outbound::GamificationClient,
    TrainingError,
};

/// How many points each event is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PointsRules {
    pub per_exercise: u32,
    /// Awarded when a session finishes `Completed` with every exercise done.
    pub completion_bonus: u32,
}

impl Default for PointsRules {
    fn default() -> Self {
        Self {
            per_exercise: 10,
            completion_bonus: 50,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamificationProfile {
    pub points: u64,
    pub streak_days: u32,
    pub last_training_day: Option<Date>,
}

impl GamificationProfile {
    /// Count a completed session on `day` towards the streak.
    fn register_training_day(&mut self, day: Date) {
        self.streak_days = match self.last_training_day {
            Some(last) if last == day => self.streak_days.max(1),
            Some(last) if last.next_day() == Some(day) => self.streak_days + 1,
            _ => 1,
        };
        self.last_training_day = Some(day);
    }
}

/// Points ledger and day streaks kept in process memory.
pub struct InMemoryGamification {
    rules: PointsRules,
    profiles: RwLock<HashMap<AthleteId, GamificationProfile>>,
}

impl InMemoryGamification {
    pub fn new(rules: PointsRules) -> Self {
        Self {
            rules,
            profiles: RwLock::new(HashMap::new()),
        }
    }

    pub async fn profile(&self, athlete_id: &AthleteId) -> GamificationProfile {
        self.profiles
            .read()
            .await
            .get(athlete_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemoryGamification {
    fn default() -> Self {
        Self::new(PointsRules::default())
    }
}

#[async_trait]
impl GamificationClient for InMemoryGamification {
    async fn exercise_completed(
        &self,
        athlete_id: &AthleteId,
        exercise_id: &ExerciseId,
        ratio: f64,
    ) -> Result<(), TrainingError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(athlete_id.clone()).or_default();
        profile.points += u64::from(self.rules.per_exercise);

        tracing::info!(
            athlete = %athlete_id,
            exercise = %exercise_id,
            ratio,
            points = profile.points,
            "Awarded exercise points"
        );
        Ok(())
    }

    async fn session_finished(
        &self,
        athlete_id: &AthleteId,
        summary: &SessionSummary,
    ) -> Result<(), TrainingError> {
        if summary.outcome == SessionOutcome::Abandoned {
            return Ok(());
        }

        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(athlete_id.clone()).or_default();

        if summary.is_fully_completed() {
            profile.points += u64::from(self.rules.completion_bonus);
        }
        profile.register_training_day(summary.finished_at.date());

        tracing::info!(
            athlete = %athlete_id,
            session = %summary.session_id,
            points = profile.points,
            streak = profile.streak_days,
            "Updated streak"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::*;

    fn summary(outcome: SessionOutcome, completed: usize, day_offset: i64) -> SessionSummary {
        let started_at = OffsetDateTime::UNIX_EPOCH + Duration::days(day_offset);
        SessionSummary {
            session_id: "s".into(),
            outcome,
            completed,
            total: 3,
            completed_exercises: Vec::new(),
            started_at,
            finished_at: started_at + Duration::hours(1),
            elapsed: Duration::hours(1),
        }
    }

    #[tokio::test]
    async fn awards_points_per_exercise() {
        let gamification = InMemoryGamification::default();
        let athlete = AthleteId::new("ana");

        gamification
            .exercise_completed(&athlete, &"a".into(), 0.5)
            .await
            .unwrap();
        gamification
            .exercise_completed(&athlete, &"b".into(), 1.0)
            .await
            .unwrap();

        assert_eq!(gamification.profile(&athlete).await.points, 20);
    }

    #[tokio::test]
    async fn completion_bonus_only_for_full_sessions() {
        let gamification = InMemoryGamification::new(PointsRules {
            per_exercise: 0,
            completion_bonus: 100,
        });
        let athlete = AthleteId::new("ana");

        gamification
            .session_finished(&athlete, &summary(SessionOutcome::Completed, 2, 0))
            .await
            .unwrap();
        assert_eq!(gamification.profile(&athlete).await.points, 0);

        gamification
            .session_finished(&athlete, &summary(SessionOutcome::Completed, 3, 1))
            .await
            .unwrap();
        assert_eq!(gamification.profile(&athlete).await.points, 100);
    }

    #[tokio::test]
    async fn streak_grows_on_consecutive_days_and_resets_on_gaps() {
        let gamification = InMemoryGamification::default();
        let athlete = AthleteId::new("ana");

        for day in [0, 1, 1, 2] {
            gamification
                .session_finished(&athlete, &summary(SessionOutcome::Completed, 3, day))
                .await
                .unwrap();
        }
        assert_eq!(gamification.profile(&athlete).await.streak_days, 3);

        gamification
            .session_finished(&athlete, &summary(SessionOutcome::Completed, 3, 5))
            .await
            .unwrap();
        assert_eq!(gamification.profile(&athlete).await.streak_days, 1);
    }

    #[tokio::test]
    async fn abandoned_sessions_leave_profile_alone() {
        let gamification = InMemoryGamification::default();
        let athlete = AthleteId::new("ana");

        gamification
            .session_finished(&athlete, &summary(SessionOutcome::Abandoned, 3, 0))
            .await
            .unwrap();

        assert_eq!(
            gamification.profile(&athlete).await,
            GamificationProfile::default()
        );
    }
}
