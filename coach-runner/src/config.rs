use std::{path::Path, str::FromStr, time::Duration};

use coach_core::{
    adapters::outbound::memory::PointsRules,
    domain::models::{ExerciseSpec, RestTypeConfig},
};
use serde::Deserialize;
use strum::{Display, EnumString};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub athlete: AthleteSettings,
    #[serde(default)]
    pub gamification: GamificationSettings,
    pub rest_types: Vec<RestTypeConfig>,
    pub plan: PlanSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    /// Used when RUST_LOG is not set.
    pub log_filter: String,
    pub tick_interval_ms: u64,
    /// How long the runner pretends each exercise takes.
    pub simulated_work_secs: u64,
}

impl ApplicationSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn simulated_work(&self) -> Duration {
        Duration::from_secs(self.simulated_work_secs)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct AthleteSettings {
    pub id: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GamificationSettings {
    pub points_per_exercise: u32,
    pub completion_bonus: u32,
}

impl Default for GamificationSettings {
    fn default() -> Self {
        let rules = PointsRules::default();
        Self {
            points_per_exercise: rules.per_exercise,
            completion_bonus: rules.completion_bonus,
        }
    }
}

impl GamificationSettings {
    pub fn rules(&self) -> PointsRules {
        PointsRules {
            per_exercise: self.points_per_exercise,
            completion_bonus: self.completion_bonus,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct PlanSettings {
    pub session_id: String,
    /// Catalog entry used for rests between exercises.
    pub rest_type: String,
    pub exercises: Vec<ExerciseSpec>,
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory: {}", e)))?;
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    let environment = Environment::from_str(&environment).map_err(|_| {
        config::ConfigError::Message(format!("unknown APP_ENVIRONMENT '{}'", environment))
    })?;

    read_config_from(&base_path.join("config"), environment)
}

pub fn read_config_from(
    config_directory: &Path,
    environment: Environment,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(
            config::File::from(config_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("COACH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
