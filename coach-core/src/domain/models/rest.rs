use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::Generation;

/// Kind of rest period a configuration describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestCategory {
    #[strum(ascii_case_insensitive, serialize = "between_sets")]
    BetweenSets,
    #[strum(ascii_case_insensitive, serialize = "between_exercises")]
    BetweenExercises,
    #[strum(ascii_case_insensitive, serialize = "active_recovery")]
    ActiveRecovery,
    #[strum(ascii_case_insensitive, serialize = "cooldown")]
    Cooldown,
}

/// A named rest duration supplied by the configuration catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestTypeConfig {
    pub name: String,
    pub default_duration_secs: u32,
    pub category: RestCategory,
}

impl RestTypeConfig {
    pub fn new(
        name: impl Into<String>,
        default_duration_secs: u32,
        category: RestCategory,
    ) -> Self {
        Self {
            name: name.into(),
            default_duration_secs,
            category,
        }
    }
}

/// Lifecycle of a rest countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
    Cancelled,
}

impl TimerState {
    /// Running or paused; at most one live timer exists per owner.
    pub fn is_live(&self) -> bool {
        matches!(self, TimerState::Running | TimerState::Paused)
    }
}

/// Point-in-time view of a `RestTimer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_secs: u32,
    pub config: Option<RestTypeConfig>,
    pub generation: Generation,
}

/// Result of delivering one scheduled tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick was scheduled for a superseded generation and was dropped.
    Stale,
    /// The timer is not counting down (paused, idle, or already finished).
    Inactive(TimerState),
    Running { remaining_secs: u32 },
    /// Returned exactly once per generation, on the tick that reaches zero.
    Expired(RestTypeConfig),
}

/// Handed back by `start_rest` so the caller can schedule ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestTicket {
    pub generation: Generation,
    pub remaining_secs: u32,
    pub config: RestTypeConfig,
}
