use thiserror::Error;

use super::models::{ExerciseId, SessionState, TimerState};

/// Errors raised by `SessionEngine` transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    #[error("unknown exercise: {0}")]
    UnknownExercise(ExerciseId),
    #[error("exercise already completed: {0}")]
    AlreadyCompleted(ExerciseId),
    #[error("session already finished as {0}")]
    AlreadyTerminal(SessionState),
    #[error("invalid session definition: {0}")]
    InvalidSessionDefinition(String),
}

/// Errors raised by `RestTimer` transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("cannot {operation} while timer is {state}")]
    InvalidState {
        operation: &'static str,
        state: TimerState,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("a rest timer is already active")]
    TimerAlreadyActive,
}

/// Errors raised while building the rest-type catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate rest type: {0}")]
    DuplicateRestType(String),
    #[error("rest type '{0}' has a zero duration")]
    ZeroDuration(String),
}

/// Errors that can occur during training service operations.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error("unknown rest type: {0}")]
    UnknownRestType(String),
    #[error("{0}")]
    Unknown(String),
}

impl TrainingError {
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}
