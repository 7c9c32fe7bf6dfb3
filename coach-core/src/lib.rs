//! Training session and rest timer core.
//!
//! - [`domain::SessionEngine`] tracks one workout session's exercises.
//! - [`domain::RestTimer`] is a pausable, cancellable rest countdown.
//! - [`domain::services::TrainingServiceImpl`] wires both to the outbound
//!   ports (gamification, history, feedback).
//! - [`domain::run_rest_ticker`] delivers the periodic ticks.

pub mod adapters;
pub mod domain;
