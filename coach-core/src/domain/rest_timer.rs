//! Cancellable, pausable rest countdown.
//!
//! Remaining time is never decremented blindly. While running, the timer keeps
//! an absolute expected expiry and every tick recomputes
//! `remaining = ceil(max(0, expiry - now))`, so late or missed ticks (process
//! suspension, a busy event loop) do not accumulate drift. Outside `Running`
//! the remainder is frozen at full precision; only the reported seconds are
//! rounded.
//!
//! Ticks are delivered from outside with the generation captured when they
//! were scheduled. `start` and `cancel` advance the generation, which turns any
//! tick still in flight into a no-op.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};

use super::{
    models::{Generation, RestTypeConfig, TickOutcome, TimerSnapshot, TimerState},
    ports::outbound::{Clock, SystemClock},
    TimerError,
};

/// Upper bound on the remaining time; extensions saturate here.
const MAX_REMAINING: Duration = Duration::seconds(u32::MAX as i64);

pub struct RestTimer {
    clock: Arc<dyn Clock>,
    state: TimerState,
    /// Whole seconds as last observed, rounded up.
    remaining_secs: u32,
    /// Exact remainder while not `Running`.
    frozen_remaining: Duration,
    config: Option<RestTypeConfig>,
    generation: Generation,
    /// Only meaningful while `Running`.
    expected_expiry: Option<OffsetDateTime>,
}

impl RestTimer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            remaining_secs: 0,
            frozen_remaining: Duration::ZERO,
            config: None,
            generation: Generation::default(),
            expected_expiry: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn config(&self) -> Option<&RestTypeConfig> {
        self.config.as_ref()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            config: self.config.clone(),
            generation: self.generation,
        }
    }

    /// Start counting down from `config.default_duration_secs`.
    ///
    /// Returns the new generation; ticks must be scheduled with it.
    pub fn start(&mut self, config: RestTypeConfig) -> Result<Generation, TimerError> {
        if self.state.is_live() {
            return Err(TimerError::TimerAlreadyActive);
        }
        if config.default_duration_secs == 0 {
            return Err(TimerError::InvalidArgument(format!(
                "rest type '{}' has a zero duration",
                config.name
            )));
        }

        let now = self.clock.now();
        let duration = Duration::seconds(i64::from(config.default_duration_secs));
        self.generation = self.generation.next();
        self.frozen_remaining = duration;
        self.remaining_secs = config.default_duration_secs;
        self.expected_expiry = Some(now.saturating_add(duration));
        self.state = TimerState::Running;

        tracing::debug!(
            rest_type = %config.name,
            generation = %self.generation,
            remaining = self.remaining_secs,
            "Rest timer started"
        );

        self.config = Some(config);
        Ok(self.generation)
    }

    /// Freeze the countdown.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        if self.state != TimerState::Running {
            return Err(TimerError::InvalidState {
                operation: "pause",
                state: self.state,
            });
        }

        self.freeze(self.clock.now());
        self.state = TimerState::Paused;
        tracing::debug!(remaining = self.remaining_secs, "Rest timer paused");
        Ok(())
    }

    /// Continue from the frozen remaining time.
    pub fn resume(&mut self) -> Result<(), TimerError> {
        if self.state != TimerState::Paused {
            return Err(TimerError::InvalidState {
                operation: "resume",
                state: self.state,
            });
        }

        let now = self.clock.now();
        self.expected_expiry = Some(now.saturating_add(self.frozen_remaining));
        self.state = TimerState::Running;
        tracing::debug!(remaining = self.remaining_secs, "Rest timer resumed");
        Ok(())
    }

    /// Add `seconds` to the remaining time without changing state.
    ///
    /// The total saturates at `u32::MAX` seconds.
    pub fn extend(&mut self, seconds: i64) -> Result<(), TimerError> {
        if !self.state.is_live() {
            return Err(TimerError::InvalidState {
                operation: "extend",
                state: self.state,
            });
        }
        if seconds <= 0 {
            return Err(TimerError::InvalidArgument(format!(
                "extension must be positive, got {}",
                seconds
            )));
        }

        let now = self.clock.now();
        let extended = self
            .left_at(now)
            .checked_add(Duration::seconds(seconds))
            .map_or(MAX_REMAINING, |left| left.min(MAX_REMAINING));

        match self.state {
            TimerState::Running => {
                self.expected_expiry = Some(now.saturating_add(extended));
            }
            _ => {
                self.frozen_remaining = extended;
            }
        }
        self.remaining_secs = whole_secs(extended);

        tracing::debug!(
            extra = seconds,
            remaining = self.remaining_secs,
            "Rest timer extended"
        );
        Ok(())
    }

    /// Stop the countdown and invalidate every tick scheduled so far.
    ///
    /// Harmless from `Idle`, `Expired` and `Cancelled`.
    pub fn cancel(&mut self) {
        if !self.state.is_live() {
            return;
        }

        self.freeze(self.clock.now());
        self.generation = self.generation.next();
        self.state = TimerState::Cancelled;

        tracing::debug!(
            generation = %self.generation,
            remaining = self.remaining_secs,
            "Rest timer cancelled"
        );
    }

    /// Deliver one scheduled tick.
    pub fn tick(&mut self, generation: Generation) -> TickOutcome {
        if generation != self.generation {
            tracing::trace!(
                stale = %generation,
                current = %self.generation,
                "Dropping stale rest tick"
            );
            return TickOutcome::Stale;
        }
        if self.state != TimerState::Running {
            return TickOutcome::Inactive(self.state);
        }

        let left = self.left_at(self.clock.now());
        self.remaining_secs = whole_secs(left);
        if left > Duration::ZERO {
            return TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            };
        }

        self.state = TimerState::Expired;
        self.frozen_remaining = Duration::ZERO;
        self.expected_expiry = None;

        match self.config.clone() {
            Some(config) => {
                tracing::debug!(rest_type = %config.name, "Rest timer expired");
                TickOutcome::Expired(config)
            }
            None => TickOutcome::Inactive(self.state),
        }
    }

    /// Exact time left at `now`, never negative.
    fn left_at(&self, now: OffsetDateTime) -> Duration {
        match self.expected_expiry {
            Some(expiry) => (expiry - now).max(Duration::ZERO),
            None => self.frozen_remaining,
        }
    }

    fn freeze(&mut self, now: OffsetDateTime) {
        self.frozen_remaining = self.left_at(now);
        self.remaining_secs = whole_secs(self.frozen_remaining);
        self.expected_expiry = None;
    }
}

fn whole_secs(left: Duration) -> u32 {
    let mut secs = left.whole_seconds();
    if left.subsec_nanoseconds() > 0 {
        secs += 1;
    }
    u32::try_from(secs.max(0)).unwrap_or(u32::MAX)
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RestCategory;
    use crate::domain::ports::outbound::ManualClock;

    fn rest(secs: u32) -> RestTypeConfig {
        RestTypeConfig::new("between-sets", secs, RestCategory::BetweenSets)
    }

    fn timer() -> (RestTimer, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_epoch());
        (RestTimer::new(clock.clone()), clock)
    }

    /// Advance one second and deliver a tick, the way the ticker does.
    fn tick_once(
        timer: &mut RestTimer,
        clock: &ManualClock,
        generation: Generation,
    ) -> TickOutcome {
        clock.advance_secs(1);
        timer.tick(generation)
    }

    #[test]
    fn runs_to_expiry_exactly_once() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(5)).unwrap();

        let mut expirations = 0;
        for _ in 0..5 {
            if let TickOutcome::Expired(config) = tick_once(&mut timer, &clock, generation) {
                assert_eq!(config, rest(5));
                expirations += 1;
            }
        }

        assert_eq!(expirations, 1);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining_secs(), 0);

        // Further ticks change nothing.
        assert_eq!(
            tick_once(&mut timer, &clock, generation),
            TickOutcome::Inactive(TimerState::Expired)
        );
    }

    #[test]
    fn ticks_count_down_by_one() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(3)).unwrap();

        assert_eq!(
            tick_once(&mut timer, &clock, generation),
            TickOutcome::Running { remaining_secs: 2 }
        );
        assert_eq!(
            tick_once(&mut timer, &clock, generation),
            TickOutcome::Running { remaining_secs: 1 }
        );
        assert!(matches!(
            tick_once(&mut timer, &clock, generation),
            TickOutcome::Expired(_)
        ));
    }

    #[test]
    fn late_tick_reconciles_from_expiry() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(90)).unwrap();

        // One tick arrives after a long suspension.
        clock.advance_secs(40);
        assert_eq!(
            timer.tick(generation),
            TickOutcome::Running { remaining_secs: 50 }
        );

        clock.advance_secs(120);
        assert!(matches!(timer.tick(generation), TickOutcome::Expired(_)));
    }

    #[test]
    fn fractional_remaining_rounds_up() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(10)).unwrap();

        clock.advance(Duration::milliseconds(2_500));
        assert_eq!(
            timer.tick(generation),
            TickOutcome::Running { remaining_secs: 8 }
        );
    }

    #[test]
    fn second_start_while_live_is_rejected() {
        let (mut timer, _) = timer();
        timer.start(rest(30)).unwrap();

        assert_eq!(timer.start(rest(60)).unwrap_err(), TimerError::TimerAlreadyActive);

        timer.pause().unwrap();
        assert_eq!(timer.start(rest(60)).unwrap_err(), TimerError::TimerAlreadyActive);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let (mut timer, _) = timer();

        assert!(matches!(
            timer.start(rest(0)).unwrap_err(),
            TimerError::InvalidArgument(_)
        ));
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn pause_then_resume_keeps_remaining() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(30)).unwrap();
        tick_once(&mut timer, &clock, generation);

        timer.pause().unwrap();
        let frozen = timer.remaining_secs();
        timer.resume().unwrap();

        assert_eq!(timer.remaining_secs(), frozen);
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn paused_timer_does_not_count_down() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(30)).unwrap();

        timer.pause().unwrap();
        clock.advance_secs(600);

        assert_eq!(
            timer.tick(generation),
            TickOutcome::Inactive(TimerState::Paused)
        );
        assert_eq!(timer.remaining_secs(), 30);
    }

    #[test]
    fn pause_and_resume_require_matching_state() {
        let (mut timer, _) = timer();

        assert_eq!(
            timer.pause().unwrap_err(),
            TimerError::InvalidState {
                operation: "pause",
                state: TimerState::Idle
            }
        );

        timer.start(rest(30)).unwrap();
        assert_eq!(
            timer.resume().unwrap_err(),
            TimerError::InvalidState {
                operation: "resume",
                state: TimerState::Running
            }
        );

        timer.pause().unwrap();
        assert!(timer.pause().is_err());
    }

    #[test]
    fn extend_while_paused_adds_exactly() {
        let (mut timer, _) = timer();
        timer.start(rest(30)).unwrap();
        timer.pause().unwrap();

        timer.extend(15).unwrap();

        assert_eq!(timer.remaining_secs(), 45);
        assert_eq!(timer.state(), TimerState::Paused);
    }

    #[test]
    fn extend_while_running_moves_expiry() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(10)).unwrap();
        clock.advance_secs(4);

        timer.extend(20).unwrap();
        assert_eq!(timer.remaining_secs(), 26);
        assert_eq!(timer.state(), TimerState::Running);

        clock.advance_secs(25);
        assert_eq!(
            timer.tick(generation),
            TickOutcome::Running { remaining_secs: 1 }
        );
        assert!(matches!(
            tick_once(&mut timer, &clock, generation),
            TickOutcome::Expired(_)
        ));
    }

    #[test]
    fn extend_rejects_non_positive_and_dead_timers() {
        let (mut timer, _) = timer();

        assert!(matches!(
            timer.extend(10).unwrap_err(),
            TimerError::InvalidState { .. }
        ));

        timer.start(rest(30)).unwrap();
        assert!(matches!(
            timer.extend(0).unwrap_err(),
            TimerError::InvalidArgument(_)
        ));
        assert!(matches!(
            timer.extend(-5).unwrap_err(),
            TimerError::InvalidArgument(_)
        ));
        assert_eq!(timer.remaining_secs(), 30);
    }

    #[test]
    fn frequent_pauses_keep_sub_second_progress() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(10)).unwrap();

        for _ in 0..11 {
            clock.advance(Duration::milliseconds(900));
            timer.pause().unwrap();
            timer.resume().unwrap();
        }
        assert_eq!(
            timer.tick(generation),
            TickOutcome::Running { remaining_secs: 1 }
        );

        clock.advance(Duration::milliseconds(100));
        assert!(matches!(timer.tick(generation), TickOutcome::Expired(_)));
    }

    #[test]
    fn paused_remainder_is_not_rounded_away() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(5)).unwrap();

        clock.advance(Duration::milliseconds(2_300));
        timer.pause().unwrap();
        assert_eq!(timer.remaining_secs(), 3);

        clock.advance_secs(60);
        timer.resume().unwrap();
        clock.advance(Duration::milliseconds(2_700));
        assert!(matches!(timer.tick(generation), TickOutcome::Expired(_)));
    }

    #[test]
    fn repeated_extend_saturates() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(10)).unwrap();

        for _ in 0..100 {
            timer.extend(i64::from(u32::MAX)).unwrap();
        }
        timer.extend(i64::MAX).unwrap();

        assert_eq!(timer.remaining_secs(), u32::MAX);
        assert_eq!(timer.state(), TimerState::Running);
        clock.advance_secs(60);
        assert_eq!(
            timer.tick(generation),
            TickOutcome::Running {
                remaining_secs: u32::MAX - 60
            }
        );

        timer.pause().unwrap();
        timer.extend(i64::MAX).unwrap();
        assert_eq!(timer.remaining_secs(), u32::MAX);
        assert_eq!(timer.state(), TimerState::Paused);
    }

    #[test]
    fn late_tick_after_cancel_is_ignored() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(30)).unwrap();
        tick_once(&mut timer, &clock, generation);

        timer.cancel();
        let remaining = timer.remaining_secs();

        assert_eq!(tick_once(&mut timer, &clock, generation), TickOutcome::Stale);
        assert_eq!(timer.state(), TimerState::Cancelled);
        assert_eq!(timer.remaining_secs(), remaining);
    }

    #[test]
    fn restart_ignores_previous_generation() {
        let (mut timer, clock) = timer();
        let first = timer.start(rest(2)).unwrap();
        timer.cancel();
        let second = timer.start(rest(60)).unwrap();
        assert!(second > first);

        clock.advance_secs(5);
        assert_eq!(timer.tick(first), TickOutcome::Stale);
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(
            timer.tick(second),
            TickOutcome::Running { remaining_secs: 55 }
        );
    }

    #[test]
    fn cancel_is_a_no_op_outside_live_states() {
        let (mut timer, clock) = timer();

        timer.cancel();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.generation(), Generation::default());

        let generation = timer.start(rest(1)).unwrap();
        tick_once(&mut timer, &clock, generation);
        assert_eq!(timer.state(), TimerState::Expired);

        timer.cancel();
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.generation(), generation);
    }

    #[test]
    fn pause_excluded_from_countdown() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(90)).unwrap();

        for _ in 0..30 {
            tick_once(&mut timer, &clock, generation);
        }
        assert_eq!(timer.remaining_secs(), 60);

        timer.pause().unwrap();
        clock.advance_secs(300);
        timer.resume().unwrap();

        let mut ticks = 0;
        let mut expirations = 0;
        while timer.state() == TimerState::Running {
            ticks += 1;
            if let TickOutcome::Expired(_) = tick_once(&mut timer, &clock, generation) {
                expirations += 1;
            }
        }

        assert_eq!(ticks, 60);
        assert_eq!(expirations, 1);
    }

    #[test]
    fn restart_after_expiry_is_allowed() {
        let (mut timer, clock) = timer();
        let generation = timer.start(rest(1)).unwrap();
        tick_once(&mut timer, &clock, generation);

        let next = timer.start(rest(45)).unwrap();
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_secs(), 45);
        assert_ne!(next, generation);
    }
}
