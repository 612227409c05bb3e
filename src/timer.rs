//! Per-player chess clock for the timed variant
//!
//! Timestamps are `Duration` offsets from an injected [`crate::ports::Clock`]'s
//! arbitrary origin, so tests can drive the clock by hand. Remaining time is
//! monotonically non-increasing while the timer runs (saturating arithmetic);
//! a player with nothing left at decision time has lost on time, independent
//! of board state.

use std::time::Duration;

/// Remaining-time budget with an optional running-turn start instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTimer {
    remaining: Duration,
    started_at: Option<Duration>,
}

impl PlayerTimer {
    /// Create a stopped timer holding the full budget
    pub fn new(budget: Duration) -> Self {
        PlayerTimer {
            remaining: budget,
            started_at: None,
        }
    }

    /// Resume the clock at `now`. No-op while already running: the session
    /// starts a timer exactly once per turn, and an abandoned entry attempt
    /// must not restart it.
    pub fn start(&mut self, now: Duration) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Suspend the clock at `now`, banking the elapsed turn time
    pub fn stop(&mut self, now: Duration) {
        if let Some(started) = self.started_at.take() {
            self.remaining = self
                .remaining
                .saturating_sub(now.saturating_sub(started));
        }
    }

    /// Time left on the clock as of `now`
    pub fn remaining(&self, now: Duration) -> Duration {
        match self.started_at {
            Some(started) => self
                .remaining
                .saturating_sub(now.saturating_sub(started)),
            None => self.remaining,
        }
    }

    /// True while the budget has not run out
    pub fn has_time_left(&self, now: Duration) -> bool {
        !self.remaining(now).is_zero()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_expires_after_budget_elapses() {
        let mut timer = PlayerTimer::new(10 * SEC);
        timer.start(Duration::ZERO);
        assert!(timer.has_time_left(9 * SEC));
        assert!(!timer.has_time_left(11 * SEC));
        assert_eq!(timer.remaining(11 * SEC), Duration::ZERO);
    }

    #[test]
    fn test_stop_banks_elapsed_time_across_turns() {
        let mut timer = PlayerTimer::new(10 * SEC);
        timer.start(Duration::ZERO);
        timer.stop(3 * SEC);
        assert_eq!(timer.remaining(5 * SEC), 7 * SEC);

        timer.start(5 * SEC);
        timer.stop(9 * SEC);
        assert_eq!(timer.remaining(9 * SEC), 3 * SEC);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_stopped_timer_does_not_drain() {
        let timer = PlayerTimer::new(10 * SEC);
        assert_eq!(timer.remaining(1000 * SEC), 10 * SEC);
    }

    #[test]
    fn test_remaining_is_monotonic_while_running() {
        let mut timer = PlayerTimer::new(10 * SEC);
        timer.start(2 * SEC);
        let mut previous = timer.remaining(2 * SEC);
        for t in 3..15 {
            let current = timer.remaining(t * SEC);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_start_is_idempotent_within_a_turn() {
        let mut timer = PlayerTimer::new(10 * SEC);
        timer.start(Duration::ZERO);
        timer.start(4 * SEC);
        timer.stop(5 * SEC);
        // Elapsed counts from the first start, not the spurious restart
        assert_eq!(timer.remaining(5 * SEC), 5 * SEC);
    }
}
