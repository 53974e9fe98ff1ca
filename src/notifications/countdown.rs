// SPDX-License-Identifier: MPL-2.0
//! Per-notification countdown.
//!
//! A [`Countdown`] tracks the time a toast still has to live. Only running
//! time is subtracted, so a pause never eats into the remaining duration.
//! Time is always passed in, which keeps the state machine deterministic.

use std::time::{Duration, Instant};

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Paused,
    /// Remaining time reached zero; the owner must dismiss the toast.
    Expired,
    /// Cancelled before expiring.
    Dismissed,
}

/// Result of advancing a countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Still counting down; carries the new progress percentage.
    Running(f32),
    /// Paused, nothing changed.
    Frozen,
    /// Hit zero on this tick.
    Expired,
    /// Already expired or dismissed.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    /// Remaining time as of `resumed_at` (or frozen value while paused).
    remaining: Duration,
    /// Set while running.
    resumed_at: Option<Instant>,
    state: CountdownState,
}

impl Countdown {
    /// Starts a running countdown. A zero `duration` is expired immediately.
    #[must_use]
    pub fn start(duration: Duration, now: Instant) -> Self {
        let state = if duration.is_zero() {
            CountdownState::Expired
        } else {
            CountdownState::Running
        };
        Self {
            duration,
            remaining: duration,
            resumed_at: Some(now),
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left before expiry, as seen at `now`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match (self.state, self.resumed_at) {
            (CountdownState::Running, Some(since)) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(since)),
            (CountdownState::Expired, _) => Duration::ZERO,
            _ => self.remaining,
        }
    }

    /// Remaining share of the duration, 100.0 at start and 0.0 at expiry.
    #[must_use]
    pub fn progress_pct(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let ratio = self.remaining(now).as_secs_f64() / self.duration.as_secs_f64();
        #[allow(clippy::cast_possible_truncation)]
        let pct = (ratio * 100.0) as f32;
        pct.clamp(0.0, 100.0)
    }

    /// Freezes the countdown. Returns `false` if it was not running.
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.state != CountdownState::Running {
            return false;
        }
        self.remaining = self.remaining(now);
        self.resumed_at = None;
        self.state = CountdownState::Paused;
        true
    }

    /// Restarts a paused countdown. Returns `false` if it was not paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.state != CountdownState::Paused {
            return false;
        }
        self.resumed_at = Some(now);
        self.state = CountdownState::Running;
        true
    }

    /// Advances the countdown to `now`.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        match self.state {
            CountdownState::Paused => TickOutcome::Frozen,
            CountdownState::Expired | CountdownState::Dismissed => TickOutcome::Stopped,
            CountdownState::Running => {
                if self.remaining(now).is_zero() {
                    self.remaining = Duration::ZERO;
                    self.resumed_at = None;
                    self.state = CountdownState::Expired;
                    TickOutcome::Expired
                } else {
                    TickOutcome::Running(self.progress_pct(now))
                }
            }
        }
    }

    /// Stops the countdown for good, keeping the remaining time readable.
    pub fn cancel(&mut self, now: Instant) {
        if matches!(self.state, CountdownState::Running | CountdownState::Paused) {
            self.remaining = self.remaining(now);
            self.resumed_at = None;
            self.state = CountdownState::Dismissed;
        }
    }
}
