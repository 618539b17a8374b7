//! Deadline-based timers polled by the front end's event loop
//!
//! Nothing here spawns threads; callers pass `Instant`s in, which keeps the
//! timers deterministic under test.

use std::time::{Duration, Instant};

/// Time allowed for the first guess (reading the question takes a moment)
pub const FIRST_GUESS_LIMIT: Duration = Duration::from_secs(20);
/// Time allowed for every later guess
pub const NEXT_GUESS_LIMIT: Duration = Duration::from_secs(10);

/// Countdown for the guess at `index` (0-based)
#[must_use]
pub const fn guess_time_limit(index: usize) -> Duration {
    if index == 0 {
        FIRST_GUESS_LIMIT
    } else {
        NEXT_GUESS_LIMIT
    }
}

/// One-shot delay before switching to the reveal screen
///
/// Fires at most once per [`schedule`](Self::schedule). A cancelled timer
/// never fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealTimer {
    deadline: Option<Instant>,
}

impl RevealTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer; re-arming replaces the previous deadline
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before firing, `None` when not armed
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns `true` exactly once when the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Per-guess countdown that also measures response time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessClock {
    started: Instant,
    limit: Duration,
}

impl GuessClock {
    /// Start the countdown for the guess at `index`
    #[must_use]
    pub const fn start(now: Instant, index: usize) -> Self {
        Self {
            started: now,
            limit: guess_time_limit(index),
        }
    }

    #[must_use]
    pub const fn limit(&self) -> Duration {
        self.limit
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.limit.saturating_sub(self.elapsed(now))
    }

    #[must_use]
    pub fn expired(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.limit
    }

    /// Elapsed time in whole milliseconds, as recorded on a guess
    #[must_use]
    pub fn response_time_ms(&self, now: Instant) -> u64 {
        u64::try_from(self.elapsed(now).as_millis()).unwrap_or(u64::MAX)
    }
}
