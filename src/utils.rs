//! Wall-clock budget helpers shared by the searchers

use std::time::{Duration, Instant};

/// A thinking-time budget measured from the moment it was created
///
/// Searches poll [`Deadline::expired`] between node expansions; there is no
/// other way to interrupt them.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts a budget of `budget` from now
    pub fn after(budget: Duration) -> Self {
        Deadline {
            start: Instant::now(),
            budget,
        }
    }

    /// The total budget
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time spent since the budget started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// True once the budget is used up
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    /// Time left, zero once expired
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }

    /// Share of the budget still left, in `[0, 1]`; a zero budget has none
    pub fn remaining_fraction(&self) -> f64 {
        if self.budget.is_zero() {
            return 0.0;
        }
        self.remaining().as_secs_f64() / self.budget.as_secs_f64()
    }
}
