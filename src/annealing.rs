//! Time-bounded simulated-annealing move selection
//!
//! This is a single-level sampler, not a tree search: it keeps drawing
//! random legal moves for the player, compares the position after each one
//! against the current position, and remembers the last move it accepted.
//! The temperature cools linearly from 100 to 0 over the thinking time.
//!
//! Non-improving moves are accepted when `exp(ΔE / T)` exceeds a fixed
//! threshold of 0.5 rather than a fresh uniform draw, so acceptance is a
//! deterministic function of the score change and the temperature.

use std::time::Duration;

use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    evaluator::{Evaluator, HeuristicEvaluator},
    game_state::State,
    moves::{random_move, Move},
    stats::SearchStatistics,
    utils::Deadline,
    Result, SearchError,
};

/// Temperature at the start of the budget
pub const INITIAL_TEMPERATURE: f64 = 100.0;

/// Non-improving moves pass when `exp(ΔE / T)` is above this value
pub const ACCEPTANCE_THRESHOLD: f64 = 0.5;

/// Current temperature: the share of the budget left, times 100
pub fn temperature(deadline: &Deadline) -> f64 {
    deadline.remaining_fraction() * INITIAL_TEMPERATURE
}

/// Threshold acceptance rule for a non-improving `delta` at `temperature`
pub fn accepts(delta: f64, temperature: f64) -> bool {
    temperature > 0.0 && (delta / temperature).exp() > ACCEPTANCE_THRESHOLD
}

/// Score from `player`'s side
fn perspective(score: f64, player: usize) -> f64 {
    if player == 1 {
        -score
    } else {
        score
    }
}

/// Simulated-annealing searcher
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing<E: Evaluator = HeuristicEvaluator> {
    evaluator: E,
    rng: StdRng,
    statistics: SearchStatistics,
    used_time: Duration,
}

impl SimulatedAnnealing {
    /// Creates a searcher with the default evaluator
    pub fn new() -> Self {
        SimulatedAnnealing {
            evaluator: HeuristicEvaluator::default(),
            rng: StdRng::from_entropy(),
            statistics: SearchStatistics::new(),
            used_time: Duration::ZERO,
        }
    }
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator> SimulatedAnnealing<E> {
    /// Replaces the evaluator
    pub fn with_evaluator<F: Evaluator>(self, evaluator: F) -> SimulatedAnnealing<F> {
        SimulatedAnnealing {
            evaluator,
            rng: self.rng,
            statistics: self.statistics,
            used_time: self.used_time,
        }
    }

    /// Seeds the move sampler
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The evaluator in use
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Statistics of the last search
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Thinking time spent over all searches so far
    pub fn used_time(&self) -> Duration {
        self.used_time
    }

    /// Static evaluation through the configured evaluator
    pub fn evaluate(&self, state: &State) -> f64 {
        self.evaluator.evaluate(state)
    }

    /// Picks a move for `player` within `thinking_time`
    ///
    /// Returns the last accepted move, or a random legal move if nothing
    /// was accepted before the temperature reached zero.
    pub fn find(&mut self, state: &State, player: usize, thinking_time: Duration) -> Result<Move> {
        if player >= state.players.len() {
            return Err(SearchError::InvalidPlayer(player));
        }
        if state.is_over() {
            return Err(SearchError::GameOver);
        }

        self.statistics = SearchStatistics::new();
        let deadline = Deadline::after(thinking_time);
        let mut scratch = state.clone();
        let current = perspective(self.evaluator.evaluate(state), player);
        let mut chosen = None;

        while temperature(&deadline) > 0.0 {
            let Some(mv) = random_move(&scratch, player, &mut self.rng) else {
                break;
            };
            self.statistics.trials += 1;

            let placement = scratch.apply(player, mv)?;
            let next = perspective(self.evaluator.evaluate(&scratch), player);
            scratch.undo(placement);
            let delta = next - current;

            if delta > 0.0 {
                chosen = Some((mv, next));
                self.statistics.accepted += 1;
                continue;
            }

            let t = temperature(&deadline);
            if t <= 0.0 {
                break;
            }
            if accepts(delta, t) {
                chosen = Some((mv, next));
                self.statistics.accepted += 1;
            }
        }

        let (mv, score) = match chosen {
            Some(choice) => choice,
            None => {
                let mv = random_move(state, player, &mut self.rng)
                    .ok_or(SearchError::NoLegalMoves)?;
                trace!("no move accepted, falling back to {}", mv);
                let placement = scratch.apply(player, mv)?;
                let score = perspective(self.evaluator.evaluate(&scratch), player);
                scratch.undo(placement);
                (mv, score)
            }
        };

        self.statistics.total_time = deadline.elapsed();
        self.used_time += self.statistics.total_time;
        debug!(
            "simulated annealing chose {} with score {:.3} after {} trials",
            mv, score, self.statistics.trials
        );
        debug!("{}", self.statistics.summary());
        Ok(mv)
    }
}
