//! The common interface of the searchers
//!
//! [`Strategy`] is implemented by [`Minimax`] and [`SimulatedAnnealing`];
//! [`Bot`] is the closed set of both, for callers that pick a searcher at
//! runtime.

use std::time::Duration;

use crate::{
    annealing::SimulatedAnnealing,
    evaluator::Evaluator,
    game_state::State,
    minimax::Minimax,
    moves::Move,
    stats::SearchStatistics,
    Result,
};

/// A move-selection strategy
pub trait Strategy {
    /// Finds a move for `player` in `state` within `thinking_time`
    fn find(&mut self, state: &State, player: usize, thinking_time: Duration) -> Result<Move>;

    /// Scores `state`; higher favors player 0
    fn evaluate(&self, state: &State) -> f64;
}

impl<E: Evaluator> Strategy for Minimax<E> {
    fn find(&mut self, state: &State, player: usize, thinking_time: Duration) -> Result<Move> {
        Minimax::<E>::find(self, state, player, thinking_time)
    }

    fn evaluate(&self, state: &State) -> f64 {
        Minimax::<E>::evaluate(self, state)
    }
}

impl<E: Evaluator> Strategy for SimulatedAnnealing<E> {
    fn find(&mut self, state: &State, player: usize, thinking_time: Duration) -> Result<Move> {
        SimulatedAnnealing::<E>::find(self, state, player, thinking_time)
    }

    fn evaluate(&self, state: &State) -> f64 {
        SimulatedAnnealing::<E>::evaluate(self, state)
    }
}

/// One of the available searchers
#[derive(Debug, Clone)]
pub enum Bot {
    Minimax(Minimax),
    Annealing(SimulatedAnnealing),
}

impl Bot {
    /// A minimax bot searching `max_depth` plies
    pub fn minimax(max_depth: usize) -> Self {
        Bot::Minimax(Minimax::new(max_depth))
    }

    /// A simulated-annealing bot
    pub fn annealing() -> Self {
        Bot::Annealing(SimulatedAnnealing::new())
    }

    /// Seeds the bot's random source
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            Bot::Minimax(minimax) => Bot::Minimax(minimax.with_seed(seed)),
            Bot::Annealing(annealing) => Bot::Annealing(annealing.with_seed(seed)),
        }
    }

    /// Short name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Bot::Minimax(_) => "minimax",
            Bot::Annealing(_) => "simulated-annealing",
        }
    }

    /// Statistics of the last search
    pub fn get_statistics(&self) -> &SearchStatistics {
        match self {
            Bot::Minimax(minimax) => minimax.get_statistics(),
            Bot::Annealing(annealing) => annealing.get_statistics(),
        }
    }

    /// Thinking time spent over all searches so far
    pub fn used_time(&self) -> Duration {
        match self {
            Bot::Minimax(minimax) => minimax.used_time(),
            Bot::Annealing(annealing) => annealing.used_time(),
        }
    }
}

impl Strategy for Bot {
    fn find(&mut self, state: &State, player: usize, thinking_time: Duration) -> Result<Move> {
        match self {
            Bot::Minimax(minimax) => minimax.find(state, player, thinking_time),
            Bot::Annealing(annealing) => annealing.find(state, player, thinking_time),
        }
    }

    fn evaluate(&self, state: &State) -> f64 {
        match self {
            Bot::Minimax(minimax) => minimax.evaluate(state),
            Bot::Annealing(annealing) => annealing.evaluate(state),
        }
    }
}
