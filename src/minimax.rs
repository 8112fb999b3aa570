//! Depth- and time-bounded minimax search with alpha-beta pruning
//!
//! Player 0 maximizes the evaluator's score and player 1 minimizes it. The
//! search clones the caller's state once and explores every branch on that
//! copy with [`State::apply`] and [`State::undo`], so the caller's state is
//! never touched.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use simplexity_search::{GameConfig, Minimax, State};
//!
//! let state = State::new(&GameConfig::default());
//! let mut minimax = Minimax::new(2).with_seed(7);
//!
//! let mv = minimax.find(&state, 0, Duration::from_secs(5)).unwrap();
//! assert_eq!(mv.column, 3);
//! ```

use std::time::Duration;

use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    evaluator::{Evaluator, HeuristicEvaluator},
    game_state::State,
    moves::{generate_moves, random_move, Move},
    rules,
    stats::SearchStatistics,
    utils::Deadline,
    Result, SearchError,
};

/// Minimax searcher with alpha-beta pruning
///
/// Ties between moves keep the first move in generation order; a later move
/// replaces the best one only on strict improvement.
#[derive(Debug, Clone)]
pub struct Minimax<E: Evaluator = HeuristicEvaluator> {
    max_depth: usize,
    evaluator: E,
    rng: StdRng,
    statistics: SearchStatistics,
    used_time: Duration,
}

impl Minimax {
    /// Creates a searcher looking `max_depth` plies ahead (at least one)
    pub fn new(max_depth: usize) -> Self {
        Minimax {
            max_depth: max_depth.max(1),
            evaluator: HeuristicEvaluator::default(),
            rng: StdRng::from_entropy(),
            statistics: SearchStatistics::new(),
            used_time: Duration::ZERO,
        }
    }
}

impl<E: Evaluator> Minimax<E> {
    /// Replaces the evaluator
    pub fn with_evaluator<F: Evaluator>(self, evaluator: F) -> Minimax<F> {
        Minimax {
            max_depth: self.max_depth,
            evaluator,
            rng: self.rng,
            statistics: self.statistics,
            used_time: self.used_time,
        }
    }

    /// Seeds the random source used for deadline fallbacks
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Search depth in plies
    pub fn max_depth(&self) -> usize {
        self.max_depth
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

    /// Finds a move for `player` within `thinking_time`
    pub fn find(&mut self, state: &State, player: usize, thinking_time: Duration) -> Result<Move> {
        self.search(state, player, thinking_time).map(|(mv, _)| mv)
    }

    /// Finds a move for `player` and returns it with its backed-up score
    ///
    /// Fails with [`SearchError::GameOver`] on a finished game and with
    /// [`SearchError::NoLegalMoves`] when `player` cannot place anything.
    /// If the deadline passes before any move was scored, a random legal
    /// move is returned instead.
    pub fn search(
        &mut self,
        state: &State,
        player: usize,
        thinking_time: Duration,
    ) -> Result<(Move, f64)> {
        if player >= state.players.len() {
            return Err(SearchError::InvalidPlayer(player));
        }
        if state.is_over() {
            return Err(SearchError::GameOver);
        }

        self.statistics = SearchStatistics::new();
        let deadline = Deadline::after(thinking_time);
        let mut scratch = state.clone();

        let result = self.alpha_beta(
            &mut scratch,
            self.max_depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            player,
            &deadline,
            0,
        );

        self.statistics.total_time = deadline.elapsed();
        self.used_time += self.statistics.total_time;

        let (score, best) = result?;
        let mv = best.ok_or(SearchError::NoLegalMoves)?;
        debug!("minimax chose {} with score {:.3}", mv, score);
        debug!("{}", self.statistics.summary());
        Ok((mv, score))
    }

    /// Static evaluation through the configured evaluator
    pub fn evaluate(&self, state: &State) -> f64 {
        self.evaluator.evaluate(state)
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        state: &mut State,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        to_move: usize,
        deadline: &Deadline,
        ply: usize,
    ) -> Result<(f64, Option<Move>)> {
        self.statistics.nodes_visited += 1;
        self.statistics.max_depth_reached = self.statistics.max_depth_reached.max(ply);

        // the root always expands so that a move comes back
        let out_of_time = ply > 0 && deadline.expired();
        if depth == 0 || out_of_time || state.winner().is_some() || rules::is_full(&state.board) {
            self.statistics.stopped_early |= out_of_time;
            return Ok((self.leaf(state), None));
        }

        let moves = generate_moves(state, to_move);
        if moves.is_empty() {
            return Ok((self.leaf(state), None));
        }

        let maximizing = to_move == 0;
        let mut best_value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for mv in moves {
            if deadline.expired() {
                self.statistics.stopped_early = true;
                if best_move.is_none() {
                    return self.random_fallback(state, to_move);
                }
                break;
            }

            let placement = state.apply(to_move, mv)?;
            let result =
                self.alpha_beta(state, depth - 1, alpha, beta, 1 - to_move, deadline, ply + 1);
            state.undo(placement);
            let (value, _) = result?;

            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                alpha = alpha.max(value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                beta = beta.min(value);
            }

            if beta <= alpha {
                self.statistics.cutoffs += 1;
                break;
            }
        }

        Ok((best_value, best_move))
    }

    fn leaf(&mut self, state: &State) -> f64 {
        self.statistics.leaf_evaluations += 1;
        self.evaluator.evaluate(state)
    }

    /// Plays a random legal move and scores the resulting position once
    fn random_fallback(
        &mut self,
        state: &mut State,
        to_move: usize,
    ) -> Result<(f64, Option<Move>)> {
        let mv = random_move(state, to_move, &mut self.rng).ok_or(SearchError::NoLegalMoves)?;
        trace!("deadline passed before any move was scored, falling back to {}", mv);
        let placement = state.apply(to_move, mv)?;
        let value = self.leaf(state);
        state.undo(placement);
        Ok((value, Some(mv)))
    }
}
