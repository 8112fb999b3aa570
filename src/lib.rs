//! # simplexity-search
//!
//! Move search for Simplexity, a two-player connection game played on a
//! gravity-stacked board. Every piece has a shape and a color; four in a row
//! of the same shape or the same color wins, and each player holds a limited
//! quota of each shape.
//!
//! ## Features
//!
//! - Board, player and state model with an explicit apply/undo pair
//! - Center-out legal move generation
//! - A pattern-based heuristic evaluator with configurable weight tables
//! - Depth- and time-bounded minimax with alpha-beta pruning
//! - Time-bounded simulated-annealing move selection
//! - Seedable randomness and per-search statistics
//!
//! ## Basic Usage
//!
//! ```
//! use std::time::Duration;
//! use simplexity_search::{Board, Bot, GameConfig, Move, Shape, State, Strategy};
//!
//! // Player 0 (red circles) has three in a row on the bottom and is to move
//! let config = GameConfig::default();
//! let board = Board::parse(&[
//!     ".......",
//!     ".......",
//!     ".......",
//!     ".......",
//!     "XX.....",
//!     "OOO.X..",
//! ])?;
//! let state = State::from_board(board, &config)?;
//!
//! let mut bot = Bot::minimax(2).with_seed(1);
//! let mv = bot.find(&state, state.current_player(), Duration::from_secs(5))?;
//! assert_eq!(mv, Move::new(3, Shape::Circle));
//! println!("{}", bot.get_statistics().summary());
//! # Ok::<(), simplexity_search::SearchError>(())
//! ```
//!
//! ## How It Works
//!
//! A caller hands a searcher a [`State`] and a thinking time. The searcher
//! repeatedly generates candidate moves, plays them on its own copy of the
//! state, and scores the results with an [`Evaluator`]:
//!
//! - [`Minimax`] recurses to a fixed depth, alternating the maximizing
//!   player 0 and the minimizing player 1, and prunes with alpha-beta.
//! - [`SimulatedAnnealing`] samples single moves at random and accepts them
//!   against a cooling temperature.
//!
//! Both stop when the thinking time is used up and still return a legal
//! move whenever one exists.

pub mod annealing;
pub mod config;
pub mod evaluator;
pub mod game_state;
pub mod minimax;
pub mod moves;
pub mod rules;
pub mod stats;
pub mod strategy;
pub mod utils;

pub use annealing::SimulatedAnnealing;
pub use config::{GameConfig, HeuristicWeights};
pub use evaluator::{Evaluator, HeuristicEvaluator};
pub use game_state::{Attribute, Board, Color, Piece, Placement, Player, Quota, Shape, State};
pub use minimax::Minimax;
pub use moves::{generate_moves, random_move, Move};
pub use rules::Streak;
pub use stats::SearchStatistics;
pub use strategy::{Bot, Strategy};

/// Error types for placement and search
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// The player to move has no legal move
    #[error("No legal moves available from current state")]
    NoLegalMoves,

    /// The game already has a winner or the board is full
    #[error("Game is already over")]
    GameOver,

    /// The column lies outside the board
    #[error("Column {column} is out of bounds")]
    ColumnOutOfBounds { column: usize },

    /// The column has no empty cell left
    #[error("Column {column} is full")]
    ColumnFull { column: usize },

    /// The player has no piece of this shape left
    #[error("Player {player} has no {shape:?} pieces left")]
    QuotaExhausted { player: usize, shape: Shape },

    /// The player index is not 0 or 1
    #[error("Invalid player index: {0}")]
    InvalidPlayer(usize),

    /// A board or state description is inconsistent
    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

/// Result type for placement and search operations
pub type Result<T> = std::result::Result<T, SearchError>;
