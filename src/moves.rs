//! Legal move generation
//!
//! Moves are produced center column first, alternating outwards, because
//! center columns take part in more lines and alpha-beta cuts earlier when
//! strong moves come first.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game_state::{Shape, State};

/// A drop of `shape` into `column`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub column: usize,
    pub shape: Shape,
}

impl Move {
    /// Creates a new move
    pub fn new(column: usize, shape: Shape) -> Self {
        Move { column, shape }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.column, self.shape)
    }
}

/// Column visiting order for a board of `width`: mid, mid+1, mid-1, mid+2, ...
pub fn center_out_columns(width: usize) -> Vec<usize> {
    let mid = width / 2;
    let mut order = Vec::with_capacity(width);
    if width == 0 {
        return order;
    }
    order.push(mid);
    for offset in 1..=mid.max(width - mid) {
        if mid + offset < width {
            order.push(mid + offset);
        }
        if offset <= mid {
            order.push(mid - offset);
        }
    }
    order
}

/// Shapes `player` tries, its home shape first
pub fn shape_preference(state: &State, player: usize) -> [Shape; 2] {
    let home = state.players[player].shape;
    [home, home.other()]
}

/// All legal moves for `player`, in search order
///
/// Only shapes with quota left and columns with an empty top cell are
/// included. An unknown player index yields no moves.
pub fn generate_moves(state: &State, player: usize) -> Vec<Move> {
    let Some(quota) = state.players.get(player).map(|owner| owner.quota) else {
        return Vec::new();
    };
    let shapes = shape_preference(state, player);

    center_out_columns(state.board.cols())
        .into_iter()
        .filter(|&column| state.board.get(0, column).is_none())
        .flat_map(move |column| {
            shapes
                .into_iter()
                .filter(move |&shape| quota.get(shape) > 0)
                .map(move |shape| Move::new(column, shape))
        })
        .collect()
}

/// A uniformly random legal move, or `None` if `player` has none
pub fn random_move<R: Rng + ?Sized>(state: &State, player: usize, rng: &mut R) -> Option<Move> {
    generate_moves(state, player).choose(rng).copied()
}
