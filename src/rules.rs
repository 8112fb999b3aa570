//! Placement and terminal rules
//!
//! These are the board primitives the searchers treat as black boxes:
//! dropping a piece under gravity and quota, detecting a completed streak,
//! and detecting a full board.

use crate::{
    game_state::{Attribute, Board, Color, Piece, Shape, State},
    Result, SearchError,
};

/// Length of a winning streak
pub const CONNECT: usize = 4;

/// Order in which attributes are checked; a shape streak outranks a color streak
pub const WIN_PRIORITY: [Attribute; 2] = [Attribute::Shape, Attribute::Color];

/// One direction per axis: horizontal, vertical (upwards), and the two diagonals
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (-1, 0), (-1, 1), (1, 1)];

/// A line of same-shape or same-color pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Streak {
    Shape(Shape),
    Color(Color),
}

impl Streak {
    /// The streak `piece` belongs to on `attribute`
    pub fn of(piece: &Piece, attribute: Attribute) -> Self {
        match attribute {
            Attribute::Shape => Streak::Shape(piece.shape),
            Attribute::Color => Streak::Color(piece.color),
        }
    }
}

/// Drops a `shape` piece in `player`'s color into `column`
///
/// Returns the row the piece settles into. On success the player's quota
/// for `shape` shrinks by one and the round advances; on failure the state
/// is left untouched.
pub fn place(state: &mut State, player: usize, shape: Shape, column: usize) -> Result<usize> {
    if player >= state.players.len() {
        return Err(SearchError::InvalidPlayer(player));
    }
    if column >= state.board.cols() {
        return Err(SearchError::ColumnOutOfBounds { column });
    }
    if state.players[player].quota.get(shape) == 0 {
        return Err(SearchError::QuotaExhausted { player, shape });
    }
    let row = state
        .board
        .landing_row(column)
        .ok_or(SearchError::ColumnFull { column })?;

    let color = state.players[player].color;
    state.board.set(row, column, Piece::new(shape, color));
    state.players[player].quota.take(shape);
    state.round += 1;
    Ok(row)
}

/// Returns the complete streak on the board, if any
///
/// A shape streak anywhere on the board wins over a color streak, so a
/// placement completing both lines at once counts for the shape's owner.
pub fn is_win(board: &Board) -> Option<Streak> {
    WIN_PRIORITY
        .iter()
        .find_map(|&attribute| find_streak(board, attribute))
}

/// First complete streak on `attribute` in row-major order
fn find_streak(board: &Board, attribute: Attribute) -> Option<Streak> {
    board.occupied().find_map(|(row, col, piece)| {
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| {
                (1..CONNECT as isize).all(|step| {
                    board
                        .piece_at(row as isize + dr * step, col as isize + dc * step)
                        .is_some_and(|next| next.matches(&piece, attribute))
                })
            })
            .then(|| Streak::of(&piece, attribute))
    })
}

/// True when no column has room left
pub fn is_full(board: &Board) -> bool {
    (0..board.cols()).all(|col| board.get(0, col).is_some())
}

/// True when `(row, col)` lies outside the board
pub fn is_out_of_bounds(board: &Board, row: isize, col: isize) -> bool {
    row < 0 || col < 0 || row as usize >= board.rows() || col as usize >= board.cols()
}

/// True for an empty cell a piece could land in right now
pub fn is_placeable(board: &Board, row: isize, col: isize) -> bool {
    if is_out_of_bounds(board, row, col) || board.piece_at(row, col).is_some() {
        return false;
    }
    row as usize + 1 == board.rows() || board.piece_at(row + 1, col).is_some()
}
