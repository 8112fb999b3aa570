//! Static evaluation of positions
//!
//! Scores are absolute: positive values favor player 0 and negative values
//! favor player 1. Searchers negate the score when they reason from player
//! 1's side.
//!
//! The heuristic evaluator scans every occupied cell along the four axes and
//! classifies what it finds:
//!
//! - a three-piece streak, worth a fixed weight when one end can still be
//!   filled; when both ends can be filled it is a forced win, and the
//!   evaluator looks one placement ahead to score it (see
//!   [`HeuristicEvaluator::completion_threat`]);
//! - a split three (two pieces, a gap, one piece), worth the same fixed weight;
//! - a two-piece streak, weighted by how many free tiles surround it;
//! - an isolated piece, weighted by its column.

use std::ops::Range;

use crate::{
    config::HeuristicWeights,
    game_state::{Attribute, Board, Piece, State},
    moves::shape_preference,
    rules::{self, Streak, DIRECTIONS, WIN_PRIORITY},
};

/// Trait for static evaluation functions used by the searchers
pub trait Evaluator {
    /// Scores `state`; higher favors player 0, lower favors player 1
    fn evaluate(&self, state: &State) -> f64;
}

/// Sign of a contribution owned by `player`
fn side(player: usize) -> f64 {
    if player == 0 {
        1.0
    } else {
        -1.0
    }
}

/// A ray through the board starting at one cell
#[derive(Debug, Clone, Copy)]
struct Line {
    row: isize,
    col: isize,
    dr: isize,
    dc: isize,
}

impl Line {
    fn new(row: usize, col: usize, (dr, dc): (isize, isize)) -> Self {
        Line {
            row: row as isize,
            col: col as isize,
            dr,
            dc,
        }
    }

    fn cell(&self, offset: isize) -> (isize, isize) {
        (self.row + self.dr * offset, self.col + self.dc * offset)
    }

    fn matches_at(&self, board: &Board, piece: &Piece, attr: Attribute, offset: isize) -> bool {
        let (row, col) = self.cell(offset);
        board
            .piece_at(row, col)
            .is_some_and(|other| other.matches(piece, attr))
    }

    fn is_gap(&self, board: &Board, offset: isize) -> bool {
        let (row, col) = self.cell(offset);
        !rules::is_out_of_bounds(board, row, col) && board.piece_at(row, col).is_none()
    }

    fn is_placeable(&self, board: &Board, offset: isize) -> bool {
        let (row, col) = self.cell(offset);
        rules::is_placeable(board, row, col)
    }

    /// Matching pieces from `from`, stepping by `step`
    fn run_len(
        &self,
        board: &Board,
        piece: &Piece,
        attr: Attribute,
        from: isize,
        step: isize,
    ) -> usize {
        let mut len = 0;
        while self.matches_at(board, piece, attr, from + step * len as isize) {
            len += 1;
        }
        len
    }

    /// Free tiles beyond both ends of a run of `len` starting at offset 0
    fn free_tiles(&self, board: &Board, len: usize) -> usize {
        let mut free = 0;
        for (start, step) in [(len as isize, 1), (-1, -1)] {
            let mut offset = start;
            while self.is_gap(board, offset) {
                if self.is_placeable(board, offset) {
                    free += 1;
                }
                offset += step;
            }
        }
        free
    }

    fn mark(&self, in_feature: &mut [bool], cols: usize, offsets: Range<isize>) {
        for offset in offsets {
            let (row, col) = self.cell(offset);
            in_feature[row as usize * cols + col as usize] = true;
        }
    }
}

/// The default evaluator: terminal scoring plus the pattern scan
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    /// Creates an evaluator with the given weight tables
    pub fn new(weights: HeuristicWeights) -> Self {
        HeuristicEvaluator { weights }
    }

    /// The weight tables in use
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Score of a finished game, or `None` while the game is still running
    ///
    /// A win is worth `win_base` plus the winner's remaining quota, signed
    /// for the winner; a full board without a winner is worth 0.
    pub fn terminal_score(&self, state: &State) -> Option<f64> {
        if let Some(winner) = state.winner() {
            return Some(self.win_score(state, winner));
        }
        if rules::is_full(&state.board) {
            return Some(0.0);
        }
        None
    }

    /// Signed score of `winner` having won `state`
    pub fn win_score(&self, state: &State, winner: usize) -> f64 {
        let remaining = state.players[winner].quota.total();
        side(winner) * (self.weights.win_base + f64::from(remaining))
    }

    /// One-placement lookahead for a three that is open on both ends
    ///
    /// Tries to drop the streak owner's piece on each of the given end
    /// cells. If one of them completes a line, returns the won score of the
    /// resulting position scaled by `threat_scale`. Returns `None` when the
    /// owner cannot complete the line, e.g. because the needed shape has no
    /// quota left.
    ///
    /// The default `threat_scale` of 0.5 scales the won score down rather
    /// than up, so a threat always ranks below a position that is already won.
    pub fn completion_threat(
        &self,
        state: &State,
        streak: Streak,
        ends: &[(usize, usize)],
    ) -> Option<f64> {
        let owner = state.owner(streak)?;
        let quota = state.players[owner].quota;
        let shape = match streak {
            Streak::Shape(shape) => Some(shape).filter(|&shape| quota.get(shape) > 0),
            Streak::Color(_) => shape_preference(state, owner)
                .into_iter()
                .find(|&shape| quota.get(shape) > 0),
        }?;

        for &(row, col) in ends {
            if !rules::is_placeable(&state.board, row as isize, col as isize) {
                continue;
            }
            let mut hypothetical = state.clone();
            if rules::place(&mut hypothetical, owner, shape, col).is_err() {
                continue;
            }
            if let Some(winner) = hypothetical.winner() {
                return Some(self.win_score(&hypothetical, winner) * self.weights.threat_scale);
            }
        }
        None
    }

    /// Sum of pattern features over a running game
    fn feature_score(&self, state: &State) -> f64 {
        let board = &state.board;
        let cols = board.cols();
        let mut in_feature = vec![false; board.rows() * cols];
        let mut score = 0.0;

        for (row, col, piece) in board.occupied() {
            for &attribute in &WIN_PRIORITY {
                let streak = Streak::of(&piece, attribute);
                let Some(owner) = state.owner(streak) else {
                    continue;
                };
                let sign = side(owner);
                let shape_streak = attribute == Attribute::Shape;
                let streak3 = sign * self.weights.streak3_weight(shape_streak);

                for &direction in &DIRECTIONS {
                    let line = Line::new(row, col, direction);
                    // only score a run from its first cell
                    if line.matches_at(board, &piece, attribute, -1) {
                        continue;
                    }

                    let len = line.run_len(board, &piece, attribute, 0, 1);
                    match len {
                        3 => {
                            line.mark(&mut in_feature, cols, 0..3);
                            let ends: Vec<(usize, usize)> = [-1, 3]
                                .into_iter()
                                .filter(|&offset| line.is_placeable(board, offset))
                                .map(|offset| {
                                    let (r, c) = line.cell(offset);
                                    (r as usize, c as usize)
                                })
                                .collect();
                            match ends.len() {
                                2 => {
                                    let threat = self.completion_threat(state, streak, &ends);
                                    if let Some(threat) = threat {
                                        return threat;
                                    }
                                    score += streak3;
                                }
                                1 => score += streak3,
                                _ => {}
                            }
                        }
                        1 | 2 => {
                            let head = len as isize;
                            let tail = if line.is_gap(board, head) {
                                line.run_len(board, &piece, attribute, head + 1, 1)
                            } else {
                                0
                            };

                            if tail > 0 && len + tail == 3 {
                                line.mark(&mut in_feature, cols, 0..head);
                                let tail_end = head + 1 + tail as isize;
                                line.mark(&mut in_feature, cols, head + 1..tail_end);
                                score += streak3;
                            } else if len == 2 {
                                line.mark(&mut in_feature, cols, 0..2);
                                let split_tail = line.is_gap(board, -1)
                                    && line.run_len(board, &piece, attribute, -2, -1) == 1;
                                if !split_tail {
                                    let free = line.free_tiles(board, 2);
                                    if free >= 2 {
                                        score +=
                                            sign * self.weights.streak2_weight(shape_streak, free);
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        for (row, col, piece) in board.occupied() {
            if in_feature[row * cols + col] {
                continue;
            }
            if let Some(owner) = state.owner(Streak::Color(piece.color)) {
                score += side(owner) * self.weights.column_weight(col);
            }
        }

        score
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, state: &State) -> f64 {
        match self.terminal_score(state) {
            Some(score) => score,
            None => self.feature_score(state),
        }
    }
}
