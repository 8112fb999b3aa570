//! Value types describing a Simplexity position
//!
//! A [`State`] owns a gravity-stacked [`Board`] of [`Piece`]s, the two
//! [`Player`]s with their remaining [`Quota`], and the round counter. Every
//! searcher explores positions on its own copy of a `State`, either by
//! cloning it or through the [`State::apply`] / [`State::undo`] pair.

use std::fmt;

use crate::{
    config::GameConfig,
    moves::Move,
    rules::{self, Streak},
    Result, SearchError,
};

/// The shape of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Circle,
    Cross,
}

impl Shape {
    /// Both shapes, in index order
    pub const ALL: [Shape; 2] = [Shape::Circle, Shape::Cross];

    /// Returns the other shape
    pub fn other(self) -> Shape {
        match self {
            Shape::Circle => Shape::Cross,
            Shape::Cross => Shape::Circle,
        }
    }

    fn index(self) -> usize {
        match self {
            Shape::Circle => 0,
            Shape::Cross => 1,
        }
    }
}

/// The color of a piece; a piece always carries the color of the player who placed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
}

/// The attribute a streak is formed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Shape,
    Color,
}

/// A placed piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    /// Creates a new piece
    pub fn new(shape: Shape, color: Color) -> Self {
        Piece { shape, color }
    }

    /// Returns true if `other` shares this piece's value for `attribute`
    pub fn matches(&self, other: &Piece, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Shape => self.shape == other.shape,
            Attribute::Color => self.color == other.color,
        }
    }

    /// Text symbol: upper case for the color's home shape, lower case otherwise
    fn symbol(&self) -> char {
        match (self.shape, self.color) {
            (Shape::Circle, Color::Red) => 'O',
            (Shape::Cross, Color::Blue) => 'X',
            (Shape::Circle, Color::Blue) => 'o',
            (Shape::Cross, Color::Red) => 'x',
        }
    }

    fn from_symbol(symbol: char) -> Option<Option<Piece>> {
        let piece = match symbol {
            '.' => return Some(None),
            'O' => Piece::new(Shape::Circle, Color::Red),
            'X' => Piece::new(Shape::Cross, Color::Blue),
            'o' => Piece::new(Shape::Circle, Color::Blue),
            'x' => Piece::new(Shape::Cross, Color::Red),
            _ => return None,
        };
        Some(Some(piece))
    }
}

/// A fixed `rows × cols` grid of cells, row 0 at the top
///
/// Pieces obey gravity: a cell is occupied only if every cell below it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Creates an empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Parses a board from text rows, top row first
    ///
    /// `.` is an empty cell, `O` a red circle, `X` a blue cross, `o` a blue
    /// circle and `x` a red cross. Rows must have equal length and the
    /// pieces must rest on the bottom row or on other pieces.
    ///
    /// ```
    /// use simplexity_search::Board;
    ///
    /// let board = Board::parse(&[
    ///     "....",
    ///     "..X.",
    ///     "OOxo",
    /// ]).unwrap();
    /// assert_eq!(board.rows(), 3);
    /// assert!(board.get(0, 0).is_none());
    /// ```
    pub fn parse(lines: &[&str]) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if rows == 0 || cols == 0 {
            return Err(SearchError::InvalidBoard("board has no cells".into()));
        }

        let mut board = Board::new(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(SearchError::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    cols
                )));
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = Piece::from_symbol(symbol).ok_or_else(|| {
                    SearchError::InvalidBoard(format!("unknown symbol '{}'", symbol))
                })?;
                board.cells[row * cols + col] = cell;
            }
        }

        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols {
                if board.get(row, col).is_some() && board.get(row + 1, col).is_none() {
                    return Err(SearchError::InvalidBoard(format!(
                        "piece at ({}, {}) is floating",
                        row, col
                    )));
                }
            }
        }

        Ok(board)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the piece at `(row, col)`, or `None` for an empty or out-of-range cell
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    /// Signed lookup used by the pattern scans; out-of-bounds reads as empty
    pub fn piece_at(&self, row: isize, col: isize) -> Option<Piece> {
        if rules::is_out_of_bounds(self, row, col) {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// Row a piece dropped into `col` would settle into, if the column has room
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.get(row, col).is_none())
    }

    /// Iterates over occupied cells as `(row, col, piece)`
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|piece| (i / self.cols, i % self.cols, piece)))
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, piece: Piece) {
        self.cells[row * self.cols + col] = Some(piece);
    }

    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = None;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = self.get(row, col).map_or('.', |piece| piece.symbol());
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Remaining placeable pieces per shape for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quota {
    remaining: [u32; 2],
}

impl Quota {
    /// Creates a quota with `own` pieces of `home` shape and `other` of the other shape
    pub fn new(home: Shape, own: u32, other: u32) -> Self {
        let mut remaining = [0; 2];
        remaining[home.index()] = own;
        remaining[home.other().index()] = other;
        Quota { remaining }
    }

    /// Remaining count for `shape`
    pub fn get(&self, shape: Shape) -> u32 {
        self.remaining[shape.index()]
    }

    /// Sets the remaining count for `shape`
    pub fn set(&mut self, shape: Shape, count: u32) {
        self.remaining[shape.index()] = count;
    }

    /// Sum over both shapes
    pub fn total(&self) -> u32 {
        self.remaining.iter().sum()
    }

    /// Consumes one piece of `shape`; returns false if none is left
    pub(crate) fn take(&mut self, shape: Shape) -> bool {
        let slot = &mut self.remaining[shape.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub(crate) fn restore(&mut self, shape: Shape) {
        self.remaining[shape.index()] += 1;
    }
}

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    pub shape: Shape,
    pub color: Color,
    pub quota: Quota,
}

/// Undo record for a successful [`State::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub player: usize,
    pub row: usize,
    pub column: usize,
    pub shape: Shape,
}

/// A complete game position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub board: Board,
    pub players: [Player; 2],
    /// Starts at 1 and grows by one per placement
    pub round: u32,
}

impl State {
    /// Creates the initial position for `config`
    ///
    /// Player 0 plays red circles and player 1 blue crosses.
    pub fn new(config: &GameConfig) -> Self {
        State {
            board: Board::new(config.rows, config.cols),
            players: [
                Player {
                    shape: Shape::Circle,
                    color: Color::Red,
                    quota: Quota::new(Shape::Circle, config.quota_own, config.quota_other),
                },
                Player {
                    shape: Shape::Cross,
                    color: Color::Blue,
                    quota: Quota::new(Shape::Cross, config.quota_own, config.quota_other),
                },
            ],
            round: 1,
        }
    }

    /// Builds the position reached by placing the pieces already on `board`
    ///
    /// Each piece is charged to the player of its color; the round counter
    /// follows from the piece count.
    pub fn from_board(board: Board, config: &GameConfig) -> Result<Self> {
        let mut state = State::new(config);
        if board.rows() != config.rows || board.cols() != config.cols {
            return Err(SearchError::InvalidBoard(format!(
                "board is {}x{}, config expects {}x{}",
                board.rows(),
                board.cols(),
                config.rows,
                config.cols
            )));
        }

        let mut placed = [0usize; 2];
        for (_, _, piece) in board.occupied() {
            let owner = state
                .players
                .iter()
                .position(|player| player.color == piece.color)
                .ok_or_else(|| SearchError::InvalidBoard("piece without owner".into()))?;
            if !state.players[owner].quota.take(piece.shape) {
                return Err(SearchError::InvalidBoard(format!(
                    "player {} exceeds the {:?} quota",
                    owner, piece.shape
                )));
            }
            placed[owner] += 1;
        }
        if placed[0] != placed[1] && placed[0] != placed[1] + 1 {
            return Err(SearchError::InvalidBoard(format!(
                "piece counts {} and {} cannot arise from alternating turns",
                placed[0], placed[1]
            )));
        }

        state.round = (placed[0] + placed[1]) as u32 + 1;
        state.board = board;
        Ok(state)
    }

    /// Index of the player to move
    pub fn current_player(&self) -> usize {
        (self.round.saturating_sub(1) % 2) as usize
    }

    /// Player owning a streak's shape or color
    pub fn owner(&self, streak: Streak) -> Option<usize> {
        self.players.iter().position(|player| match streak {
            Streak::Shape(shape) => player.shape == shape,
            Streak::Color(color) => player.color == color,
        })
    }

    /// The winning player, if the board holds a complete streak
    pub fn winner(&self) -> Option<usize> {
        rules::is_win(&self.board).and_then(|streak| self.owner(streak))
    }

    /// True once the game has a winner or no cell is left
    pub fn is_over(&self) -> bool {
        self.winner().is_some() || rules::is_full(&self.board)
    }

    /// Plays `mv` for `player`, returning the record needed to undo it
    pub fn apply(&mut self, player: usize, mv: Move) -> Result<Placement> {
        let row = rules::place(self, player, mv.shape, mv.column)?;
        Ok(Placement {
            player,
            row,
            column: mv.column,
            shape: mv.shape,
        })
    }

    /// Reverts a placement produced by [`State::apply`] on this state
    pub fn undo(&mut self, placement: Placement) {
        self.board.clear(placement.row, placement.column);
        self.players[placement.player].quota.restore(placement.shape);
        self.round -= 1;
    }
}
