//! Configuration for games and evaluation
//!
//! This module defines the board and quota parameters of a game and the
//! weight tables that drive the heuristic evaluator. Both follow the same
//! builder style: start from `default()` and override what you need.

/// Board size and starting quotas
///
/// # Example
///
/// ```
/// use simplexity_search::GameConfig;
///
/// let config = GameConfig::default().with_rows(4).with_cols(4);
/// assert_eq!(config.quota_own + config.quota_other, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of rows
    pub rows: usize,

    /// Number of columns
    pub cols: usize,

    /// Starting quota of each player's home shape
    pub quota_own: u32,

    /// Starting quota of the opponent's shape
    pub quota_other: u32,
}

impl GameConfig {
    /// Creates a configuration for a `rows × cols` board
    ///
    /// Each player gets half the cells, the home shape taking the larger share.
    pub fn new(rows: usize, cols: usize) -> Self {
        let per_player = (rows * cols / 2) as u32;
        GameConfig {
            rows,
            cols,
            quota_own: per_player - per_player / 2,
            quota_other: per_player / 2,
        }
    }

    /// Sets the number of rows and recomputes the quotas
    pub fn with_rows(self, rows: usize) -> Self {
        GameConfig::new(rows, self.cols)
    }

    /// Sets the number of columns and recomputes the quotas
    pub fn with_cols(self, cols: usize) -> Self {
        GameConfig::new(self.rows, cols)
    }

    /// Overrides the starting quotas
    pub fn with_quota(mut self, own: u32, other: u32) -> Self {
        self.quota_own = own;
        self.quota_other = other;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::new(6, 7)
    }
}

/// Weight tables for the heuristic evaluator
///
/// Positive contributions favor player 0, negative ones player 1; the
/// tables hold magnitudes and the evaluator applies the sign.
///
/// # Example
///
/// ```
/// use simplexity_search::HeuristicWeights;
///
/// let weights = HeuristicWeights::default()
///     .with_streak3(12.0, 8.0)
///     .with_column_weights(vec![0.1, 0.3, 0.3, 0.1]);
/// assert_eq!(weights.column_weight(1), 0.3);
/// assert_eq!(weights.column_weight(9), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicWeights {
    /// Base magnitude of a won position, before the winner's remaining quota is added
    pub win_base: f64,

    /// Weight of a three-piece shape streak open on one end, and of a split shape three
    pub streak3_shape: f64,

    /// Weight of a three-piece color streak open on one end, and of a split color three
    pub streak3_color: f64,

    /// Two-piece shape streak weight, indexed by free tiles around it (0..=5)
    pub streak2_shape: [f64; 6],

    /// Two-piece color streak weight, indexed by free tiles around it (0..=5)
    pub streak2_color: [f64; 6],

    /// Isolated piece weight per column
    pub column_weights: Vec<f64>,

    /// Factor applied to the won score of a three that can be completed on either end
    pub threat_scale: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            win_base: 10_000.0,
            streak3_shape: 10.0,
            streak3_color: 9.0,
            streak2_shape: [0.0, 0.0, 1.5, 2.5, 3.5, 4.5],
            streak2_color: [0.0, 0.0, 1.0, 2.0, 3.0, 4.0],
            column_weights: vec![0.1, 0.2, 0.3, 0.4, 0.3, 0.2, 0.1],
            threat_scale: 0.5,
        }
    }
}

impl HeuristicWeights {
    /// Sets the base score of a won position
    pub fn with_win_base(mut self, base: f64) -> Self {
        self.win_base = base;
        self
    }

    /// Sets the three-piece streak weights
    pub fn with_streak3(mut self, shape: f64, color: f64) -> Self {
        self.streak3_shape = shape;
        self.streak3_color = color;
        self
    }

    /// Sets the two-piece streak tables
    pub fn with_streak2(mut self, shape: [f64; 6], color: [f64; 6]) -> Self {
        self.streak2_shape = shape;
        self.streak2_color = color;
        self
    }

    /// Sets the isolated piece weights per column
    pub fn with_column_weights(mut self, weights: Vec<f64>) -> Self {
        self.column_weights = weights;
        self
    }

    /// Sets the completion threat factor
    pub fn with_threat_scale(mut self, scale: f64) -> Self {
        self.threat_scale = scale;
        self
    }

    /// Isolated piece weight for `col`; columns past the table weigh nothing
    pub fn column_weight(&self, col: usize) -> f64 {
        self.column_weights.get(col).copied().unwrap_or(0.0)
    }

    /// Two-piece streak weight for `free` surrounding tiles, capped at the table end
    pub fn streak2_weight(&self, shape_streak: bool, free: usize) -> f64 {
        let table = if shape_streak {
            &self.streak2_shape
        } else {
            &self.streak2_color
        };
        table[free.min(table.len() - 1)]
    }

    /// Three-piece streak weight
    pub fn streak3_weight(&self, shape_streak: bool) -> f64 {
        if shape_streak {
            self.streak3_shape
        } else {
            self.streak3_color
        }
    }
}
