//! Statistics collection for searches
//!
//! Both searchers reset a [`SearchStatistics`] at the start of every `find`
//! and fill it in as they go.

use std::time::Duration;

/// Statistics collected during one search
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of minimax nodes entered
    pub nodes_visited: usize,

    /// Number of static evaluations at minimax leaves
    pub leaf_evaluations: usize,

    /// Number of alpha-beta cutoffs
    pub cutoffs: usize,

    /// Deepest ply reached below the root
    pub max_depth_reached: usize,

    /// Number of moves sampled by simulated annealing
    pub trials: usize,

    /// Number of sampled moves simulated annealing accepted
    pub accepted: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Whether the deadline cut the search short
    pub stopped_early: bool,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            nodes_visited: 0,
            leaf_evaluations: 0,
            cutoffs: 0,
            max_depth_reached: 0,
            trials: 0,
            accepted: 0,
            total_time: Duration::from_secs(0),
            stopped_early: false,
        }
    }

    /// Returns the number of nodes plus trials per second
    pub fn work_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        (self.nodes_visited + self.trials) as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "Search Statistics:\n\
             - Nodes visited: {}\n\
             - Leaf evaluations: {}\n\
             - Cutoffs: {}\n\
             - Max depth: {}\n\
             - Trials: {} ({} accepted)\n\
             - Total time: {:.3} seconds\n\
             - Work per second: {:.1}\n\
             - Stopped early: {}",
            self.nodes_visited,
            self.leaf_evaluations,
            self.cutoffs,
            self.max_depth_reached,
            self.trials,
            self.accepted,
            self.total_time.as_secs_f64(),
            self.work_per_second(),
            self.stopped_early
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
