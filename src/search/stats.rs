//! Search statistics and performance metrics
//!
//! Tracks how many positions were evaluated, how many move attempts were
//! made and how long the search took.

use std::fmt;
use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Leaves handed to the evaluator
    pub evaluated: u64,

    /// Calls to `make_move`, whatever their outcome
    pub moves_attempted: u64,

    /// Attempts that were rejected as illegal or self-check
    pub moves_rejected: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Record elapsed time since `start_timing`
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
        }
    }

    pub fn inc_evaluated(&mut self) {
        self.evaluated += 1;
    }

    pub fn inc_attempt(&mut self, done: bool) {
        self.moves_attempted += 1;
        if !done {
            self.moves_rejected += 1;
        }
    }

    /// Evaluations per second, 0 before any time has elapsed
    pub fn nps(&self) -> u64 {
        let elapsed_ms = self.search_time.as_millis() as u64;
        if elapsed_ms > 0 {
            (self.evaluated * 1000) / elapsed_ms
        } else {
            0
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "evaluated {} positions, {} attempts ({} rejected) in {} ms ({} nps)",
            self.evaluated,
            self.moves_attempted,
            self.moves_rejected,
            self.search_time.as_millis(),
            self.nps()
        )
    }
}
