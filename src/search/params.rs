//! Search parameters and configuration
//!
//! The minimax has a single knob, its fixed depth. Everything else only
//! affects reporting.

/// Default fixed search depth in plies
pub const DEFAULT_DEPTH: u32 = 4;

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Search depth in plies
    pub depth: u32,

    /// Emit a trace line per root move with its minimax value
    pub log_moves: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            log_moves: false,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search depth in plies
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Enable or disable per-move logging
    pub fn log_moves(mut self, enable: bool) -> Self {
        self.log_moves = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        assert_eq!(SearchParams::new().depth, DEFAULT_DEPTH);
        let params = SearchParams::new().depth(2).log_moves(true);
        assert_eq!(params.depth, 2);
        assert!(params.log_moves);
    }
}
