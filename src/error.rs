//! Error types for position construction and move execution
//!
//! Only programmer/caller errors end up here. An illegal move attempted by a
//! player is not an error: it comes back as a tagged `MoveTransition`.

use crate::board::Alliance;
use thiserror::Error;

/// Errors raised while building or transforming a position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A side has no king among its active pieces
    #[error("not a valid board: {0} has no king")]
    MissingKing(Alliance),

    /// A side has more than one king among its active pieces
    #[error("not a valid board: {alliance} has {count} kings")]
    MultipleKings { alliance: Alliance, count: usize },

    /// The null move sentinel reached the execution path
    #[error("cannot execute the null move")]
    NullMoveExecution,

    /// Square notation or index outside a1..h8
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Malformed FEN record
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// Result alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;
