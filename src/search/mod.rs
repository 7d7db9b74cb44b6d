//! Move selection for the side to move
//!
//!
//!

pub mod minimax;
pub mod params;
pub mod perft;
pub mod stats;

pub use self::minimax::{search, MiniMax, MoveStrategy};
pub use self::params::SearchParams;
pub use self::perft::{divide, perft};
pub use self::stats::SearchStats;
pub use crate::board::Move;
