pub mod board;
pub mod error;
pub mod eval;
pub mod player;
pub mod search;
pub mod utils;

pub use crate::board::{create_move, Move, Position};
pub use crate::error::{BoardError, BoardResult};
pub use crate::search::search;

pub fn init() {
    utils::init_tables();
}
