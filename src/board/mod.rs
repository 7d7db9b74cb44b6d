//! Immutable chess positions and everything needed to derive them
//!
//! A [`Position`] is assembled once by a [`Builder`] and never changes
//! afterwards. Playing a [`Move`] produces a brand-new sibling position.

mod fen;
mod movegen;
mod moves;
mod piece;
mod position;
mod tile;

pub use self::fen::START_FEN;
pub use self::moves::{create_move, CastleMove, Move, NULL_MOVE_DESTINATION};
pub use self::piece::{Alliance, Piece, PieceKind};
pub use self::position::{Builder, Position};
pub use self::tile::Tile;

pub(crate) use self::movegen::BoardView;
