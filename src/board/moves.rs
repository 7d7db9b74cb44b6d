//! Moves and their execution
//!
//! Each variant knows how to derive the successor [`Position`]. Nothing is
//! ever edited in place: the mover's and the opponent's pieces are copied into
//! a fresh [`Builder`] with the moved piece relocated.

use super::piece::{Alliance, Piece, PieceKind};
use super::position::{Builder, Position};
use crate::error::{BoardError, BoardResult};
use crate::utils::square_name;
use std::fmt;

/// Destination reported by the null move, deliberately off the board
pub const NULL_MOVE_DESTINATION: usize = 65;

/// Castling details shared by both castle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleMove {
    pub king: Piece,
    pub destination: usize,
    pub rook: Piece,
    pub rook_start: usize,
    pub rook_destination: usize,
}

/// One ply. Equality is structural over variant, moved piece, destination and
/// (for captures) the captured piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// Quiet move of a non-pawn piece
    Major { piece: Piece, destination: usize },
    /// King capture
    Attack {
        piece: Piece,
        destination: usize,
        attacked: Piece,
    },
    /// Knight or slider capture
    MajorAttack {
        piece: Piece,
        destination: usize,
        attacked: Piece,
    },
    /// Single pawn push
    Pawn { piece: Piece, destination: usize },
    PawnAttack {
        piece: Piece,
        destination: usize,
        attacked: Piece,
    },
    /// Capture of the pawn beside, landing behind it
    PawnEnPassantAttack {
        piece: Piece,
        destination: usize,
        attacked: Piece,
    },
    /// Push or capture onto the last rank; the pawn becomes a queen
    PawnPromotion(Box<Move>),
    /// Double pawn push from the starting rank
    PawnJump { piece: Piece, destination: usize },
    KingSideCastle(CastleMove),
    QueenSideCastle(CastleMove),
    /// "No move found" sentinel; never legal, never executable
    Null,
}

impl Move {
    pub fn moved_piece(&self) -> Option<&Piece> {
        match self {
            Move::Major { piece, .. }
            | Move::Attack { piece, .. }
            | Move::MajorAttack { piece, .. }
            | Move::Pawn { piece, .. }
            | Move::PawnAttack { piece, .. }
            | Move::PawnEnPassantAttack { piece, .. }
            | Move::PawnJump { piece, .. } => Some(piece),
            Move::PawnPromotion(inner) => inner.moved_piece(),
            Move::KingSideCastle(castle) | Move::QueenSideCastle(castle) => Some(&castle.king),
            Move::Null => None,
        }
    }

    /// Square the moved piece starts from; `None` for the null move
    pub fn current_square(&self) -> Option<usize> {
        self.moved_piece().map(Piece::square)
    }

    pub fn destination(&self) -> usize {
        match self {
            Move::Major { destination, .. }
            | Move::Attack { destination, .. }
            | Move::MajorAttack { destination, .. }
            | Move::Pawn { destination, .. }
            | Move::PawnAttack { destination, .. }
            | Move::PawnEnPassantAttack { destination, .. }
            | Move::PawnJump { destination, .. } => *destination,
            Move::PawnPromotion(inner) => inner.destination(),
            Move::KingSideCastle(castle) | Move::QueenSideCastle(castle) => castle.destination,
            Move::Null => NULL_MOVE_DESTINATION,
        }
    }

    pub fn attacked_piece(&self) -> Option<&Piece> {
        match self {
            Move::Attack { attacked, .. }
            | Move::MajorAttack { attacked, .. }
            | Move::PawnAttack { attacked, .. }
            | Move::PawnEnPassantAttack { attacked, .. } => Some(attacked),
            Move::PawnPromotion(inner) => inner.attacked_piece(),
            _ => None,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.attacked_piece().is_some()
    }

    pub fn is_castling_move(&self) -> bool {
        matches!(self, Move::KingSideCastle(_) | Move::QueenSideCastle(_))
    }

    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::PawnPromotion(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Move::Null)
    }

    /// Derive the position reached by playing this move on `position`.
    ///
    /// Fails for the null move, and when the successor would lack a king
    /// (which only happens if `position` let a king be captured).
    pub fn execute(&self, position: &Position) -> BoardResult<Position> {
        match self {
            Move::Null => Err(BoardError::NullMoveExecution),
            Move::PawnPromotion(inner) => execute_promotion(inner, position),
            Move::KingSideCastle(castle) | Move::QueenSideCastle(castle) => {
                let mut builder = carry_over(position, &castle.king, None, Some(&castle.rook));
                builder
                    .set_piece(castle.king.move_piece(self))
                    .set_piece(Piece::with_first_move(
                        PieceKind::Rook,
                        castle.rook.alliance(),
                        castle.rook_destination,
                        false,
                    ))
                    .set_move_maker(castle.king.alliance().opponent());
                builder.build()
            }
            Move::PawnJump { piece, .. } => {
                let mut builder = carry_over(position, piece, None, None);
                let moved_pawn = piece.move_piece(self);
                builder
                    .set_piece(moved_pawn)
                    .set_en_passant_pawn(moved_pawn)
                    .set_move_maker(piece.alliance().opponent());
                builder.build()
            }
            Move::Major { piece, .. }
            | Move::Pawn { piece, .. }
            | Move::Attack { piece, .. }
            | Move::MajorAttack { piece, .. }
            | Move::PawnAttack { piece, .. }
            | Move::PawnEnPassantAttack { piece, .. } => {
                let mut builder = carry_over(position, piece, self.attacked_piece(), None);
                builder
                    .set_piece(piece.move_piece(self))
                    .set_move_maker(piece.alliance().opponent());
                builder.build()
            }
        }
    }
}

// Builder holding every piece of both sides except the moved piece, the
// captured piece and (for castles) the castling rook.
fn carry_over(
    position: &Position,
    moved: &Piece,
    captured: Option<&Piece>,
    rook: Option<&Piece>,
) -> Builder {
    let mover = moved.alliance();
    let mut builder = Builder::new();
    for piece in position.pieces(mover) {
        if piece != moved && Some(piece) != rook {
            builder.set_piece(*piece);
        }
    }
    for piece in position.pieces(mover.opponent()) {
        if Some(piece) != captured {
            builder.set_piece(*piece);
        }
    }
    builder
}

// Play the wrapped push/capture, then swap the landed pawn for a queen.
fn execute_promotion(inner: &Move, position: &Position) -> BoardResult<Position> {
    let pawn_moved = inner.execute(position)?;
    let destination = inner.destination();
    let pawn = match inner.moved_piece() {
        Some(pawn) => pawn.move_piece(inner),
        None => return Err(BoardError::NullMoveExecution),
    };

    let mut builder = Builder::new();
    for alliance in [Alliance::White, Alliance::Black] {
        for piece in pawn_moved.pieces(alliance) {
            if piece.square() != destination {
                builder.set_piece(*piece);
            }
        }
    }
    builder
        .set_piece(pawn.promotion_piece())
        .set_move_maker(pawn_moved.move_maker());
    builder.build()
}

/// The unique legal move of the side to move going from `current` to
/// `destination`, or [`Move::Null`] when there is none
pub fn create_move(position: &Position, current: usize, destination: usize) -> Move {
    position
        .current_player()
        .legal_moves()
        .iter()
        .find(|mv| mv.current_square() == Some(current) && mv.destination() == destination)
        .cloned()
        .unwrap_or(Move::Null)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Major { piece, destination }
            | Move::Attack {
                piece, destination, ..
            }
            | Move::MajorAttack {
                piece, destination, ..
            } => write!(f, "{}{}", piece.kind(), square_name(*destination)),
            Move::Pawn { destination, .. } | Move::PawnJump { destination, .. } => {
                write!(f, "{}", square_name(*destination))
            }
            Move::PawnAttack {
                piece, destination, ..
            }
            | Move::PawnEnPassantAttack {
                piece, destination, ..
            } => {
                let file = &square_name(piece.square())[..1];
                write!(f, "{}x{}", file, square_name(*destination))
            }
            Move::PawnPromotion(inner) => write!(f, "{}=Q", square_name(inner.destination())),
            Move::KingSideCastle(_) => write!(f, "O-O"),
            Move::QueenSideCastle(_) => write!(f, "O-O-O"),
            Move::Null => write!(f, "--"),
        }
    }
}
