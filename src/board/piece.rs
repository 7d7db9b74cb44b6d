// Sides, piece kinds and the immutable piece value type

use super::movegen::{self, BoardView};
use super::moves::Move;
use crate::utils::{FIRST_RANK, EIGHTH_RANK};
use std::fmt;

/// The two sides of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alliance {
    #[default]
    White,
    Black,
}

impl Alliance {
    /// Row step of a pawn advance: White moves up the board (towards row 0)
    pub fn direction(self) -> i32 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    pub fn opposite_direction(self) -> i32 {
        -self.direction()
    }

    /// True when a pawn of this side reaching `square` must promote
    pub fn is_pawn_promotion_square(self, square: usize) -> bool {
        let rank = match self {
            Alliance::White => &EIGHTH_RANK,
            Alliance::Black => &FIRST_RANK,
        };
        rank.get(square).copied().unwrap_or(false)
    }

    pub fn is_white(self) -> bool {
        self == Alliance::White
    }

    pub fn is_black(self) -> bool {
        self == Alliance::Black
    }

    pub fn opponent(self) -> Alliance {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alliance::White => write!(f, "White"),
            Alliance::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Material value in centipawns
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 10000,
        }
    }

    /// Single-letter notation, always uppercase
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn is_king(self) -> bool {
        self == PieceKind::King
    }

    pub fn is_rook(self) -> bool {
        self == PieceKind::Rook
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A piece standing on a square. Equality and hashing cover all four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    square: usize,
    alliance: Alliance,
    first_move: bool,
}

impl Piece {
    /// A piece that has not moved yet
    pub fn new(kind: PieceKind, alliance: Alliance, square: usize) -> Self {
        Self::with_first_move(kind, alliance, square, true)
    }

    pub fn with_first_move(
        kind: PieceKind,
        alliance: Alliance,
        square: usize,
        first_move: bool,
    ) -> Self {
        Self {
            kind,
            square,
            alliance,
            first_move,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn square(&self) -> usize {
        self.square
    }

    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    /// True until the piece makes its first move
    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    /// The copy of this piece standing on the move's destination
    pub fn move_piece(&self, mv: &Move) -> Piece {
        Piece {
            square: mv.destination(),
            first_move: false,
            ..*self
        }
    }

    /// Pawns always promote to a queen on the square they stand on
    pub fn promotion_piece(&self) -> Piece {
        Piece::with_first_move(PieceKind::Queen, self.alliance, self.square, false)
    }

    /// Every move this piece can make on the given board, own-king safety aside
    pub(crate) fn calculate_legal_moves(&self, board: &BoardView<'_>) -> Vec<Move> {
        movegen::generator(self.kind)(self, board)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind.letter();
        match self.alliance {
            Alliance::White => write!(f, "{}", letter),
            Alliance::Black => write!(f, "{}", letter.to_ascii_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alliance_directions_are_fixed() {
        assert_eq!(Alliance::White.direction(), -1);
        assert_eq!(Alliance::Black.direction(), 1);
        assert_eq!(Alliance::White.opposite_direction(), 1);
        assert_eq!(Alliance::Black.opponent(), Alliance::White);
    }

    #[test]
    fn promotion_ranks() {
        assert!(Alliance::White.is_pawn_promotion_square(4));
        assert!(!Alliance::White.is_pawn_promotion_square(60));
        assert!(Alliance::Black.is_pawn_promotion_square(60));
        assert!(!Alliance::Black.is_pawn_promotion_square(65));
    }

    #[test]
    fn moved_piece_loses_first_move() {
        let knight = Piece::new(PieceKind::Knight, Alliance::White, 62);
        let mv = Move::Major {
            piece: knight,
            destination: 45,
        };
        let moved = knight.move_piece(&mv);
        assert_eq!(moved.square(), 45);
        assert!(!moved.is_first_move());
        assert_eq!(moved.kind(), PieceKind::Knight);
        assert_ne!(moved, knight);
    }

    #[test]
    fn display_uses_case_for_side() {
        assert_eq!(Piece::new(PieceKind::Queen, Alliance::White, 59).to_string(), "Q");
        assert_eq!(Piece::new(PieceKind::Queen, Alliance::Black, 3).to_string(), "q");
        assert_eq!(PieceKind::from_letter('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_letter('x'), None);
    }
}
