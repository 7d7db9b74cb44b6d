//! Per-side legality: castling, check detection and move attempts
//!
//! A [`Player`] is a borrowed view of one side of a [`Position`]. Its legal
//! moves are the raw piece moves plus any castles, and a move is only
//! actually playable when [`Player::make_move`] tags it `Done`.

use crate::board::{Alliance, BoardView, CastleMove, Move, Piece, Position};
use crate::error::{BoardError, BoardResult};
use std::borrow::Cow;
use std::fmt;

/// Outcome tag of an attempted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    Done,
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    pub fn is_done(self) -> bool {
        self == MoveStatus::Done
    }
}

/// Result of [`Player::make_move`]. Unless the status is `Done`, the
/// position is the untouched original.
#[derive(Debug, Clone)]
pub struct MoveTransition<'a> {
    position: Cow<'a, Position>,
    attempted: Move,
    status: MoveStatus,
}

impl<'a> MoveTransition<'a> {
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn into_position(self) -> Position {
        self.position.into_owned()
    }

    pub fn attempted_move(&self) -> &Move {
        &self.attempted
    }

    pub fn status(&self) -> MoveStatus {
        self.status
    }
}

/// Per-side data computed once when a position is built
#[derive(Debug, Clone)]
pub(crate) struct PlayerState {
    alliance: Alliance,
    king: Piece,
    legal_moves: Vec<Move>,
    in_check: bool,
}

impl PlayerState {
    pub(crate) fn new(
        alliance: Alliance,
        board: &BoardView<'_>,
        active_pieces: &[Piece],
        mut standard_moves: Vec<Move>,
        opponent_moves: &[Move],
    ) -> BoardResult<Self> {
        let king = establish_king(alliance, active_pieces)?;
        let in_check = is_square_attacked(king.square(), opponent_moves);
        if !in_check {
            standard_moves.extend(calculate_king_castles(&king, board, opponent_moves));
        }
        Ok(Self {
            alliance,
            king,
            legal_moves: standard_moves,
            in_check,
        })
    }
}

fn establish_king(alliance: Alliance, active_pieces: &[Piece]) -> BoardResult<Piece> {
    let mut kings = active_pieces.iter().filter(|p| p.kind().is_king());
    match (kings.next(), kings.count()) {
        (Some(king), 0) => Ok(*king),
        (None, _) => Err(BoardError::MissingKing(alliance)),
        (Some(_), extra) => Err(BoardError::MultipleKings {
            alliance,
            count: extra + 1,
        }),
    }
}

/// Every move in `moves` that lands on `square`
pub fn calculate_attacks_on_tile(square: usize, moves: &[Move]) -> Vec<&Move> {
    moves
        .iter()
        .filter(|mv| mv.destination() == square)
        .collect()
}

/// True when any move in `moves` lands on `square`
pub fn is_square_attacked(square: usize, moves: &[Move]) -> bool {
    moves.iter().any(|mv| mv.destination() == square)
}

// Castling ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastleSide {
    King,
    Queen,
}

struct CastleSquares {
    side: CastleSide,
    king_start: usize,
    king_destination: usize,
    rook_start: usize,
    rook_destination: usize,
    must_be_empty: &'static [usize],
    must_be_safe: &'static [usize],
}

const WHITE_CASTLES: [CastleSquares; 2] = [
    CastleSquares {
        side: CastleSide::King,
        king_start: 60,
        king_destination: 62,
        rook_start: 63,
        rook_destination: 61,
        must_be_empty: &[61, 62],
        must_be_safe: &[61, 62],
    },
    CastleSquares {
        side: CastleSide::Queen,
        king_start: 60,
        king_destination: 58,
        rook_start: 56,
        rook_destination: 59,
        must_be_empty: &[57, 58, 59],
        must_be_safe: &[58, 59],
    },
];

const BLACK_CASTLES: [CastleSquares; 2] = [
    CastleSquares {
        side: CastleSide::King,
        king_start: 4,
        king_destination: 6,
        rook_start: 7,
        rook_destination: 5,
        must_be_empty: &[5, 6],
        must_be_safe: &[5, 6],
    },
    CastleSquares {
        side: CastleSide::Queen,
        king_start: 4,
        king_destination: 2,
        rook_start: 0,
        rook_destination: 3,
        must_be_empty: &[1, 2, 3],
        must_be_safe: &[2, 3],
    },
];

// Caller has already checked the king is not in check.
fn calculate_king_castles(king: &Piece, board: &BoardView<'_>, opponent_moves: &[Move]) -> Vec<Move> {
    let mut king_castles = Vec::new();
    if !king.is_first_move() {
        return king_castles;
    }

    let castles = match king.alliance() {
        Alliance::White => &WHITE_CASTLES,
        Alliance::Black => &BLACK_CASTLES,
    };
    for castle in castles {
        if king.square() != castle.king_start {
            continue;
        }
        if castle
            .must_be_empty
            .iter()
            .any(|&sq| board.tile(sq).is_occupied())
        {
            continue;
        }
        let rook = match board.tile(castle.rook_start).piece() {
            Some(rook)
                if rook.kind().is_rook()
                    && rook.alliance() == king.alliance()
                    && rook.is_first_move() =>
            {
                *rook
            }
            _ => continue,
        };
        if castle
            .must_be_safe
            .iter()
            .any(|&sq| is_square_attacked(sq, opponent_moves))
        {
            continue;
        }

        let details = CastleMove {
            king: *king,
            destination: castle.king_destination,
            rook,
            rook_start: castle.rook_start,
            rook_destination: castle.rook_destination,
        };
        king_castles.push(match castle.side {
            CastleSide::King => Move::KingSideCastle(details),
            CastleSide::Queen => Move::QueenSideCastle(details),
        });
    }
    king_castles
}

// Player view ---------------------------------------------------------------

/// One side of a position
#[derive(Clone, Copy)]
pub struct Player<'a> {
    position: &'a Position,
    state: &'a PlayerState,
}

impl<'a> Player<'a> {
    pub(crate) fn new(position: &'a Position, state: &'a PlayerState) -> Self {
        Self { position, state }
    }

    pub fn alliance(&self) -> Alliance {
        self.state.alliance
    }

    pub fn king(&self) -> &'a Piece {
        &self.state.king
    }

    /// Raw piece moves followed by castles, in generation order
    pub fn legal_moves(&self) -> &'a [Move] {
        &self.state.legal_moves
    }

    pub fn active_pieces(&self) -> &'a [Piece] {
        self.position.pieces(self.state.alliance)
    }

    pub fn opponent(&self) -> Player<'a> {
        self.position.player(self.state.alliance.opponent())
    }

    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.state.legal_moves.contains(mv)
    }

    pub fn is_in_check(&self) -> bool {
        self.state.in_check
    }

    /// In check with no move that completes
    pub fn is_in_checkmate(&self) -> BoardResult<bool> {
        Ok(self.state.in_check && !self.has_escape_moves()?)
    }

    /// Not in check, yet no move completes
    pub fn is_in_stalemate(&self) -> BoardResult<bool> {
        Ok(!self.state.in_check && !self.has_escape_moves()?)
    }

    /// Castling history is not tracked, so this never reports true
    pub fn is_castled(&self) -> bool {
        false
    }

    // Brute force: try every legal move until one completes.
    fn has_escape_moves(&self) -> BoardResult<bool> {
        for mv in self.legal_moves() {
            if self.make_move(mv)?.status().is_done() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Attempt `mv`. Illegal and self-check moves leave the original
    /// position in the transition; errors only surface for malformed boards.
    pub fn make_move(&self, mv: &Move) -> BoardResult<MoveTransition<'a>> {
        if !self.is_move_legal(mv) {
            return Ok(self.rejected(mv, MoveStatus::IllegalMove));
        }

        let transition_position = mv.execute(self.position)?;
        let current = transition_position.current_player();
        let own_king = current.opponent().king().square();
        if is_square_attacked(own_king, current.legal_moves()) {
            return Ok(self.rejected(mv, MoveStatus::LeavesPlayerInCheck));
        }

        Ok(MoveTransition {
            position: Cow::Owned(transition_position),
            attempted: mv.clone(),
            status: MoveStatus::Done,
        })
    }

    fn rejected(&self, mv: &Move, status: MoveStatus) -> MoveTransition<'a> {
        MoveTransition {
            position: Cow::Borrowed(self.position),
            attempted: mv.clone(),
            status,
        }
    }
}

impl fmt::Debug for Player<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("alliance", &self.state.alliance)
            .field("king", &self.state.king)
            .field("legal_moves", &self.state.legal_moves.len())
            .field("in_check", &self.state.in_check)
            .finish()
    }
}

impl fmt::Display for Player<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state.alliance)
    }
}
