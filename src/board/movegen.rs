// Per-piece move generation on the 0..64 tile layout.
//
// Offsets are flat index deltas, so every generator needs an edge table: a
// delta of -7 is "one row up, one file right" everywhere except on the h-file,
// where it would wrap around to the a-file of the same row.

use super::moves::Move;
use super::piece::{Alliance, Piece, PieceKind};
use super::tile::Tile;
use crate::utils::{
    is_valid_square, EIGHTH_COLUMN, FIRST_COLUMN, NUM_TILES, SECOND_COLUMN, SECOND_RANK,
    SEVENTH_COLUMN, SEVENTH_RANK,
};

const KNIGHT_OFFSETS: [i32; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_OFFSETS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const BISHOP_DIRECTIONS: [i32; 4] = [-9, -7, 7, 9];
const ROOK_DIRECTIONS: [i32; 4] = [-8, -1, 1, 8];
const QUEEN_DIRECTIONS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
// Single push, double push, and the two diagonals, scaled by the side's direction
const PAWN_OFFSETS: [i32; 4] = [8, 16, 7, 9];

/// Read-only view of a board under construction: its tiles plus the pawn
/// that may be captured en passant on this ply.
#[derive(Clone, Copy)]
pub(crate) struct BoardView<'a> {
    tiles: &'a [Tile; NUM_TILES],
    en_passant_pawn: Option<&'a Piece>,
}

impl<'a> BoardView<'a> {
    pub(crate) fn new(tiles: &'a [Tile; NUM_TILES], en_passant_pawn: Option<&'a Piece>) -> Self {
        Self {
            tiles,
            en_passant_pawn,
        }
    }

    pub(crate) fn tile(&self, square: usize) -> &'a Tile {
        &self.tiles[square]
    }

    pub(crate) fn en_passant_pawn(&self) -> Option<&'a Piece> {
        self.en_passant_pawn
    }
}

pub(crate) type Generator = fn(&Piece, &BoardView<'_>) -> Vec<Move>;

/// Dispatch table from piece kind to its generator
pub(crate) fn generator(kind: PieceKind) -> Generator {
    match kind {
        PieceKind::Pawn => pawn_moves,
        PieceKind::Knight => knight_moves,
        PieceKind::Bishop => bishop_moves,
        PieceKind::Rook => rook_moves,
        PieceKind::Queen => queen_moves,
        PieceKind::King => king_moves,
    }
}

/// Raw moves of every piece in `pieces`, in piece order
pub(crate) fn calculate_legal_moves(pieces: &[Piece], board: &BoardView<'_>) -> Vec<Move> {
    pieces
        .iter()
        .flat_map(|piece| piece.calculate_legal_moves(board))
        .collect()
}

// Knight --------------------------------------------------------------------

fn knight_moves(piece: &Piece, board: &BoardView<'_>) -> Vec<Move> {
    let mut legal_moves = Vec::with_capacity(8);
    let from = piece.square();
    for &offset in &KNIGHT_OFFSETS {
        let candidate = from as i32 + offset;
        if !is_valid_square(candidate) || knight_column_exclusion(from, offset) {
            continue;
        }
        let destination = candidate as usize;
        match board.tile(destination).piece() {
            None => legal_moves.push(Move::Major {
                piece: *piece,
                destination,
            }),
            Some(occupant) if occupant.alliance() != piece.alliance() => {
                legal_moves.push(Move::MajorAttack {
                    piece: *piece,
                    destination,
                    attacked: *occupant,
                })
            }
            Some(_) => {}
        }
    }
    legal_moves
}

fn knight_column_exclusion(square: usize, offset: i32) -> bool {
    (FIRST_COLUMN[square] && matches!(offset, -17 | -10 | 6 | 15))
        || (SECOND_COLUMN[square] && matches!(offset, -10 | 6))
        || (SEVENTH_COLUMN[square] && matches!(offset, -6 | 10))
        || (EIGHTH_COLUMN[square] && matches!(offset, -15 | -6 | 10 | 17))
}

// King ----------------------------------------------------------------------

fn king_moves(piece: &Piece, board: &BoardView<'_>) -> Vec<Move> {
    let mut legal_moves = Vec::with_capacity(8);
    let from = piece.square();
    for &offset in &KING_OFFSETS {
        if king_column_exclusion(from, offset) {
            continue;
        }
        let candidate = from as i32 + offset;
        if !is_valid_square(candidate) {
            continue;
        }
        let destination = candidate as usize;
        match board.tile(destination).piece() {
            None => legal_moves.push(Move::Major {
                piece: *piece,
                destination,
            }),
            Some(occupant) if occupant.alliance() != piece.alliance() => {
                legal_moves.push(Move::Attack {
                    piece: *piece,
                    destination,
                    attacked: *occupant,
                })
            }
            Some(_) => {}
        }
    }
    legal_moves
}

fn king_column_exclusion(square: usize, offset: i32) -> bool {
    (FIRST_COLUMN[square] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[square] && matches!(offset, -7 | 1 | 9))
}

// Sliders -------------------------------------------------------------------

fn bishop_moves(piece: &Piece, board: &BoardView<'_>) -> Vec<Move> {
    sliding_moves(piece, board, &BISHOP_DIRECTIONS)
}

fn rook_moves(piece: &Piece, board: &BoardView<'_>) -> Vec<Move> {
    sliding_moves(piece, board, &ROOK_DIRECTIONS)
}

fn queen_moves(piece: &Piece, board: &BoardView<'_>) -> Vec<Move> {
    sliding_moves(piece, board, &QUEEN_DIRECTIONS)
}

// Stepping off the a-file westwards or off the h-file eastwards wraps rows.
fn sliding_column_exclusion(square: usize, offset: i32) -> bool {
    (FIRST_COLUMN[square] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[square] && matches!(offset, -7 | 1 | 9))
}

fn sliding_moves(piece: &Piece, board: &BoardView<'_>, directions: &[i32]) -> Vec<Move> {
    let mut legal_moves = Vec::with_capacity(14);
    for &offset in directions {
        let mut current = piece.square();
        loop {
            if sliding_column_exclusion(current, offset) {
                break;
            }
            let candidate = current as i32 + offset;
            if !is_valid_square(candidate) {
                break;
            }
            current = candidate as usize;
            match board.tile(current).piece() {
                None => legal_moves.push(Move::Major {
                    piece: *piece,
                    destination: current,
                }),
                Some(occupant) => {
                    if occupant.alliance() != piece.alliance() {
                        legal_moves.push(Move::MajorAttack {
                            piece: *piece,
                            destination: current,
                            attacked: *occupant,
                        });
                    }
                    break; // pieces do not jump
                }
            }
        }
    }
    legal_moves
}

// Pawn ----------------------------------------------------------------------

fn pawn_moves(piece: &Piece, board: &BoardView<'_>) -> Vec<Move> {
    let mut legal_moves = Vec::with_capacity(4);
    let from = piece.square();
    let alliance = piece.alliance();

    for &offset in &PAWN_OFFSETS {
        let candidate = from as i32 + offset * alliance.direction();
        if !is_valid_square(candidate) {
            continue;
        }
        let destination = candidate as usize;

        match offset {
            8 => {
                if !board.tile(destination).is_occupied() {
                    legal_moves.push(promote_if_needed(
                        alliance,
                        Move::Pawn {
                            piece: *piece,
                            destination,
                        },
                    ));
                }
            }
            16 => {
                if piece.is_first_move() && on_starting_rank(alliance, from) {
                    let skipped = (from as i32 + alliance.direction() * 8) as usize;
                    if !board.tile(skipped).is_occupied() && !board.tile(destination).is_occupied()
                    {
                        legal_moves.push(Move::PawnJump {
                            piece: *piece,
                            destination,
                        });
                    }
                }
            }
            7 => {
                let wraps = (EIGHTH_COLUMN[from] && alliance.is_white())
                    || (FIRST_COLUMN[from] && alliance.is_black());
                if !wraps {
                    let beside = from as i32 + alliance.opposite_direction();
                    legal_moves.extend(pawn_capture(piece, board, destination, beside));
                }
            }
            9 => {
                let wraps = (FIRST_COLUMN[from] && alliance.is_white())
                    || (EIGHTH_COLUMN[from] && alliance.is_black());
                if !wraps {
                    let beside = from as i32 - alliance.opposite_direction();
                    legal_moves.extend(pawn_capture(piece, board, destination, beside));
                }
            }
            _ => unreachable!("pawn offsets are fixed"),
        }
    }
    legal_moves
}

fn on_starting_rank(alliance: Alliance, square: usize) -> bool {
    match alliance {
        Alliance::White => SECOND_RANK[square],
        Alliance::Black => SEVENTH_RANK[square],
    }
}

fn promote_if_needed(alliance: Alliance, mv: Move) -> Move {
    if alliance.is_pawn_promotion_square(mv.destination()) {
        Move::PawnPromotion(Box::new(mv))
    } else {
        mv
    }
}

// Diagonal capture onto `destination`, or en passant when the diagonal is
// empty and the pawn that just jumped stands on `beside`.
fn pawn_capture(
    piece: &Piece,
    board: &BoardView<'_>,
    destination: usize,
    beside: i32,
) -> Option<Move> {
    match board.tile(destination).piece() {
        Some(occupant) if occupant.alliance() != piece.alliance() => Some(promote_if_needed(
            piece.alliance(),
            Move::PawnAttack {
                piece: *piece,
                destination,
                attacked: *occupant,
            },
        )),
        Some(_) => None,
        None => {
            let pawn = board.en_passant_pawn()?;
            if pawn.square() as i32 == beside && pawn.alliance() != piece.alliance() {
                Some(Move::PawnEnPassantAttack {
                    piece: *piece,
                    destination,
                    attacked: *pawn,
                })
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_tiles() -> [Tile; NUM_TILES] {
        std::array::from_fn(|sq| Tile::create(sq, None))
    }

    fn place(tiles: &mut [Tile; NUM_TILES], piece: Piece) {
        tiles[piece.square()] = Tile::create(piece.square(), Some(piece));
    }

    fn destinations(moves: &[Move]) -> Vec<usize> {
        let mut squares: Vec<usize> = moves.iter().map(Move::destination).collect();
        squares.sort_unstable();
        squares
    }

    #[test]
    fn knight_in_corner_does_not_wrap() {
        let mut tiles = empty_tiles();
        let knight = Piece::new(PieceKind::Knight, Alliance::White, 0);
        place(&mut tiles, knight);
        let board = BoardView::new(&tiles, None);
        // a8 -> b6 (17), c7 (10)
        assert_eq!(destinations(&knight_moves(&knight, &board)), vec![10, 17]);
    }

    #[test]
    fn knight_on_g_file_skips_wrapping_offsets() {
        let mut tiles = empty_tiles();
        let knight = Piece::new(PieceKind::Knight, Alliance::White, 30); // g5
        place(&mut tiles, knight);
        let board = BoardView::new(&tiles, None);
        let moves = knight_moves(&knight, &board);
        assert_eq!(moves.len(), 6);
        assert!(!destinations(&moves).contains(&24));
        assert!(!destinations(&moves).contains(&40));
    }

    #[test]
    fn king_on_h_file_stays_on_board() {
        let mut tiles = empty_tiles();
        let king = Piece::new(PieceKind::King, Alliance::White, 39); // h4
        place(&mut tiles, king);
        let board = BoardView::new(&tiles, None);
        assert_eq!(destinations(&king_moves(&king, &board)), vec![30, 31, 38, 46, 47]);
    }

    #[test]
    fn rook_stops_at_blockers() {
        let mut tiles = empty_tiles();
        let rook = Piece::new(PieceKind::Rook, Alliance::White, 56); // a1
        place(&mut tiles, rook);
        place(&mut tiles, Piece::new(PieceKind::Pawn, Alliance::White, 40)); // a3
        place(&mut tiles, Piece::new(PieceKind::Knight, Alliance::Black, 59)); // d1
        let board = BoardView::new(&tiles, None);
        let moves = rook_moves(&rook, &board);
        assert_eq!(destinations(&moves), vec![48, 57, 58, 59]);
        let captures: Vec<_> = moves.iter().filter(|m| m.is_attack()).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].destination(), 59);
    }

    #[test]
    fn bishop_on_a_file_never_wraps() {
        let mut tiles = empty_tiles();
        let bishop = Piece::new(PieceKind::Bishop, Alliance::Black, 24); // a5
        place(&mut tiles, bishop);
        let board = BoardView::new(&tiles, None);
        // b6 c7 d8 and b4 c3 d2 e1
        assert_eq!(
            destinations(&bishop_moves(&bishop, &board)),
            vec![3, 10, 17, 33, 42, 51, 60]
        );
    }

    #[test]
    fn queen_in_centre_sees_27_squares() {
        let mut tiles = empty_tiles();
        let queen = Piece::new(PieceKind::Queen, Alliance::White, 27); // d5
        place(&mut tiles, queen);
        let board = BoardView::new(&tiles, None);
        assert_eq!(queen_moves(&queen, &board).len(), 27);
    }

    #[test]
    fn pawn_double_push_needs_clear_path() {
        let mut tiles = empty_tiles();
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, 52); // e2
        place(&mut tiles, pawn);
        let board = BoardView::new(&tiles, None);
        assert_eq!(destinations(&pawn_moves(&pawn, &board)), vec![36, 44]);

        place(&mut tiles, Piece::new(PieceKind::Knight, Alliance::Black, 44)); // e3
        let board = BoardView::new(&tiles, None);
        assert!(pawn_moves(&pawn, &board).is_empty());
    }

    #[test]
    fn moved_pawn_cannot_jump() {
        let mut tiles = empty_tiles();
        let pawn = Piece::with_first_move(PieceKind::Pawn, Alliance::Black, 12, false); // e7
        place(&mut tiles, pawn);
        let board = BoardView::new(&tiles, None);
        assert_eq!(destinations(&pawn_moves(&pawn, &board)), vec![20]);
    }

    #[test]
    fn pawn_push_to_last_rank_promotes() {
        let mut tiles = empty_tiles();
        let pawn = Piece::with_first_move(PieceKind::Pawn, Alliance::White, 9, false); // b7
        place(&mut tiles, pawn);
        place(&mut tiles, Piece::new(PieceKind::Rook, Alliance::Black, 0)); // a8
        let board = BoardView::new(&tiles, None);
        let moves = pawn_moves(&pawn, &board);
        assert_eq!(moves.len(), 2);
        assert!(moves
            .iter()
            .all(|m| matches!(m, Move::PawnPromotion(_))));
    }

    #[test]
    fn en_passant_requires_adjacent_jumped_pawn() {
        let mut tiles = empty_tiles();
        let pawn = Piece::with_first_move(PieceKind::Pawn, Alliance::White, 28, false); // e5
        let jumped = Piece::with_first_move(PieceKind::Pawn, Alliance::Black, 27, false); // d5
        place(&mut tiles, pawn);
        place(&mut tiles, jumped);

        let board = BoardView::new(&tiles, Some(&jumped));
        let moves = pawn_moves(&pawn, &board);
        let en_passant: Vec<_> = moves
            .iter()
            .filter(|m| matches!(m, Move::PawnEnPassantAttack { .. }))
            .collect();
        assert_eq!(en_passant.len(), 1);
        assert_eq!(en_passant[0].destination(), 19); // d6
        assert_eq!(en_passant[0].attacked_piece(), Some(&jumped));

        let board = BoardView::new(&tiles, None);
        assert!(pawn_moves(&pawn, &board)
            .iter()
            .all(|m| !matches!(m, Move::PawnEnPassantAttack { .. })));
    }
}
