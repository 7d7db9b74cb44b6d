// FEN import. Castling rights and the en-passant target have no direct home
// in a Position; they are folded into the first-move flags of kings and rooks
// and into the position's en-passant pawn.

use super::piece::{Alliance, Piece, PieceKind};
use super::position::{Builder, Position};
use crate::error::{BoardError, BoardResult};
use crate::utils::{square_from_algebraic, NUM_TILES_PER_ROW, SECOND_RANK, SEVENTH_RANK};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Default, Clone, Copy)]
struct CastlingRights {
    white_king_side: bool,
    white_queen_side: bool,
    black_king_side: bool,
    black_queen_side: bool,
}

impl CastlingRights {
    fn parse(field: &str) -> BoardResult<Self> {
        let mut rights = CastlingRights::default();
        for ch in field.chars() {
            match ch {
                'K' => rights.white_king_side = true,
                'Q' => rights.white_queen_side = true,
                'k' => rights.black_king_side = true,
                'q' => rights.black_queen_side = true,
                '-' => {}
                _ => return Err(BoardError::InvalidFen(format!("invalid castle char '{ch}'"))),
            }
        }
        Ok(rights)
    }

    // Whether a piece on its home square still counts as unmoved
    fn keeps_first_move(&self, kind: PieceKind, alliance: Alliance, square: usize) -> bool {
        match (kind, alliance) {
            (PieceKind::Pawn, Alliance::White) => SECOND_RANK[square],
            (PieceKind::Pawn, Alliance::Black) => SEVENTH_RANK[square],
            (PieceKind::King, Alliance::White) => {
                square == 60 && (self.white_king_side || self.white_queen_side)
            }
            (PieceKind::King, Alliance::Black) => {
                square == 4 && (self.black_king_side || self.black_queen_side)
            }
            (PieceKind::Rook, Alliance::White) => {
                (square == 63 && self.white_king_side) || (square == 56 && self.white_queen_side)
            }
            (PieceKind::Rook, Alliance::Black) => {
                (square == 7 && self.black_king_side) || (square == 0 && self.black_queen_side)
            }
            _ => true,
        }
    }
}

impl Position {
    /// Build a position from a FEN record.
    ///
    /// The halfmove clock and fullmove number are optional and ignored.
    pub fn from_fen(fen: &str) -> BoardResult<Position> {
        let mut parts = fen.split_whitespace();
        let placement = parts
            .next()
            .ok_or_else(|| BoardError::InvalidFen("missing pieces".into()))?;
        let side = parts
            .next()
            .ok_or_else(|| BoardError::InvalidFen("missing side".into()))?;
        let castling = parts
            .next()
            .ok_or_else(|| BoardError::InvalidFen("missing castling".into()))?;
        let en_passant = parts
            .next()
            .ok_or_else(|| BoardError::InvalidFen("missing en-passant".into()))?;

        let move_maker = match side {
            "w" => Alliance::White,
            "b" => Alliance::Black,
            _ => return Err(BoardError::InvalidFen(format!("invalid side '{side}'"))),
        };
        let rights = CastlingRights::parse(castling)?;

        let mut builder = Builder::new();
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != NUM_TILES_PER_ROW {
            return Err(BoardError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }
        // FEN lists rank 8 first, which is row 0 here
        for (row, text) in rows.iter().enumerate() {
            let mut file = 0;
            for ch in text.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let kind = PieceKind::from_letter(ch)
                    .ok_or_else(|| BoardError::InvalidFen(format!("invalid piece char '{ch}'")))?;
                if file >= NUM_TILES_PER_ROW {
                    return Err(BoardError::InvalidFen(format!("rank {} overflows", 8 - row)));
                }
                let alliance = if ch.is_ascii_uppercase() {
                    Alliance::White
                } else {
                    Alliance::Black
                };
                let square = row * NUM_TILES_PER_ROW + file;
                let first_move = rights.keeps_first_move(kind, alliance, square);
                builder.set_piece(Piece::with_first_move(kind, alliance, square, first_move));
                file += 1;
            }
            if file != NUM_TILES_PER_ROW {
                return Err(BoardError::InvalidFen(format!(
                    "rank {} has {} files",
                    8 - row,
                    file
                )));
            }
        }

        if en_passant != "-" {
            let target = square_from_algebraic(en_passant)
                .map_err(|_| BoardError::InvalidFen(format!("invalid en-passant '{en_passant}'")))?;
            let jumper = move_maker.opponent();
            let pawn_square = target as i32 + NUM_TILES_PER_ROW as i32 * jumper.direction();
            let pawn = usize::try_from(pawn_square)
                .ok()
                .and_then(|sq| builder.piece_at(sq).copied())
                .filter(|p| p.kind() == PieceKind::Pawn && p.alliance() == jumper)
                .ok_or_else(|| {
                    BoardError::InvalidFen(format!("no pawn to capture en passant on {en_passant}"))
                })?;
            builder.set_en_passant_pawn(Piece::with_first_move(
                PieceKind::Pawn,
                jumper,
                pawn.square(),
                false,
            ));
        }

        builder.set_move_maker(move_maker);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_fen_matches_standard_board() {
        let from_fen = Position::from_fen(START_FEN).unwrap();
        let standard = Position::create_standard_board().unwrap();
        assert_eq!(from_fen.tiles(), standard.tiles());
        assert_eq!(from_fen.move_maker(), Alliance::White);
        assert_eq!(
            from_fen.current_player().legal_moves().len(),
            standard.current_player().legal_moves().len()
        );
    }

    #[test]
    fn missing_castle_right_marks_rook_moved() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1").unwrap();
        assert!(position.tile(63).piece().unwrap().is_first_move());
        assert!(!position.tile(56).piece().unwrap().is_first_move());
        assert!(position.tile(0).piece().unwrap().is_first_move());
        assert!(!position.tile(7).piece().unwrap().is_first_move());
        assert_eq!(position.move_maker(), Alliance::Black);
    }

    #[test]
    fn en_passant_field_sets_jumped_pawn() {
        let position = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let pawn = position.en_passant_pawn().unwrap();
        assert_eq!(pawn.square(), 27); // d5
        assert_eq!(pawn.alliance(), Alliance::Black);
    }

    #[test]
    fn rejects_malformed_records() {
        for fen in [
            "",
            "8/8/8/8/8/8/8/8 w",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - d6 0 1",
        ] {
            assert!(
                matches!(Position::from_fen(fen), Err(BoardError::InvalidFen(_))),
                "{fen}"
            );
        }
    }

    #[test]
    fn missing_king_surfaces_as_board_error() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            BoardError::MissingKing(Alliance::Black)
        );
    }
}
