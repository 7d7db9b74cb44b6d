// Immutable position snapshot and its builder

use super::movegen::{self, BoardView};
use super::piece::{Alliance, Piece, PieceKind};
use super::tile::Tile;
use crate::error::BoardResult;
use crate::player::{Player, PlayerState};
use crate::utils::{NUM_TILES, NUM_TILES_PER_ROW};
use std::collections::HashMap;
use std::fmt;

/// Accumulates a square -> piece map and the side to move, then builds a
/// [`Position`]. Setting a piece on an occupied square replaces it.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    board_config: HashMap<usize, Piece>,
    move_maker: Alliance,
    en_passant_pawn: Option<Piece>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.board_config.insert(piece.square(), piece);
        self
    }

    pub fn set_move_maker(&mut self, move_maker: Alliance) -> &mut Self {
        self.move_maker = move_maker;
        self
    }

    /// Mark the pawn that just made a double push
    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    pub fn piece_at(&self, square: usize) -> Option<&Piece> {
        self.board_config.get(&square)
    }

    pub fn build(&self) -> BoardResult<Position> {
        Position::new(self)
    }
}

/// A full game state: 64 tiles, both sides' active pieces, the pawn
/// capturable en passant (valid for this ply only) and the side to move.
///
/// Both players' legal moves and check status are computed at build time.
#[derive(Debug, Clone)]
pub struct Position {
    tiles: [Tile; NUM_TILES],
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    en_passant_pawn: Option<Piece>,
    move_maker: Alliance,
    white_player: PlayerState,
    black_player: PlayerState,
}

impl Position {
    fn new(builder: &Builder) -> BoardResult<Self> {
        let tiles: [Tile; NUM_TILES] =
            std::array::from_fn(|sq| Tile::create(sq, builder.board_config.get(&sq).copied()));
        let white_pieces = calculate_active_pieces(&tiles, Alliance::White);
        let black_pieces = calculate_active_pieces(&tiles, Alliance::Black);
        let en_passant_pawn = builder.en_passant_pawn;

        let view = BoardView::new(&tiles, en_passant_pawn.as_ref());
        let white_standard_moves = movegen::calculate_legal_moves(&white_pieces, &view);
        let black_standard_moves = movegen::calculate_legal_moves(&black_pieces, &view);

        let white_player = PlayerState::new(
            Alliance::White,
            &view,
            &white_pieces,
            white_standard_moves.clone(),
            &black_standard_moves,
        )?;
        let black_player = PlayerState::new(
            Alliance::Black,
            &view,
            &black_pieces,
            black_standard_moves,
            &white_standard_moves,
        )?;

        Ok(Self {
            tiles,
            white_pieces,
            black_pieces,
            en_passant_pawn,
            move_maker: builder.move_maker,
            white_player,
            black_player,
        })
    }

    /// The standard 32-piece opening layout, White to move
    pub fn create_standard_board() -> BoardResult<Position> {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut builder = Builder::new();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            builder
                .set_piece(Piece::new(kind, Alliance::Black, file))
                .set_piece(Piece::new(PieceKind::Pawn, Alliance::Black, 8 + file))
                .set_piece(Piece::new(PieceKind::Pawn, Alliance::White, 48 + file))
                .set_piece(Piece::new(kind, Alliance::White, 56 + file));
        }
        builder.set_move_maker(Alliance::White);
        builder.build()
    }

    pub fn tile(&self, square: usize) -> &Tile {
        &self.tiles[square]
    }

    pub fn tiles(&self) -> &[Tile; NUM_TILES] {
        &self.tiles
    }

    pub fn white_pieces(&self) -> &[Piece] {
        &self.white_pieces
    }

    pub fn black_pieces(&self) -> &[Piece] {
        &self.black_pieces
    }

    pub fn pieces(&self, alliance: Alliance) -> &[Piece] {
        match alliance {
            Alliance::White => &self.white_pieces,
            Alliance::Black => &self.black_pieces,
        }
    }

    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.en_passant_pawn.as_ref()
    }

    /// Side to move
    pub fn move_maker(&self) -> Alliance {
        self.move_maker
    }

    pub fn player(&self, alliance: Alliance) -> Player<'_> {
        let state = match alliance {
            Alliance::White => &self.white_player,
            Alliance::Black => &self.black_player,
        };
        Player::new(self, state)
    }

    pub fn white_player(&self) -> Player<'_> {
        self.player(Alliance::White)
    }

    pub fn black_player(&self) -> Player<'_> {
        self.player(Alliance::Black)
    }

    pub fn current_player(&self) -> Player<'_> {
        self.player(self.move_maker)
    }
}

fn calculate_active_pieces(tiles: &[Tile; NUM_TILES], alliance: Alliance) -> Vec<Piece> {
    tiles
        .iter()
        .filter_map(Tile::piece)
        .filter(|piece| piece.alliance() == alliance)
        .copied()
        .collect()
}

// 8x8 grid, three characters per tile, uppercase White, lowercase Black
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tile) in self.tiles.iter().enumerate() {
            write!(f, "{:>3}", tile)?;
            if (i + 1) % NUM_TILES_PER_ROW == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;

    #[test]
    fn standard_board_layout() {
        let position = Position::create_standard_board().unwrap();
        assert_eq!(position.white_pieces().len(), 16);
        assert_eq!(position.black_pieces().len(), 16);
        assert_eq!(position.move_maker(), Alliance::White);
        assert!(position.en_passant_pawn().is_none());
        let king = position.tile(60).piece().unwrap();
        assert_eq!(king.kind(), PieceKind::King);
        assert_eq!(king.alliance(), Alliance::White);
        assert_eq!(position.tile(3).piece().unwrap().kind(), PieceKind::Queen);
        assert!(!position.tile(35).is_occupied());
    }

    #[test]
    fn grid_rendering() {
        let position = Position::create_standard_board().unwrap();
        let text = position.to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], "  r  n  b  q  k  b  n  r");
        assert_eq!(rows[4], "  -  -  -  -  -  -  -  -");
        assert_eq!(rows[7], "  R  N  B  Q  K  B  N  R");
    }

    #[test]
    fn build_without_king_fails() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::new(PieceKind::King, Alliance::White, 60))
            .set_piece(Piece::new(PieceKind::Rook, Alliance::Black, 0));
        assert_eq!(
            builder.build().unwrap_err(),
            BoardError::MissingKing(Alliance::Black)
        );
    }

    #[test]
    fn build_with_two_kings_fails() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::new(PieceKind::King, Alliance::White, 60))
            .set_piece(Piece::new(PieceKind::King, Alliance::White, 56))
            .set_piece(Piece::new(PieceKind::King, Alliance::Black, 4));
        assert_eq!(
            builder.build().unwrap_err(),
            BoardError::MultipleKings {
                alliance: Alliance::White,
                count: 2
            }
        );
    }

    #[test]
    fn later_piece_replaces_earlier_on_same_square() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::new(PieceKind::King, Alliance::White, 60))
            .set_piece(Piece::new(PieceKind::King, Alliance::Black, 4))
            .set_piece(Piece::new(PieceKind::Knight, Alliance::White, 20))
            .set_piece(Piece::new(PieceKind::Bishop, Alliance::Black, 20));
        let position = builder.build().unwrap();
        assert_eq!(position.tile(20).piece().unwrap().kind(), PieceKind::Bishop);
        assert_eq!(position.white_pieces().len(), 1);
    }
}
