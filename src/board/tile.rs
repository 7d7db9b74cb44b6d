// Board cells. Empty tiles carry no state, so all 64 are built once at
// compile time and copied out on demand.

use super::piece::Piece;
use crate::utils::NUM_TILES;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty { square: usize },
    Occupied { square: usize, piece: Piece },
}

const EMPTY_TILES: [Tile; NUM_TILES] = create_all_empty_tiles();

const fn create_all_empty_tiles() -> [Tile; NUM_TILES] {
    let mut tiles = [Tile::Empty { square: 0 }; NUM_TILES];
    let mut square = 0;
    while square < NUM_TILES {
        tiles[square] = Tile::Empty { square };
        square += 1;
    }
    tiles
}

impl Tile {
    /// An occupied tile for `Some(piece)`, otherwise the cached empty tile
    pub fn create(square: usize, piece: Option<Piece>) -> Tile {
        match piece {
            Some(piece) => Tile::Occupied { square, piece },
            None => EMPTY_TILES[square],
        }
    }

    pub fn square(&self) -> usize {
        match self {
            Tile::Empty { square } | Tile::Occupied { square, .. } => *square,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied { .. })
    }

    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Tile::Occupied { piece, .. } => Some(piece),
            Tile::Empty { .. } => None,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // pad() keeps width/alignment flags working for the board grid
            Tile::Empty { .. } => f.pad("-"),
            Tile::Occupied { piece, .. } => f.pad(&piece.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Alliance, PieceKind};

    #[test]
    fn empty_tiles_keep_their_square() {
        for sq in 0..NUM_TILES {
            let tile = Tile::create(sq, None);
            assert_eq!(tile.square(), sq);
            assert!(!tile.is_occupied());
            assert!(tile.piece().is_none());
        }
    }

    #[test]
    fn occupied_tile_renders_piece_letter() {
        let rook = Piece::new(PieceKind::Rook, Alliance::Black, 0);
        let tile = Tile::create(0, Some(rook));
        assert!(tile.is_occupied());
        assert_eq!(tile.piece(), Some(&rook));
        assert_eq!(format!("{:>3}", tile), "  r");
        assert_eq!(format!("{:>3}", Tile::create(5, None)), "  -");
    }
}
