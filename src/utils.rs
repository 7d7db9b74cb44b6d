// Board geometry tables and algebraic notation helpers.
//
// Tiles are indexed 0..64 row-major from a8 (0) to h1 (63): row 0 is Black's
// home rank, row 7 is White's.

use crate::error::{BoardError, BoardResult};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const NUM_TILES: usize = 64;
pub const NUM_TILES_PER_ROW: usize = 8;

// File masks (a-file is column 0, h-file column 7)
pub const FIRST_COLUMN: [bool; NUM_TILES] = in_column(0);
pub const SECOND_COLUMN: [bool; NUM_TILES] = in_column(1);
pub const SEVENTH_COLUMN: [bool; NUM_TILES] = in_column(6);
pub const EIGHTH_COLUMN: [bool; NUM_TILES] = in_column(7);

// Rank masks, named after the chess rank (eighth rank is row 0)
pub const EIGHTH_RANK: [bool; NUM_TILES] = in_row(0);
pub const SEVENTH_RANK: [bool; NUM_TILES] = in_row(8);
pub const SECOND_RANK: [bool; NUM_TILES] = in_row(48);
pub const FIRST_RANK: [bool; NUM_TILES] = in_row(56);

const fn in_column(column: usize) -> [bool; NUM_TILES] {
    let mut table = [false; NUM_TILES];
    let mut sq = column;
    while sq < NUM_TILES {
        table[sq] = true;
        sq += NUM_TILES_PER_ROW;
    }
    table
}

const fn in_row(row_start: usize) -> [bool; NUM_TILES] {
    let mut table = [false; NUM_TILES];
    let mut sq = row_start;
    while sq < row_start + NUM_TILES_PER_ROW {
        table[sq] = true;
        sq += 1;
    }
    table
}

/// True when a signed candidate coordinate lands on the board
#[inline]
pub fn is_valid_square(coord: i32) -> bool {
    (0..NUM_TILES as i32).contains(&coord)
}

pub const ALGEBRAIC_NOTATION: [&str; NUM_TILES] = [
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8", //
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", //
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6", //
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", //
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4", //
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", //
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", //
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
];

static POSITION_TO_SQUARE: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();

fn init_position_to_square() -> HashMap<&'static str, usize> {
    ALGEBRAIC_NOTATION
        .iter()
        .enumerate()
        .map(|(sq, name)| (*name, sq))
        .collect()
}

#[inline(always)]
pub fn init_tables() {
    POSITION_TO_SQUARE.get_or_init(init_position_to_square);
}

/// Convert a square index to algebraic notation (0 -> "a8", 63 -> "h1")
pub fn algebraic_from_square(sq: usize) -> BoardResult<&'static str> {
    ALGEBRAIC_NOTATION
        .get(sq)
        .copied()
        .ok_or_else(|| BoardError::InvalidSquare(sq.to_string()))
}

/// Convert algebraic notation to a square index ("a8" -> 0, "e1" -> 60)
pub fn square_from_algebraic(name: &str) -> BoardResult<usize> {
    POSITION_TO_SQUARE
        .get_or_init(init_position_to_square)
        .get(name)
        .copied()
        .ok_or_else(|| BoardError::InvalidSquare(name.to_string()))
}

// Notation used by Display impls, which never see off-board squares except
// through the null move.
pub(crate) fn square_name(sq: usize) -> &'static str {
    ALGEBRAIC_NOTATION.get(sq).copied().unwrap_or("--")
}
