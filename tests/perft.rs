use minimax_chess::board::START_FEN;
use minimax_chess::search::perft;
use minimax_chess::Position as Board;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth-1);
    }
    nodes
}

fn compare(fen: &str, max_depth: u32) {
    minimax_chess::init();

    let fen_parsed: Fen = fen.parse().expect("fen");
    let pos: Chess = fen_parsed
        .into_position(CastlingMode::Standard)
        .expect("shakmaty position");
    let board = Board::from_fen(fen).expect("from_fen");

    for depth in 1..=max_depth {
        let expected = perft_shakmaty(&pos, depth);
        let got = perft(&board, depth).expect("perft");
        assert_eq!(got, expected, "perft mismatch for '{}' at depth {}: got {} expected {}", fen, depth, got, expected);
    }
}

#[test]
fn perft_regression_starting_pos() {
    compare(START_FEN, 3);
}

#[test]
fn perft_standard_board_matches_fen_start() {
    minimax_chess::init();
    let standard = Board::create_standard_board().unwrap();
    assert_eq!(perft(&standard, 1).unwrap(), 20);
    assert_eq!(perft(&standard, 3).unwrap(), 8902);
}

#[test]
fn perft_en_passant_available() {
    compare("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", 3);
}

#[test]
fn perft_knights_and_kings() {
    compare("4k3/8/3n4/8/8/4N3/8/4K3 w - - 0 1", 3);
}
