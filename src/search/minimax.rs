//! Fixed-depth minimax
//!
//! Full-width search with no pruning and no move ordering. Every legal move
//! is attempted through `make_move`; attempts that do not complete are
//! skipped and never touch the running extremum. White maximizes, Black
//! minimizes, and ties go to the move generated last.

use super::params::SearchParams;
use super::stats::SearchStats;
use crate::board::{Alliance, Move, Position};
use crate::error::BoardResult;
use crate::eval::{BoardEvaluator, StandardBoardEvaluator};
use std::fmt;
use tracing::{debug, info, trace};

/// Something that picks a move for the side to move
pub trait MoveStrategy {
    /// The chosen move, or [`Move::Null`] when no move completes
    fn execute(&mut self, position: &Position) -> BoardResult<Move>;
}

/// Minimax over an injectable evaluator
#[derive(Debug, Clone)]
pub struct MiniMax<E = StandardBoardEvaluator> {
    evaluator: E,
    params: SearchParams,
    stats: SearchStats,
}

impl MiniMax<StandardBoardEvaluator> {
    pub fn new(params: SearchParams) -> Self {
        Self::with_evaluator(StandardBoardEvaluator, params)
    }
}

impl<E: BoardEvaluator> MiniMax<E> {
    pub fn with_evaluator(evaluator: E, params: SearchParams) -> Self {
        Self {
            evaluator,
            params,
            stats: SearchStats::new(),
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Statistics of the most recent search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Best move for the side to move together with its minimax value.
    ///
    /// When nothing completes the move is [`Move::Null`] and the value is the
    /// untouched sentinel (`i32::MIN` for White, `i32::MAX` for Black).
    pub fn search(&mut self, position: &Position) -> BoardResult<(Move, i32)> {
        self.stats.reset();
        self.stats.start_timing();

        let player = position.current_player();
        let maximizing = player.alliance() == Alliance::White;
        let child_depth = self.params.depth.saturating_sub(1);
        info!("{} thinking with depth = {}", player, self.params.depth);

        let mut best_move = Move::Null;
        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
        for mv in player.legal_moves() {
            let transition = player.make_move(mv)?;
            self.stats.inc_attempt(transition.status().is_done());
            if !transition.status().is_done() {
                continue;
            }
            let value = self.minimax(transition.position(), child_depth)?;
            if self.params.log_moves {
                trace!(%mv, value, "root move");
            }
            let improves = if maximizing {
                value >= best_value
            } else {
                value <= best_value
            };
            if improves {
                best_value = value;
                best_move = mv.clone();
            }
        }

        self.stats.update_timing();
        debug!(best = %best_move, value = best_value, stats = %self.stats, "search finished");
        Ok((best_move, best_value))
    }

    fn minimax(&mut self, position: &Position, depth: u32) -> BoardResult<i32> {
        if depth == 0 || is_end_game(position)? {
            self.stats.inc_evaluated();
            return self.evaluator.evaluate(position, depth);
        }

        let player = position.current_player();
        let maximizing = player.alliance() == Alliance::White;
        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
        for mv in player.legal_moves() {
            let transition = player.make_move(mv)?;
            self.stats.inc_attempt(transition.status().is_done());
            if !transition.status().is_done() {
                continue;
            }
            let value = self.minimax(transition.position(), depth - 1)?;
            best_value = if maximizing {
                best_value.max(value)
            } else {
                best_value.min(value)
            };
        }
        Ok(best_value)
    }
}

impl<E: BoardEvaluator> MoveStrategy for MiniMax<E> {
    fn execute(&mut self, position: &Position) -> BoardResult<Move> {
        self.search(position).map(|(mv, _)| mv)
    }
}

impl<E> fmt::Display for MiniMax<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MiniMax")
    }
}

// Checkmate or stalemate for the side to move
fn is_end_game(position: &Position) -> BoardResult<bool> {
    let player = position.current_player();
    Ok(player.is_in_checkmate()? || player.is_in_stalemate()?)
}

/// Best move for the side to move at a fixed `depth` with the standard
/// evaluator, or [`Move::Null`] if no move completes
pub fn search(position: &Position, depth: u32) -> BoardResult<Move> {
    MiniMax::new(SearchParams::new().depth(depth)).execute(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Builder, Piece, PieceKind};

    // Scores every position as zero, so the last completed root move wins.
    struct Flat;

    impl BoardEvaluator for Flat {
        fn evaluate(&self, _: &Position, _: u32) -> BoardResult<i32> {
            Ok(0)
        }
    }

    #[test]
    fn ties_go_to_last_generated_move() {
        let position = Position::create_standard_board().unwrap();
        let mut strategy = MiniMax::with_evaluator(Flat, SearchParams::new().depth(1));
        let chosen = strategy.execute(&position).unwrap();
        let last = position.current_player().legal_moves().last().unwrap();
        assert_eq!(&chosen, last);
        assert_eq!(strategy.stats().evaluated, 20);
        assert_eq!(strategy.stats().moves_attempted, 20);
    }

    #[test]
    fn depth_zero_still_scores_children() {
        let position = Position::create_standard_board().unwrap();
        let mut strategy = MiniMax::with_evaluator(Flat, SearchParams::new().depth(0));
        assert!(!strategy.execute(&position).unwrap().is_null());
        assert_eq!(strategy.stats().evaluated, 20);
    }

    #[test]
    fn king_takes_hanging_queen() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::new(PieceKind::King, Alliance::White, 60)) // e1
            .set_piece(Piece::new(PieceKind::Queen, Alliance::Black, 52)) // e2, unprotected
            .set_piece(Piece::new(PieceKind::King, Alliance::Black, 4)) // e8
            .set_move_maker(Alliance::White);
        let position = builder.build().unwrap();
        let (best, value) = MiniMax::new(SearchParams::new().depth(1))
            .search(&position)
            .unwrap();
        assert_eq!(best.destination(), 52);
        assert!(best.is_attack());
        assert!(value > 0);
    }

    #[test]
    fn strategy_name() {
        assert_eq!(MiniMax::new(SearchParams::new()).to_string(), "MiniMax");
    }
}
