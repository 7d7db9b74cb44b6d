//! Static position evaluation
//!
//! Scores are in centipawns from White's point of view: each side is scored
//! on its own terms and the result is `white - black`.

use crate::board::Position;
use crate::error::BoardResult;
use crate::player::Player;

// ============================================================================
// BONUSES (in centipawns)
// ============================================================================
const CHECK_BONUS: i32 = 50;
const CASTLE_BONUS: i32 = 60;
const CHECKMATE_BONUS: i32 = 10_000;

/// Scores a position; `depth` is the search depth remaining when the leaf
/// was reached, so evaluators can prefer faster mates.
pub trait BoardEvaluator {
    fn evaluate(&self, position: &Position, depth: u32) -> BoardResult<i32>;
}

/// Material, mobility, check and checkmate
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBoardEvaluator;

impl BoardEvaluator for StandardBoardEvaluator {
    fn evaluate(&self, position: &Position, depth: u32) -> BoardResult<i32> {
        let white = score_player(position.white_player(), depth)?;
        let black = score_player(position.black_player(), depth)?;
        Ok(white.saturating_sub(black))
    }
}

/// Convenience wrapper over [`StandardBoardEvaluator`]
pub fn evaluate(position: &Position, depth: u32) -> BoardResult<i32> {
    StandardBoardEvaluator.evaluate(position, depth)
}

fn score_player(player: Player<'_>, depth: u32) -> BoardResult<i32> {
    Ok(piece_value(player)
        .saturating_add(mobility(player))
        .saturating_add(check(player))
        .saturating_add(checkmate(player, depth)?)
        .saturating_add(castled(player)))
}

fn piece_value(player: Player<'_>) -> i32 {
    player.active_pieces().iter().map(|p| p.value()).sum()
}

fn mobility(player: Player<'_>) -> i32 {
    i32::try_from(player.legal_moves().len()).unwrap_or(i32::MAX)
}

fn check(player: Player<'_>) -> i32 {
    if player.opponent().is_in_check() {
        CHECK_BONUS
    } else {
        0
    }
}

fn checkmate(player: Player<'_>, depth: u32) -> BoardResult<i32> {
    Ok(if player.opponent().is_in_checkmate()? {
        CHECKMATE_BONUS.saturating_mul(depth_bonus(depth))
    } else {
        0
    })
}

fn depth_bonus(depth: u32) -> i32 {
    if depth == 0 {
        1
    } else {
        i32::try_from(depth).unwrap_or(i32::MAX).saturating_mul(100)
    }
}

fn castled(player: Player<'_>) -> i32 {
    if player.is_castled() {
        CASTLE_BONUS
    } else {
        0
    }
}
