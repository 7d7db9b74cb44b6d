//! Move-path enumeration for validating the legality layer
//!
//! Counts go through `make_move`, so a node is only counted when its move
//! completes. This is the same path the minimax walks.

use crate::board::{Move, Position};
use crate::error::BoardResult;

/// Number of completed move sequences of length `depth`
pub fn perft(position: &Position, depth: u32) -> BoardResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let player = position.current_player();
    let mut nodes = 0u64;
    for mv in player.legal_moves() {
        let transition = player.make_move(mv)?;
        if !transition.status().is_done() {
            continue;
        }
        nodes += if depth == 1 {
            1
        } else {
            perft(transition.position(), depth - 1)?
        };
    }
    Ok(nodes)
}

/// Per-root-move breakdown of [`perft`], in generation order
pub fn divide(position: &Position, depth: u32) -> BoardResult<Vec<(Move, u64)>> {
    let player = position.current_player();
    let mut counts = Vec::new();
    for mv in player.legal_moves() {
        let transition = player.make_move(mv)?;
        if transition.status().is_done() {
            let nodes = perft(transition.position(), depth.saturating_sub(1))?;
            counts.push((mv.clone(), nodes));
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_counts_from_start() {
        let position = Position::create_standard_board().unwrap();
        assert_eq!(perft(&position, 0).unwrap(), 1);
        assert_eq!(perft(&position, 1).unwrap(), 20);
        assert_eq!(perft(&position, 2).unwrap(), 400);
    }

    #[test]
    fn divide_sums_to_perft() {
        let position = Position::create_standard_board().unwrap();
        let split = divide(&position, 2).unwrap();
        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|(_, n)| *n == 20));
        let total: u64 = split.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&position, 2).unwrap());
    }
}
