//! Perft（合法手木の葉の数え上げ）
//!
//! 合法手生成と `do_move` / `undo_move` の整合を確かめるための計数。

use crate::position::Position;
use crate::types::Move;

/// `depth` 手先までの合法手木の葉の数
///
/// 呼び出し後の局面は呼び出し前と同じ。
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().map(|mv| child_nodes(pos, mv, depth - 1)).sum()
}

/// 初手ごとの葉の数（USI表記, 葉の数）
pub fn perft_divide(pos: &mut Position, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    pos.legal_moves()
        .into_iter()
        .map(|mv| (mv.to_string(), child_nodes(pos, mv, depth - 1)))
        .collect()
}

/// `mv` を適用した局面の葉の数。適用できなければ0
fn child_nodes(pos: &mut Position, mv: Move, depth: u32) -> u64 {
    if let Err(e) = pos.do_move(mv) {
        log::warn!("legal move {mv} could not be applied: {e}");
        return 0;
    }
    let nodes = perft(pos, depth);
    if let Err(e) = pos.undo_move() {
        log::warn!("legal move {mv} could not be undone: {e}");
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_startpos_shallow() {
        let mut pos = Position::startpos();
        assert_eq!(perft(&mut pos, 0), 1);
        assert_eq!(perft(&mut pos, 1), 30);
        assert_eq!(perft(&mut pos, 2), 900);
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn test_perft_divide_sums() {
        let mut pos = Position::startpos();
        let divide = perft_divide(&mut pos, 2);
        assert_eq!(divide.len(), 30);
        assert!(divide.iter().all(|(_, n)| *n == 30));
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 900);
    }
}
