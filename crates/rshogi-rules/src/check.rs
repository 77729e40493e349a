//! 王手判定
//!
//! 玉の升から外向きに、駒の種類ごとに王手になりうる升だけを調べる。
//! 相手の全駒の利きを生成する `is_square_attacked` と結果は一致する。

use crate::attack::{DIAGONAL, ORTHOGONAL, oriented, step_offsets};
use crate::bitboard::Bitboard;
use crate::position::Position;
use crate::types::{Color, Piece, PieceType, Square};

impl Position {
    /// `color` の玉に相手の駒が利いているか
    ///
    /// 玉がない局面（テスト用の配置など）では `false`。
    pub fn is_check(&self, color: Color) -> bool {
        let Some(ksq) = self.king_square(color) else {
            log::trace!("no {color:?} king on board; treating as not in check");
            return false;
        };
        let them = !color;
        let pieces = |pt: PieceType| self.pieces(Piece::new(them, pt));

        let gold_like = PieceType::ALL
            .into_iter()
            .filter(|pt| pt.moves_like_gold())
            .fold(Bitboard::EMPTY, |acc, pt| acc | pieces(pt));

        // ステップで届く駒
        let steppers = [
            (PieceType::Pawn, pieces(PieceType::Pawn)),
            (PieceType::Knight, pieces(PieceType::Knight)),
            (PieceType::Gold, gold_like),
            (PieceType::Silver, pieces(PieceType::Silver)),
            (PieceType::King, pieces(PieceType::King)),
            (PieceType::Horse, pieces(PieceType::Horse)),
            (PieceType::Dragon, pieces(PieceType::Dragon)),
        ];
        for (pt, attackers) in steppers {
            if !attackers.is_empty() && self.stepped_from(ksq, them, pt, attackers) {
                return true;
            }
        }

        // 飛び駒: 各方向で最初に当たった駒を調べる
        let occupied = self.occupied();
        let rook_like = pieces(PieceType::Rook) | pieces(PieceType::Dragon);
        let bishop_like = pieces(PieceType::Bishop) | pieces(PieceType::Horse);
        let lance = pieces(PieceType::Lance);
        // 香は相手の前進方向にしか利かないので、玉から見て相手陣側の縦だけ
        let lance_dir = (color.forward(), 0);

        for dir in ORTHOGONAL {
            let mut sliders = rook_like;
            if dir == lance_dir {
                sliders |= lance;
            }
            if first_blocker(ksq, dir, occupied).is_some_and(|sq| sliders.contains(sq)) {
                return true;
            }
        }
        for dir in DIAGONAL {
            if first_blocker(ksq, dir, occupied).is_some_and(|sq| bishop_like.contains(sq)) {
                return true;
            }
        }

        false
    }

    /// `attackers` のいずれかが `pt` のステップで `target` に届くか
    fn stepped_from(&self, target: Square, them: Color, pt: PieceType, attackers: Bitboard) -> bool {
        step_offsets(pt).iter().any(|&off| {
            let (dr, df) = oriented(them, off);
            target.offset(-dr, -df).is_some_and(|sq| attackers.contains(sq))
        })
    }

    /// 手番側の玉が王手されているか
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_check(self.side_to_move())
    }
}

/// `from` から `dir` 方向に進んで最初に駒がある升
fn first_blocker(from: Square, dir: (i8, i8), occupied: Bitboard) -> Option<Square> {
    let mut cur = from;
    while let Some(next) = cur.offset(dir.0, dir.1) {
        if occupied.contains(next) {
            return Some(next);
        }
        cur = next;
    }
    None
}
