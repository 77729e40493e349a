//! 利き計算
//!
//! 駒の動きは「ステップ（固定オフセット）」と「スライド（方向に沿って進む）」の組で表す。
//! オフセットは先手から見た (段, 筋) の差分で定義し、後手は段方向を反転して使う。
//!
//! - ステップ: 盤外と自駒のある升を除く
//! - スライド: 自駒の手前で止まる、敵駒の升は含めて止まる
//!
//! 利きは王手放置の判定を含まない。

use crate::bitboard::Bitboard;
use crate::position::Position;
use crate::types::{Color, Piece, PieceType, Square};

/// (段, 筋) の差分。先手の前方は段 -1
pub type Offset = (i8, i8);

pub(crate) const ORTHOGONAL: [Offset; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const DIAGONAL: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const PAWN_STEPS: [Offset; 1] = [(-1, 0)];
const KNIGHT_STEPS: [Offset; 2] = [(-2, -1), (-2, 1)];
const SILVER_STEPS: [Offset; 5] = [(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)];
const GOLD_STEPS: [Offset; 6] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)];
const KING_STEPS: [Offset; 8] =
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
const LANCE_RAYS: [Offset; 1] = [(-1, 0)];

/// 駒種のステップ方向（先手視点）
pub fn step_offsets(pt: PieceType) -> &'static [Offset] {
    match pt {
        PieceType::Pawn => &PAWN_STEPS,
        PieceType::Knight => &KNIGHT_STEPS,
        PieceType::Silver => &SILVER_STEPS,
        PieceType::Gold
        | PieceType::ProPawn
        | PieceType::ProLance
        | PieceType::ProKnight
        | PieceType::ProSilver => &GOLD_STEPS,
        PieceType::King => &KING_STEPS,
        PieceType::Horse => &ORTHOGONAL,
        PieceType::Dragon => &DIAGONAL,
        PieceType::Lance | PieceType::Bishop | PieceType::Rook => &[],
    }
}

/// 駒種のスライド方向（先手視点）
pub fn slide_directions(pt: PieceType) -> &'static [Offset] {
    match pt {
        PieceType::Lance => &LANCE_RAYS,
        PieceType::Bishop | PieceType::Horse => &DIAGONAL,
        PieceType::Rook | PieceType::Dragon => &ORTHOGONAL,
        _ => &[],
    }
}

/// 手番の向きに合わせたオフセット
#[inline]
pub const fn oriented(color: Color, (dr, df): Offset) -> Offset {
    match color {
        Color::Black => (dr, df),
        Color::White => (-dr, df),
    }
}

/// `from` から `dir` 方向に、最初の駒（含む）または盤端まで進んだ升
pub fn ray(from: Square, dir: Offset, occupied: Bitboard) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    let mut cur = from;
    while let Some(next) = cur.offset(dir.0, dir.1) {
        bb.set(next);
        if occupied.contains(next) {
            break;
        }
        cur = next;
    }
    bb
}

impl Position {
    /// `sq` に `pc` があるとしたときの利き（自駒のある升を除く）
    ///
    /// 実際に `sq` に `pc` がなくてもよい。局面は変更しない。
    pub fn attacks_from(&self, pc: Piece, sq: Square) -> Bitboard {
        if pc.is_none() {
            return Bitboard::EMPTY;
        }
        let color = pc.color();
        let pt = pc.piece_type();
        let occupied = self.occupied();

        let mut bb = Bitboard::EMPTY;
        for &off in step_offsets(pt) {
            let (dr, df) = oriented(color, off);
            if let Some(to) = sq.offset(dr, df) {
                bb.set(to);
            }
        }
        for &dir in slide_directions(pt) {
            bb |= ray(sq, oriented(color, dir), occupied);
        }
        bb & !self.pieces_of(color)
    }

    /// `by` 側のいずれかの駒が `sq` に利いているか（全駒の利きを走査する）
    ///
    /// 王手判定の照合用。通常は `is_check` を使う。
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        Piece::all_of(by).any(|pc| {
            self.pieces(pc).iter().any(|from| self.attacks_from(pc, from).contains(sq))
        })
    }
}
