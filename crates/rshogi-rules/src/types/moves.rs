//! 指し手（Move）

use std::fmt;

use super::{Color, Piece, PieceType, Square};

/// 指し手（32bit）
///
/// 下位16bit:
/// - bit 0-6:  移動先 (to)
/// - bit 7-13: 移動元 (from) / 駒打ちの場合はPieceType
/// - bit 14:   駒打ちフラグ
/// - bit 15:   成りフラグ
///
/// 上位16bit:
/// - bit 16-23: 動かす駒（盤上の移動なら移動前の駒、駒打ちなら打つ駒）
/// - bit 24-31: 予約
///
/// 一度生成した指し手は不変。取った駒と移動後の駒は `do_move` 時に
/// `UndoInfo` として履歴に記録される。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Move(u32);

impl Move {
    const TO_MASK: u32 = 0x007F; // bit 0-6
    const FROM_MASK: u32 = 0x3F80; // bit 7-13
    const FROM_SHIFT: u32 = 7;
    const DROP_FLAG: u32 = 0x4000; // bit 14
    const PROMOTE_FLAG: u32 = 0x8000; // bit 15
    const PIECE_SHIFT: u32 = 16;

    /// 盤上の駒の移動
    ///
    /// `piece`: 移動元にある（移動前の）駒
    #[inline]
    pub const fn new_move(from: Square, to: Square, piece: Piece, promote: bool) -> Move {
        let mut m = (to.raw() as u32) | ((from.raw() as u32) << Self::FROM_SHIFT);
        if promote {
            m |= Self::PROMOTE_FLAG;
        }
        Move(m | ((piece.raw() as u32) << Self::PIECE_SHIFT))
    }

    /// 駒打ち
    #[inline]
    pub const fn new_drop(color: Color, piece_type: PieceType, to: Square) -> Move {
        let piece = Piece::new(color, piece_type);
        Move(
            (to.raw() as u32)
                | ((piece_type as u32) << Self::FROM_SHIFT)
                | Self::DROP_FLAG
                | ((piece.raw() as u32) << Self::PIECE_SHIFT),
        )
    }

    /// 移動先
    #[inline]
    pub const fn to(self) -> Square {
        match Square::from_index((self.0 & Self::TO_MASK) as usize) {
            Some(sq) => sq,
            None => panic!("Move holds an out-of-range destination"),
        }
    }

    /// 移動元（駒打ちはNone）
    #[inline]
    pub const fn from(self) -> Option<Square> {
        if self.is_drop() {
            None
        } else {
            Square::from_index(((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as usize)
        }
    }

    /// 動かす駒（移動前）または打つ駒
    #[inline]
    pub const fn piece(self) -> Piece {
        Piece::from_raw((self.0 >> Self::PIECE_SHIFT) as u8)
    }

    /// 動かす駒の駒種（駒打ちなら打つ駒種）
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        self.piece().piece_type()
    }

    /// 駒打ちかどうか
    #[inline]
    pub const fn is_drop(self) -> bool {
        (self.0 & Self::DROP_FLAG) != 0
    }

    /// 成りフラグが立っているか
    #[inline]
    pub const fn is_promote(self) -> bool {
        (self.0 & Self::PROMOTE_FLAG) != 0
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::usi::move_to_usi(*self))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", crate::usi::move_to_usi(*self), self.piece().to_sfen())
    }
}
