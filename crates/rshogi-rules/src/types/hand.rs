//! 手駒（Hand）

use super::PieceType;

/// 手駒（32bit packed）
///
/// ビット配置:
/// - bit 0-4:   歩 (5bit)
/// - bit 5-7:   香 (3bit)
/// - bit 8-10:  桂 (3bit)
/// - bit 11-13: 銀 (3bit)
/// - bit 14-16: 金 (3bit)
/// - bit 17-18: 角 (2bit)
/// - bit 19-20: 飛 (2bit)
///
/// 各フィールドは実戦で取りうる最大枚数（歩18・小駒4・大駒2）を収められる。
/// 枚数は決して負にならず、減算は `checked_sub` で不足を検出する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Hand(u32);

impl Hand {
    /// 空の手駒
    pub const EMPTY: Hand = Hand(0);

    // ビットシフト・マスク定数
    const PAWN_SHIFT: u32 = 0;
    const PAWN_MASK: u32 = 0x1F;
    const LANCE_SHIFT: u32 = 5;
    const LANCE_MASK: u32 = 0x07;
    const KNIGHT_SHIFT: u32 = 8;
    const KNIGHT_MASK: u32 = 0x07;
    const SILVER_SHIFT: u32 = 11;
    const SILVER_MASK: u32 = 0x07;
    const GOLD_SHIFT: u32 = 14;
    const GOLD_MASK: u32 = 0x07;
    const BISHOP_SHIFT: u32 = 17;
    const BISHOP_MASK: u32 = 0x03;
    const ROOK_SHIFT: u32 = 19;
    const ROOK_MASK: u32 = 0x03;

    /// 指定駒種の枚数を取得（手駒にならない駒種は常に0）
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        let (shift, mask) = Self::shift_mask(pt);
        (self.0 >> shift) & mask
    }

    /// 指定駒種を持っているか
    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    /// 指定駒種で保持できる最大枚数
    #[inline]
    pub const fn max_count(pt: PieceType) -> u32 {
        Self::shift_mask(pt).1
    }

    /// 1枚追加（上限を超える、または手駒にならない駒種ならNone）
    #[inline]
    pub const fn checked_add(self, pt: PieceType) -> Option<Hand> {
        let (shift, mask) = Self::shift_mask(pt);
        if mask == 0 || (self.0 >> shift) & mask == mask {
            return None;
        }
        Some(Hand(self.0 + (1 << shift)))
    }

    /// 1枚減らす（持っていなければNone）
    #[inline]
    pub const fn checked_sub(self, pt: PieceType) -> Option<Hand> {
        if !self.has(pt) {
            return None;
        }
        let (shift, _) = Self::shift_mask(pt);
        Some(Hand(self.0 - (1 << shift)))
    }

    /// 指定枚数をセット（上限を超える分は切り捨てられる）
    #[inline]
    pub const fn set(self, pt: PieceType, count: u32) -> Hand {
        let (shift, mask) = Self::shift_mask(pt);
        Hand((self.0 & !(mask << shift)) | ((count & mask) << shift))
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 枚数が1以上の駒種と枚数を列挙（歩→飛の順）
    pub fn iter(self) -> impl Iterator<Item = (PieceType, u32)> {
        PieceType::HAND_PIECES
            .into_iter()
            .map(move |pt| (pt, self.count(pt)))
            .filter(|&(_, n)| n > 0)
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    const fn shift_mask(pt: PieceType) -> (u32, u32) {
        match pt {
            PieceType::Pawn => (Self::PAWN_SHIFT, Self::PAWN_MASK),
            PieceType::Lance => (Self::LANCE_SHIFT, Self::LANCE_MASK),
            PieceType::Knight => (Self::KNIGHT_SHIFT, Self::KNIGHT_MASK),
            PieceType::Silver => (Self::SILVER_SHIFT, Self::SILVER_MASK),
            PieceType::Gold => (Self::GOLD_SHIFT, Self::GOLD_MASK),
            PieceType::Bishop => (Self::BISHOP_SHIFT, Self::BISHOP_MASK),
            PieceType::Rook => (Self::ROOK_SHIFT, Self::ROOK_MASK),
            _ => (0, 0), // King, 成駒は手駒にならない
        }
    }
}
