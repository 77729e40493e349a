//! 駒（Piece）
//!
//! 内部表現は 5bit のラッパー。
//! - bit 0-3: `PieceType`（1..=14）。0 は `Piece::NONE` のみで使用される。
//! - bit 4: `Color`（0 = Black, 1 = White）。
//!
//! 先後 × 14 駒種 = 28 種類の駒があり、`Position` はこの 28 種類それぞれに
//! Bitboard を 1 枚ずつ持つ（`kind_index()` で 0..28 に詰めて引く）。

use super::{Color, PieceType};

/// 駒（先後の区別あり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 駒なし
    pub const NONE: Piece = Piece(0);

    // 先手の駒
    pub const B_PAWN: Piece = Piece::new(Color::Black, PieceType::Pawn);
    pub const B_LANCE: Piece = Piece::new(Color::Black, PieceType::Lance);
    pub const B_KNIGHT: Piece = Piece::new(Color::Black, PieceType::Knight);
    pub const B_SILVER: Piece = Piece::new(Color::Black, PieceType::Silver);
    pub const B_GOLD: Piece = Piece::new(Color::Black, PieceType::Gold);
    pub const B_BISHOP: Piece = Piece::new(Color::Black, PieceType::Bishop);
    pub const B_ROOK: Piece = Piece::new(Color::Black, PieceType::Rook);
    pub const B_KING: Piece = Piece::new(Color::Black, PieceType::King);
    pub const B_PRO_PAWN: Piece = Piece::new(Color::Black, PieceType::ProPawn);
    pub const B_HORSE: Piece = Piece::new(Color::Black, PieceType::Horse);
    pub const B_DRAGON: Piece = Piece::new(Color::Black, PieceType::Dragon);

    // 後手の駒
    pub const W_PAWN: Piece = Piece::new(Color::White, PieceType::Pawn);
    pub const W_LANCE: Piece = Piece::new(Color::White, PieceType::Lance);
    pub const W_KNIGHT: Piece = Piece::new(Color::White, PieceType::Knight);
    pub const W_SILVER: Piece = Piece::new(Color::White, PieceType::Silver);
    pub const W_GOLD: Piece = Piece::new(Color::White, PieceType::Gold);
    pub const W_BISHOP: Piece = Piece::new(Color::White, PieceType::Bishop);
    pub const W_ROOK: Piece = Piece::new(Color::White, PieceType::Rook);
    pub const W_KING: Piece = Piece::new(Color::White, PieceType::King);
    pub const W_PRO_PAWN: Piece = Piece::new(Color::White, PieceType::ProPawn);
    pub const W_HORSE: Piece = Piece::new(Color::White, PieceType::Horse);
    pub const W_DRAGON: Piece = Piece::new(Color::White, PieceType::Dragon);

    /// 駒の種類数（NONEを含まない）
    pub const KIND_NUM: usize = Color::NUM * PieceType::NUM;

    /// ColorとPieceTypeから生成
    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece(piece_type as u8 | ((color as u8) << 4))
    }

    /// `kind_index()` の逆変換
    #[inline]
    pub const fn from_kind_index(index: usize) -> Option<Piece> {
        if index >= Self::KIND_NUM {
            return None;
        }
        let color = if index < PieceType::NUM { Color::Black } else { Color::White };
        Some(Piece::new(color, PieceType::ALL[index % PieceType::NUM]))
    }

    /// 全28種類を kind_index 順に列挙
    pub fn all() -> impl Iterator<Item = Piece> {
        (0..Self::KIND_NUM).filter_map(Piece::from_kind_index)
    }

    /// 指定手番の14種類を列挙
    pub fn all_of(color: Color) -> impl Iterator<Item = Piece> {
        PieceType::ALL.into_iter().map(move |pt| Piece::new(color, pt))
    }

    /// 駒種を取得
    ///
    /// `Piece::NONE` に対して呼び出してはならない。
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        debug_assert!(self.is_some());
        PieceType::ALL[((self.0 & 0x0F) as usize).saturating_sub(1)]
    }

    /// 手番を取得
    #[inline]
    pub const fn color(self) -> Color {
        if (self.0 >> 4) & 1 == 0 { Color::Black } else { Color::White }
    }

    /// 駒がないか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 駒があるか
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// 成り駒を返す（成れない場合はNone）
    #[inline]
    pub const fn promote(self) -> Option<Piece> {
        match self.piece_type().promote() {
            Some(pt) => Some(Piece::new(self.color(), pt)),
            None => None,
        }
    }

    /// 生駒を返す
    #[inline]
    pub const fn unpromote(self) -> Piece {
        Piece::new(self.color(), self.piece_type().unpromote())
    }

    /// 28種類の中での詰めたインデックス（0-27、先手0-13・後手14-27）
    #[inline]
    pub const fn kind_index(self) -> usize {
        self.color().index() * PieceType::NUM + self.piece_type().index()
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 内部値から生成（無効な値はNONE）
    #[inline]
    pub const fn from_raw(raw: u8) -> Piece {
        let pt = raw & 0x0F;
        if pt == 0 || pt as usize > PieceType::NUM || raw >> 5 != 0 {
            Piece::NONE
        } else {
            Piece(raw)
        }
    }

    /// SFEN表記（例: "P", "+b"）
    pub fn to_sfen(self) -> String {
        if self.is_none() {
            return String::new();
        }
        let pt = self.piece_type();
        let c = match self.color() {
            Color::Black => pt.base_char(),
            Color::White => pt.base_char().to_ascii_lowercase(),
        };
        if pt.is_promoted() { format!("+{c}") } else { c.to_string() }
    }
}
