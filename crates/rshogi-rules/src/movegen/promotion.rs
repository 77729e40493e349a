//! 成りの判定

use crate::types::{Color, PieceType, Square};

/// 成りの可否
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promotion {
    /// 成れない
    Never,
    /// 成る・成らないを選べる
    Optional,
    /// 必ず成る（成らないと次に動けない）
    Forced,
}

impl Promotion {
    /// 生成すべき成りフラグの候補
    pub const fn choices(self) -> &'static [bool] {
        match self {
            Promotion::Never => &[false],
            Promotion::Optional => &[true, false],
            Promotion::Forced => &[true],
        }
    }
}

/// 敵陣（相手側の3段）か
#[inline]
const fn in_enemy_camp(color: Color, sq: Square) -> bool {
    sq.relative_rank(color) <= 2
}

/// `color` の `pt` が `from` から `to` へ動くときの成りの可否
///
/// - 歩・香: 最奥段は強制、敵陣は任意、それ以外は不可
/// - 桂: 奥の2段は強制、それ以外は不可
/// - 銀・角・飛: 移動元か移動先が敵陣なら任意
/// - 金・玉・成駒: 不可
pub const fn promotion_policy(color: Color, pt: PieceType, from: Square, to: Square) -> Promotion {
    if !pt.can_promote() {
        return Promotion::Never;
    }
    let to_rank = to.relative_rank(color);
    match pt {
        PieceType::Pawn | PieceType::Lance => {
            if to_rank == 0 {
                Promotion::Forced
            } else if to_rank <= 2 {
                Promotion::Optional
            } else {
                Promotion::Never
            }
        }
        PieceType::Knight => {
            if to_rank <= 1 {
                Promotion::Forced
            } else {
                Promotion::Never
            }
        }
        PieceType::Silver | PieceType::Bishop | PieceType::Rook => {
            if in_enemy_camp(color, from) || in_enemy_camp(color, to) {
                Promotion::Optional
            } else {
                Promotion::Never
            }
        }
        _ => Promotion::Never,
    }
}
