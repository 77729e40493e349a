//! 履歴レコード

use crate::types::{Move, Piece};

/// 適用済みの指し手1つ分の巻き戻し情報
///
/// 駒打ちでは `moved == placed`、`captured == Piece::NONE`。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoInfo {
    /// 適用した指し手
    pub mv: Move,
    /// 移動元にあった駒（駒打ちなら打った駒）
    pub moved: Piece,
    /// 取った駒（成り駒のまま記録）
    pub captured: Piece,
    /// 移動先に置いた駒（成った場合は成駒）
    pub placed: Piece,
}
