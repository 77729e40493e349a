//! ルールコアのエラー型
//!
//! いずれも呼び出し側の契約違反を表す。合法手生成器が生成した手を
//! `do_move` に渡す限り発生しない。

use crate::types::{Color, PieceType, Square};

/// 局面操作のエラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// 駒なし（`Piece::NONE`）を盤に置こうとした、または取り除こうとした
    #[error("Unknown piece kind")]
    UnknownPiece,

    /// 持ち駒が足りない
    #[error("Insufficient hand pieces: {color:?} has no {piece_type:?}")]
    InsufficientHand { color: Color, piece_type: PieceType },

    /// 移動元に駒がない
    #[error("No piece on origin square {0}")]
    EmptyOrigin(Square),

    /// 打つ先が埋まっている、または移動先に自駒がある
    #[error("Square {0} is occupied")]
    SquareOccupied(Square),

    /// 手番でない側の駒を打とうとした
    #[error("Drop by {0:?}, who is not to move")]
    NotSideToMove(Color),

    /// 巻き戻す手がない
    #[error("No move to undo")]
    EmptyHistory,

    /// 駒を取ると持ち駒の上限を超える
    #[error("Hand overflow: {color:?} cannot hold another {piece_type:?}")]
    HandOverflow { color: Color, piece_type: PieceType },
}
