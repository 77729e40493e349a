//! 局面（Position）
//!
//! - `pos`: 駒種ごとのBitboard・手駒・手番・手数
//! - `do_move`: 指し手の実行と巻き戻し、仮適用ガード
//! - `state`: 巻き戻し用の履歴レコード
//! - `sfen`: SFEN形式の解析・出力
//! - `json` / `display`: 外部向けの表示

mod display;
mod do_move;
mod json;
mod pos;
mod sfen;
mod state;

pub use do_move::Speculation;
pub use json::{BoardStateJson, CellJson, HandJson, HandsJson, PieceJson};
pub use pos::Position;
pub use sfen::{SFEN_HIRATE, SfenError};
pub use state::UndoInfo;
