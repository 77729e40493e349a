//! 将棋のルールコア
//!
//! 盤面表現・利き計算・王手判定・指し手の実行/巻き戻し・合法手生成を提供する。
//!
//! # モジュールの依存関係
//!
//! ```text
//! types ← bitboard
//!   ↓
//! position（局面・手駒・履歴・SFEN）
//!   ↓
//! attack（利き）→ check（王手判定）
//!   ↓
//! movegen（合法手生成）→ usi / perft
//! ```
//!
//! 局面の変更は `Position::do_move` / `Position::undo_move` のみを通じて行い、
//! 合法性の判定は `Position::legal_moves` を通じて行う。

pub mod attack;
pub mod bitboard;
pub mod check;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod position;
pub mod types;
pub mod usi;

pub use bitboard::Bitboard;
pub use error::RulesError;
pub use movegen::{Promotion, promotion_policy};
pub use perft::{perft, perft_divide};
pub use position::{BoardStateJson, Position, SFEN_HIRATE, SfenError, Speculation, UndoInfo};
pub use types::{Color, Hand, Move, Piece, PieceType, Square};
pub use usi::{UsiMoveError, move_to_usi};
