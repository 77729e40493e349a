//! ビットボードモジュール
//!
//! 81マスの盤面を `u128` の下位81bitで表現する。bit i が升 i に対応する。
//!
//! - `Bitboard`: 盤面集合とビット演算
//! - `BitboardIter`: 立っている升を昇順に列挙
//! - 筋・段ごとのマスク（`file_bb`, `rank_bb`）

mod core;

pub use core::{Bitboard, BitboardIter, file_bb, rank_bb};
