//! ルールコアを手元で確かめるためのコマンドラインツール群
//!
//! - `legal_moves`: 局面の合法手を列挙
//! - `random_walk`: 乱数で指し進めて巻き戻しの整合を確認
//! - `perft`: 合法手木の葉を数える

pub mod common;
