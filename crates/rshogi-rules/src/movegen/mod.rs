//! 合法手生成
//!
//! - `promotion`: 駒種ごとの成りの可否（強制・任意・不可）
//! - `generator`: 盤上の移動と駒打ちの合法手、詰み判定
//!
//! 擬似合法手を仮適用し、自玉に王手がかかっていないものだけを残す。
//! 駒打ちは二歩・行き所のない段・打ち歩詰めも除く。

mod generator;
mod promotion;

pub use promotion::{Promotion, promotion_policy};
