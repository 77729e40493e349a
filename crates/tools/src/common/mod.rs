//! バイナリ共通の初期化処理

use std::io::Write;

use anyhow::{Context, Result};
use rshogi_rules::Position;

/// ロガーを初期化する
///
/// `RUST_LOG` が未設定なら `info`（`debug` が真なら `debug`）。色付けはしない。
pub fn init_logger(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();
}

/// SFENから局面を作る（未指定なら平手）
pub fn load_position(sfen: Option<&str>) -> Result<Position> {
    match sfen {
        None => Ok(Position::startpos()),
        Some(s) => Position::from_sfen(s).with_context(|| format!("failed to parse SFEN: {s}")),
    }
}
