/// 局面の合法手を列挙する
///
/// 使い方:
///   legal_moves
///   legal_moves --sfen "9/9/9/9/9/9/4k4/3p1p3/4K4 w p 1"
///   legal_moves --json
///   legal_moves --from 7g
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use rshogi_rules::{BoardStateJson, Square};
use tools::common::{init_logger, load_position};

#[derive(Parser)]
#[command(about = "局面の合法手を列挙")]
struct Cli {
    /// 局面（SFEN、省略時は平手）
    #[arg(long)]
    sfen: Option<String>,

    /// 指定升の駒の移動先だけを表示（例: 7g）
    #[arg(long)]
    from: Option<String>,

    /// JSON出力モード
    #[arg(long)]
    json: bool,

    /// デバッグログを有効化
    #[arg(long)]
    debug: bool,
}

#[derive(Serialize)]
struct Report {
    sfen: String,
    in_check: bool,
    checkmate: bool,
    moves: Vec<String>,
    board: BoardStateJson,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let mut pos = load_position(cli.sfen.as_deref())?;

    if let Some(from) = cli.from.as_deref() {
        let sq: Square = from.parse().with_context(|| format!("invalid square: {from}"))?;
        let targets: Vec<String> = pos.movable_squares(sq).iter().map(|t| t.to_string()).collect();
        if cli.json {
            println!("{}", serde_json::to_string(&targets)?);
        } else {
            println!("{}", targets.join(" "));
        }
        return Ok(());
    }

    let moves = pos.legal_usi_moves();
    log::debug!("{} legal moves", moves.len());

    if cli.json {
        let report = Report {
            sfen: pos.to_sfen(),
            in_check: pos.in_check(),
            checkmate: moves.is_empty(),
            moves,
            board: pos.to_json_state(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{pos}");
        println!("in check: {}", pos.in_check());
        println!("{} moves: {}", moves.len(), moves.join(" "));
    }
    Ok(())
}
