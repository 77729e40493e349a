/// Perft（合法手木の葉の数）を表示する
///
/// 使い方:
///   perft --depth 3
///   perft --depth 2 --divide --sfen "<sfen>"
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;

use rshogi_rules::{perft, perft_divide};
use tools::common::{init_logger, load_position};

#[derive(Parser)]
#[command(about = "Perft")]
struct Cli {
    /// 局面（SFEN、省略時は平手）
    #[arg(long)]
    sfen: Option<String>,

    /// 深さ
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// 初手ごとの内訳を表示
    #[arg(long)]
    divide: bool,

    /// JSON出力モード
    #[arg(long)]
    json: bool,

    /// デバッグログを有効化
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug);

    if cli.depth == 0 {
        bail!("--depth must be >= 1");
    }
    let mut pos = load_position(cli.sfen.as_deref())?;

    let start = Instant::now();
    if cli.divide {
        let divide = perft_divide(&mut pos, cli.depth);
        let total: u64 = divide.iter().map(|(_, n)| n).sum();
        if cli.json {
            let entries: serde_json::Map<String, serde_json::Value> =
                divide.into_iter().map(|(mv, n)| (mv, n.into())).collect();
            println!("{}", serde_json::json!({ "depth": cli.depth, "nodes": total, "divide": entries }));
        } else {
            for (mv, n) in &divide {
                println!("{mv}: {n}");
            }
            println!("total: {total}");
        }
        return Ok(());
    }

    for depth in 1..=cli.depth {
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();
        if cli.json {
            println!("{}", serde_json::json!({ "depth": depth, "nodes": nodes }));
        } else {
            println!("depth {depth}: {nodes} ({:.3}s)", elapsed.as_secs_f64());
        }
    }
    Ok(())
}
