/// 乱数で合法手を指し進め、巻き戻して元の局面に戻ることを確かめる
///
/// 使い方:
///   random_walk --plies 200 --seed 42
///   random_walk --sfen "<sfen>" --plies 50 --json
use anyhow::{Result, bail};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;

use tools::common::{init_logger, load_position};

#[derive(Parser)]
#[command(about = "ランダムウォークによる do_move / undo_move の検証")]
struct Cli {
    /// 開始局面（SFEN、省略時は平手）
    #[arg(long)]
    sfen: Option<String>,

    /// 指し進める手数の上限
    #[arg(long, default_value_t = 200)]
    plies: usize,

    /// 乱数シード
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON出力モード
    #[arg(long)]
    json: bool,

    /// デバッグログを有効化
    #[arg(long)]
    debug: bool,
}

#[derive(Serialize)]
struct WalkResult {
    seed: u64,
    played: Vec<String>,
    final_sfen: String,
    ended_by_mate: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let mut pos = load_position(cli.sfen.as_deref())?;
    let start = pos.clone();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(cli.seed);
    let mut played = Vec::with_capacity(cli.plies);
    let mut ended_by_mate = false;

    for ply in 0..cli.plies {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            log::info!("no legal moves after {ply} plies");
            ended_by_mate = true;
            break;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        log::debug!("ply {}: {mv}", pos.game_ply());
        pos.do_move(mv)?;
        if pos.is_check(!pos.side_to_move()) {
            bail!("{mv} left the mover in check: {}", pos.to_sfen());
        }
        played.push(mv.to_string());
    }

    let final_sfen = pos.to_sfen();
    while !pos.history().is_empty() {
        pos.undo_move()?;
    }
    if pos != start {
        bail!("undo did not restore the start position: {}", pos.to_sfen());
    }
    log::info!("played {} plies and restored the start position", played.len());

    let result = WalkResult {
        seed: cli.seed,
        played,
        final_sfen,
        ended_by_mate,
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("seed: {}", result.seed);
        println!("moves: {}", result.played.join(" "));
        println!("final: {}", result.final_sfen);
        if result.ended_by_mate {
            println!("ended: no legal moves");
        }
    }
    Ok(())
}
