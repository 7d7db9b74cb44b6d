//! Self-play driver: the engine plays both sides from a starting position.

use clap::Parser;
use minimax_chess::board::START_FEN;
use minimax_chess::search::{MiniMax, MoveStrategy, SearchParams};
use minimax_chess::{BoardResult, Position};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting position
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    /// Search depth in plies
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Stop after this many plies
    #[arg(short, long, default_value_t = 20)]
    plies: u32,

    /// Log every root move with its value
    #[arg(long)]
    log_moves: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "minimax_chess=info".into()),
        )
        .init();
    minimax_chess::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("self-play failed: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> BoardResult<()> {
    let mut position = Position::from_fen(&args.fen)?;
    let mut strategy =
        MiniMax::new(SearchParams::new().depth(args.depth).log_moves(args.log_moves));

    println!("{position}");
    for ply in 1..=args.plies {
        let player = position.current_player();
        if player.is_in_checkmate()? {
            println!("{} is checkmated", player);
            return Ok(());
        }
        if player.is_in_stalemate()? {
            println!("{} is stalemated", player);
            return Ok(());
        }

        let mv = strategy.execute(&position)?;
        if mv.is_null() {
            warn!("{} found no move", player);
            return Ok(());
        }
        let transition = player.make_move(&mv)?;
        println!("{ply}. {} plays {mv}", player);
        info!(stats = %strategy.stats(), "ply {ply}");
        let next = transition.into_position();
        println!("{next}");
        position = next;
    }
    Ok(())
}
