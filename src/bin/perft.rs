use clap::Parser;
use minimax_chess::board::START_FEN;
use minimax_chess::search::{divide, perft};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 3)]
    depth: u32,

    /// Print the per-move breakdown
    #[arg(long)]
    divide: bool,
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
        eprintln!("perft failed: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let position = minimax_chess::Position::from_fen(&args.fen)?;
    let start = std::time::Instant::now();
    let nodes = perft(&position, args.depth)?;
    let duration = start.elapsed();
    println!(
        "minimax-chess perft({}) = {} nodes ({} ms)",
        args.depth,
        nodes,
        duration.as_millis()
    );

    if args.divide {
        for (mv, count) in divide(&position, args.depth)? {
            println!("{mv}: {count}");
        }
    }

    let fen: Fen = args.fen.parse()?;
    let pos: Chess = fen.into_position(CastlingMode::Standard)?;
    let start = std::time::Instant::now();
    let reference = perft_shakmaty(&pos, args.depth);
    let duration = start.elapsed();
    println!(
        "Shakmaty perft({}) = {} nodes ({} ms)",
        args.depth,
        reference,
        duration.as_millis()
    );
    if reference != nodes {
        println!("MISMATCH: {} vs {}", nodes, reference);
    }
    Ok(())
}

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
