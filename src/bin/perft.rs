use clap::Parser;
use scacchiera::{perft, Game};
use shakmaty::{Chess, Position};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3)]
    depth: u8,

    /// Also count with shakmaty; the two agree while no check or castling can arise (depth <= 3)
    #[arg(short, long, default_value_t = false)]
    compare: bool,
}

fn main() {
    let args = Args::parse();

    println!("Running perft from the start position at depth {}", args.depth);

    let game = Game::new();
    let start = std::time::Instant::now();
    let nodes = perft(&game, args.depth);
    let duration = start.elapsed();
    println!(
        "Scacchiera perft({}) = {} nodes ({} ms)",
        args.depth,
        nodes,
        duration.as_millis()
    );

    if args.compare {
        let expected = perft_shakmaty(&Chess::default(), args.depth);
        println!("Shakmaty perft({}) = {} nodes", args.depth, expected);
        if expected != nodes {
            println!("info string counts differ; this rule set has no check filtering");
        }
    }
}

fn perft_shakmaty(pos: &Chess, depth: u8) -> u64 {
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
