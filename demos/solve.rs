//! Solves a sliding-tile puzzle from the command line.
//!
//! Without arguments, solves the Quzzle (bring the big square to the top
//! right corner):
//! ```bash
//! cargo run --example solve
//! ```
//!
//! Boards are read from files in the standard text format, and the explored
//! graph can be saved for yEd or Graphviz:
//! ```bash
//! cargo run --example solve -- start.txt target.txt --piece 0 --strategy dfs --dot graph.dot
//! dot -Tsvg graph.dot -o graph.svg
//! ```

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;

use backtrack::backtrack::{Outcome, DEFAULT_MAX_VISITS};
use backtrack::board::Board;
use backtrack::dot::Dot;
use backtrack::frontier::Strategy;
use backtrack::graph::GraphMl;
use backtrack::puzzle::{boards, DedupMode, PuzzleConfig, PuzzleSolver};

const QUZZLE_START: &str = "0 0 1 1\n0 0 2 3\n. . 2 3\n4 5 5 6\n4 7 7 8\n";
const QUZZLE_TARGET: &str = "1 1 0 0\n3 2 0 0\n3 2 . .\n6 5 5 4\n8 7 7 4\n";

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Start board file.
    #[arg(value_name = "FILE", requires = "target")]
    start: Option<PathBuf>,

    /// Target board file.
    #[arg(value_name = "FILE")]
    target: Option<PathBuf>,

    /// Id of the piece that must reach its place on the target board.
    #[arg(long, value_name = "INT", default_value = "0")]
    piece: usize,

    /// Search order: bfs or dfs.
    #[arg(long, value_name = "STRATEGY", default_value = "bfs")]
    strategy: Strategy,

    /// Boards considered equal when deduplicating: full, layout or targeted.
    #[arg(long, value_name = "MODE", default_value = "full")]
    dedup: DedupMode,

    /// Maximum number of visited boards.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_MAX_VISITS)]
    max_visits: usize,

    /// Write the explored graph as GraphML (yEd).
    #[arg(long, value_name = "FILE", conflicts_with = "dot")]
    graphml: Option<PathBuf>,

    /// Write the explored graph as DOT (Graphviz).
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Print every board of the solution.
    #[arg(long)]
    show: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn read_board(path: Option<&PathBuf>, default: &str) -> color_eyre::Result<Board> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => default.to_string(),
    };
    Ok(text.parse()?)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    let start = read_board(args.start.as_ref(), QUZZLE_START)?;
    let target = read_board(args.target.as_ref(), QUZZLE_TARGET)?;
    println!("start:\n{}", start);
    println!("target (piece {}):\n{}", args.piece, target);

    let config = PuzzleConfig::new(start.clone(), target, args.piece)
        .with_strategy(args.strategy)
        .with_dedup(args.dedup)
        .with_max_visits(args.max_visits);
    let mut solver = PuzzleSolver::new(config);

    let time_solve = std::time::Instant::now();
    let outcome = if let Some(path) = &args.graphml {
        let mut sink = GraphMl::new(BufWriter::new(File::create(path)?));
        let outcome = solver.solve_with_sink(&mut sink)?;
        println!("Wrote GraphML to {}", path.display());
        outcome
    } else if let Some(path) = &args.dot {
        let mut sink = Dot::new(BufWriter::new(File::create(path)?));
        let outcome = solver.solve_with_sink(&mut sink)?;
        println!("Wrote DOT to {}", path.display());
        outcome
    } else {
        solver.solve()
    };
    let time_solve = time_solve.elapsed();

    match outcome {
        Outcome::Solved(moves) => {
            println!(
                "{} solution with {} moves in {} visits ({:.3} s)",
                args.strategy,
                moves.len(),
                solver.visits(),
                time_solve.as_secs_f64()
            );
            let moves_text: Vec<String> = moves.iter().map(ToString::to_string).collect();
            println!("moves = [{}]", moves_text.join(", "));
            if args.show {
                for (i, board) in boards(&start, &moves)?.iter().enumerate() {
                    println!("#{}:\n{}", i, board);
                }
            }
        }
        Outcome::Exhausted(reason) => {
            println!(
                "No solution: {} after {} visits ({:.3} s)",
                reason,
                solver.visits(),
                time_solve.as_secs_f64()
            );
        }
    }

    Ok(())
}
