use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve_with_config, SolverConfig};
use npuzzle_solver::utils::{board_from_str, init_logging};
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Heuristic used to order the search frontier
    #[clap(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Give up after this many search steps
    #[clap(short, long)]
    max_expansions: Option<usize>,

    /// Print every board of the solution, not just the moves
    #[clap(short, long)]
    boards: bool,

    /// Log search progress (overridden by RUST_LOG)
    #[clap(short, long)]
    verbose: bool,

    /// Path to the board file (dimension on the first line, then one row per line)
    board_file: PathBuf,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file: {}", e))?;

    board_from_str(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let board = match read_board_file(&args.board_file) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Failed to read board from {}: {}", args.board_file.display(), e);
            process::exit(2);
        }
    };
    println!("Loaded board from {}\n", args.board_file.display());
    println!("Initial board state:\n{}\n", board);
    println!("Searching with the {} heuristic...\n", args.heuristic);

    let config = SolverConfig {
        heuristic: args.heuristic,
        max_expansions: args.max_expansions,
    };
    let started = Instant::now();
    let solution = match solve_with_config(&board, &config) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            process::exit(1);
        }
    };
    let elapsed = started.elapsed();

    if !solution.solvable {
        println!("No solution possible.");
    } else {
        println!("Minimum number of moves = {}", solution.min_moves);
        let moves: String = solution.directions().iter().map(|d| d.to_char()).collect();
        if moves.is_empty() {
            println!("  No moves needed.");
        } else {
            println!("Moves (blank direction): {}", moves);
        }
        if args.boards {
            for (i, step) in solution.boards.iter().enumerate() {
                println!("\nStep {}:\n{}", i, step);
            }
        }
    }
    println!(
        "\nExpanded {} nodes per side, generated {} in total, in {:.3?}.",
        solution.stats.expansions, solution.stats.generated, elapsed
    );
}
