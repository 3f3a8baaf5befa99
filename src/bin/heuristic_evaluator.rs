use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::heuristics::{is_solvable_by_parity, Heuristic};
use npuzzle_solver::solver::{solve_with_config, SolverConfig};
use npuzzle_solver::utils::init_logging;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare frontier heuristics on seeded random boards", long_about = None)]
struct Args {
    /// Number of boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    count: usize,

    /// Board dimension
    #[clap(short, long, default_value_t = 3)]
    dimension: usize,

    /// Random slides applied to the goal to build each board
    #[clap(short, long, default_value_t = 18)]
    scramble: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Per-search step budget
    #[clap(long, default_value_t = 2_000_000)]
    max_expansions: usize,

    /// Log search progress (overridden by RUST_LOG)
    #[clap(short, long)]
    verbose: bool,
}

const HEURISTICS: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::Hamming];

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut all_expansions: HashMap<Heuristic, Vec<usize>> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards ({}x{}, {} scramble slides)...",
        args.count, args.dimension, args.dimension, args.scramble
    );

    for board_idx in 0..args.count {
        let current_seed = args.seed + board_idx as u64;
        let mut rng = SmallRng::seed_from_u64(current_seed);
        let initial_board = match Board::scrambled(args.dimension, args.scramble, &mut rng) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Cannot build board: {}", e);
                return;
            }
        };

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);
        if !is_solvable_by_parity(&initial_board) {
            eprintln!("Warning: scrambled board {} fails the parity check.", board_idx);
        }

        let mut lengths = Vec::new();
        for heuristic in HEURISTICS {
            let config = SolverConfig {
                heuristic,
                max_expansions: Some(args.max_expansions),
            };
            match solve_with_config(&initial_board, &config) {
                Ok(solution) => {
                    println!(
                        "  Heuristic: {:<10}, Moves: {:<4}, Expansions: {:<8}, Generated: {}",
                        heuristic.to_string(),
                        solution.min_moves,
                        solution.stats.expansions,
                        solution.stats.generated
                    );
                    lengths.push(solution.min_moves);
                    all_expansions
                        .entry(heuristic)
                        .or_default()
                        .push(solution.stats.expansions);
                }
                Err(e) => println!("  Heuristic: {:<10}, {}", heuristic.to_string(), e),
            }
        }

        if lengths.windows(2).any(|pair| pair[0] != pair[1]) {
            eprintln!(
                "Warning: heuristics disagree on the optimal length for board {}: {:?}",
                board_idx, lengths
            );
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.count);
    println!("\n--- Average Expansions ---");

    let mut sorted_averages: Vec<(Heuristic, f64)> = Vec::new();
    for heuristic in HEURISTICS {
        match all_expansions.get(&heuristic) {
            Some(counts) if !counts.is_empty() => {
                let total: usize = counts.iter().sum();
                sorted_averages.push((heuristic, total as f64 / counts.len() as f64));
            }
            _ => println!("Heuristic {}: No searches completed.", heuristic),
        }
    }

    // Fewest expansions first
    sorted_averages.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (heuristic, average) in sorted_averages {
        println!(
            "Heuristic {:<10}: Average Expansions = {:.2}",
            heuristic.to_string(),
            average
        );
    }
}
