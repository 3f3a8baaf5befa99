use clap::Parser;
use npuzzle_solver::engine::{Board, Direction, Game};
use npuzzle_solver::solver::{solve_with_config, SolverConfig};
use npuzzle_solver::utils::init_logging;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the sliding puzzle in the terminal", long_about = None)]
struct Args {
    /// Board dimension
    #[clap(short, long, default_value_t = 3)]
    dimension: usize,

    /// Random slides applied to the goal
    #[clap(short, long, default_value_t = 30)]
    scramble: usize,

    /// Seed for the scramble
    #[clap(long, default_value_t = 514514)]
    seed: u64,

    /// Log search progress for hints (overridden by RUST_LOG)
    #[clap(short, long)]
    verbose: bool,
}

// Hints come from a bounded search so a large board cannot hang the prompt.
const HINT_BUDGET: usize = 200_000;

fn hint(board: &Board) -> String {
    let config = SolverConfig {
        max_expansions: Some(HINT_BUDGET),
        ..SolverConfig::default()
    };
    match solve_with_config(board, &config) {
        Ok(solution) => match solution.directions().first() {
            Some(direction) => format!(
                "Move the blank {} ({} moves left on the best path).",
                direction, solution.min_moves
            ),
            None => "Already solved.".to_string(),
        },
        Err(e) => format!("No hint available: {}", e),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let board = match Board::scrambled(args.dimension, args.scramble, &mut rng) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Cannot start game: {}", e);
            return;
        }
    };
    let mut game = Game::new_with_board(board);
    println!("Welcome to the sliding puzzle!");

    loop {
        println!("---------------------");
        println!("Moves: {}", game.moves());
        println!("{}", game.board());

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total Moves: {}", game.moves());
            println!("---------------------");
            break;
        }

        print!("Move the blank (u/d/l/r), 'z' to undo, 'h' for a hint, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let trimmed_input = input.trim();
        match trimmed_input {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "z" => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (already at the initial board).");
                }
            }
            "h" => println!("{}", hint(game.board())),
            _ => {
                let mut chars = trimmed_input.chars();
                match (chars.next().and_then(Direction::from_char), chars.next()) {
                    (Some(direction), None) => {
                        if game.process_move(direction) {
                            println!("Moved {}.", direction);
                        } else {
                            println!("Invalid move: the blank cannot move {}.", direction);
                        }
                    }
                    _ => println!("Invalid input. Use u/d/l/r, 'z', 'h' or 'q'."),
                }
            }
        }
    }
}
