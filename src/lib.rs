//! # N-Puzzle Solver Library
//!
//! This library models the N×N sliding-tile puzzle and solves it with a
//! bidirectional best-first (A*) search. It decides solvability by racing the
//! board against its "twin" (the same board with two tiles exchanged) rather
//! than by computing permutation parity.
//!
//! It is used by three binaries:
//! - `ai_solver`: reads a board file and prints a shortest solution, or
//!   reports that the board is unsolvable.
//! - `human_player`: play a scrambled board interactively, with undo and
//!   solver hints.
//! - `heuristic_evaluator`: compares the search effort of the available
//!   heuristics on seeded random boards.
//!
//! ## Modules
//! - `engine`: the board model (`Board`), slide directions (`Direction`) and
//!   an interactive session (`Game`).
//! - `heap`: the binary min-heap used as the search frontier.
//! - `heuristics`: frontier ordering (`Heuristic`) and a parity-based
//!   solvability check.
//! - `solver`: the lockstep search (`Solver`) and the `solve` entry points.
//! - `utils`: parsing boards from text.
//! - `error`: the crate-wide `SolverError`.

pub mod engine;
pub mod error;
pub mod heap;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use engine::{Board, Direction};
pub use error::SolverError;
pub use solver::{solve, solve_with_config, Solution, SolverConfig};
