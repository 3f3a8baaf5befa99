//! Board evaluation functions used to guide and cross-check the search.
//!
//! The solver ranks frontier nodes by `moves + heuristic`, where the heuristic
//! is picked through `Heuristic`. Both variants are admissible (they never
//! overestimate the remaining number of slides), so the first goal popped
//! from the frontier is always reached by a shortest path.
//!
//! This module also provides the classic permutation-parity test. The solver
//! never needs it, since it races the board against its twin instead, but
//! it gives the evaluator and the tests an independent solvability oracle.
use crate::engine::Board;
use clap::ValueEnum;
use std::fmt;

/// The estimate of remaining slides used to order the search frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Heuristic {
    /// Sum of row and column distances of each tile to its goal position.
    #[default]
    Manhattan,
    /// Number of tiles out of place. Weaker, so the search expands more nodes.
    Hamming,
}

impl Heuristic {
    /// Scores `board` under this heuristic.
    ///
    /// # Examples
    ///
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// use npuzzle_solver::heuristics::Heuristic;
    /// let board = Board::new(vec![8, 1, 3, 4, 0, 2, 7, 6, 5]).unwrap();
    /// assert_eq!(Heuristic::Manhattan.evaluate(&board), 10);
    /// assert_eq!(Heuristic::Hamming.evaluate(&board), 5);
    /// ```
    pub fn evaluate(self, board: &Board) -> u32 {
        match self {
            Heuristic::Manhattan => board.manhattan(),
            Heuristic::Hamming => board.hamming(),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Hamming => write!(f, "hamming"),
        }
    }
}

/// Counts pairs of numbered tiles that appear in the wrong relative order
/// when the board is read row by row. The blank is skipped.
pub fn inversion_count(board: &Board) -> usize {
    let numbered: Vec<u32> = board.tiles().iter().copied().filter(|&t| t != 0).collect();
    let mut inversions = 0;
    for (i, &a) in numbered.iter().enumerate() {
        inversions += numbered[i + 1..].iter().filter(|&&b| b < a).count();
    }
    inversions
}

/// Decides solvability from permutation parity.
///
/// For odd N a board is solvable iff its inversion count is even. For even N
/// each vertical slide flips the inversion parity and moves the blank one row,
/// so the board is solvable iff `inversions + blank row` is odd (the goal has
/// zero inversions and the blank on row N-1).
pub fn is_solvable_by_parity(board: &Board) -> bool {
    let inversions = inversion_count(board);
    if board.dimension() % 2 == 1 {
        inversions % 2 == 0
    } else {
        let (blank_row, _) = board.blank_position();
        (inversions + blank_row) % 2 == 1
    }
}
