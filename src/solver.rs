//! Bidirectional best-first (A*) search for the sliding puzzle.
//!
//! The solver runs two searches in lockstep: one from the initial board and
//! one from its twin. A board and its twin are never both solvable, so
//! exactly one of the searches reaches the goal. Whichever does decides the
//! answer, and no parity computation is needed.
//!
//! Each search owns a `MinHeap` frontier and an append-only arena of expanded
//! nodes. Predecessor links are arena indices, and the arena is dropped with
//! the solver.
use crate::engine::{Board, Direction};
use crate::error::{Frontier, Result, SolverError};
use crate::heap::MinHeap;
use crate::heuristics::Heuristic;
use log::{debug, trace};
use std::cmp::Ordering;

/// Tuning knobs for a search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Estimate used to order both frontiers.
    pub heuristic: Heuristic,
    /// Maximum number of lockstep steps before giving up with
    /// `SolverError::Aborted`. `None` searches until one side reaches its goal.
    pub max_expansions: Option<usize>,
}

/// Where the solver is in its run. The two `Solved*` states are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    /// The original board reached the goal; it is solvable.
    SolvedOriginal,
    /// The twin reached the goal first; the original board is unsolvable.
    SolvedTwin,
}

/// Counters collected during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Lockstep steps taken. Each step pops one node from each frontier.
    pub expansions: usize,
    /// Nodes pushed onto either frontier, roots included.
    pub generated: usize,
}

/// Represents the outcome of a completed search.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Whether the initial board can be turned into the goal.
    pub solvable: bool,
    /// Length of a shortest solution, or `-1` when unsolvable.
    pub min_moves: i32,
    /// Boards from the initial board to the goal inclusive. Empty when unsolvable.
    pub boards: Vec<Board>,
    pub stats: SearchStats,
}

impl Solution {
    /// `min_moves` as an `Option`, `None` when unsolvable.
    pub fn moves(&self) -> Option<usize> {
        usize::try_from(self.min_moves).ok()
    }

    /// The slides that walk `boards` from start to goal.
    pub fn directions(&self) -> Vec<Direction> {
        self.boards
            .windows(2)
            .filter_map(|pair| pair[0].direction_to(&pair[1]))
            .collect()
    }
}

/// A candidate in a frontier, and once popped, an entry in its arena.
///
/// Ordered by `moves + heuristic`, then by the smaller heuristic (the node
/// that looks closer to the goal), then by insertion order.
#[derive(Clone, Debug)]
struct SearchNode {
    board: Board,
    prev: Option<usize>,
    moves: u32,
    heuristic: u32,
    seq: u64,
}

impl SearchNode {
    fn priority(&self) -> u32 {
        self.moves + self.heuristic
    }

    fn key(&self) -> (u32, u32, u64) {
        (self.priority(), self.heuristic, self.seq)
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// One of the two searches: its frontier heap plus the arena of expanded nodes.
#[derive(Debug)]
struct SearchFrontier {
    side: Frontier,
    heuristic: Heuristic,
    heap: MinHeap<SearchNode>,
    arena: Vec<SearchNode>,
    next_seq: u64,
}

impl SearchFrontier {
    fn new(side: Frontier, root: Board, heuristic: Heuristic) -> Self {
        let mut frontier = SearchFrontier {
            side,
            heuristic,
            heap: MinHeap::new(),
            arena: Vec::new(),
            next_seq: 0,
        };
        frontier.push(root, None, 0);
        frontier
    }

    fn push(&mut self, board: Board, prev: Option<usize>, moves: u32) {
        let heuristic = self.heuristic.evaluate(&board);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(SearchNode {
            board,
            prev,
            moves,
            heuristic,
            seq,
        });
    }

    /// Pops the best candidate into the arena and returns its index.
    fn pop(&mut self, expansions: usize) -> Result<usize> {
        if self.heap.is_empty() {
            return Err(SolverError::SearchExhausted {
                frontier: self.side,
                expansions,
            });
        }
        let node = self.heap.pop_min()?;
        self.arena.push(node);
        Ok(self.arena.len() - 1)
    }

    fn node(&self, index: usize) -> &SearchNode {
        &self.arena[index]
    }

    /// Pushes every neighbour of `arena[index]` except the board it came from.
    fn expand(&mut self, index: usize) {
        let node = &self.arena[index];
        let moves = node.moves + 1;
        let predecessor = node.prev.map(|p| &self.arena[p].board);
        let children: Vec<Board> = node
            .board
            .neighbours()
            .into_iter()
            .filter(|child| Some(child) != predecessor)
            .collect();
        for child in children {
            self.push(child, Some(index), moves);
        }
    }

    /// Boards from the root to `arena[index]`, following predecessor links.
    fn path_to(&self, index: usize) -> Vec<Board> {
        let mut path = Vec::new();
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let node = &self.arena[i];
            path.push(node.board.clone());
            cursor = node.prev;
        }
        path.reverse();
        path
    }

    fn generated(&self) -> usize {
        self.next_seq as usize
    }
}

/// Drives the two lockstep searches.
///
/// Use `run` to search to completion, or `step` to advance one lockstep
/// iteration at a time.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::solver::{SearchStatus, Solver, SolverConfig};
///
/// let board = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// let mut solver = Solver::new(&board, SolverConfig::default());
/// assert_eq!(solver.status(), SearchStatus::Running);
/// let solution = solver.run().unwrap();
/// assert_eq!(solver.status(), SearchStatus::SolvedOriginal);
/// assert_eq!(solution.min_moves, 1);
/// ```
#[derive(Debug)]
pub struct Solver {
    original: SearchFrontier,
    twin: SearchFrontier,
    config: SolverConfig,
    status: SearchStatus,
    expansions: usize,
    goal: Option<usize>,
}

impl Solver {
    /// Seeds both frontiers with their roots: `initial` and `initial.twin()`.
    pub fn new(initial: &Board, config: SolverConfig) -> Self {
        debug!(
            "seeding {}x{} search with {} heuristic, initial estimate {}",
            initial.dimension(),
            initial.dimension(),
            config.heuristic,
            config.heuristic.evaluate(initial)
        );
        Solver {
            original: SearchFrontier::new(Frontier::Original, initial.clone(), config.heuristic),
            twin: SearchFrontier::new(Frontier::Twin, initial.twin(), config.heuristic),
            config,
            status: SearchStatus::Running,
            expansions: 0,
            goal: None,
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            expansions: self.expansions,
            generated: self.original.generated() + self.twin.generated(),
        }
    }

    /// Advances both searches by one node each.
    ///
    /// The original frontier's node is goal-tested first, so if both sides
    /// pop a goal in the same step the original board wins. Calling `step`
    /// after a terminal state is a no-op.
    ///
    /// # Errors
    /// - `SolverError::Aborted` once `max_expansions` steps have been taken.
    /// - `SolverError::SearchExhausted` if a frontier empties before either goal.
    pub fn step(&mut self) -> Result<SearchStatus> {
        if self.status != SearchStatus::Running {
            return Ok(self.status);
        }
        if let Some(limit) = self.config.max_expansions {
            if self.expansions >= limit {
                debug!("aborting search after {} expansions", self.expansions);
                return Err(SolverError::Aborted {
                    expansions: self.expansions,
                });
            }
        }

        let current = self.original.pop(self.expansions)?;
        let current_twin = self.twin.pop(self.expansions)?;
        self.expansions += 1;

        let node = self.original.node(current);
        if node.board.is_goal() {
            debug!(
                "original board solved in {} moves after {} expansions",
                node.moves, self.expansions
            );
            self.status = SearchStatus::SolvedOriginal;
            self.goal = Some(current);
            return Ok(self.status);
        }
        let twin_node = self.twin.node(current_twin);
        if twin_node.board.is_goal() {
            debug!(
                "twin reached its goal after {} expansions; board is unsolvable",
                self.expansions
            );
            self.status = SearchStatus::SolvedTwin;
            return Ok(self.status);
        }

        trace!(
            "step {}: original f={} g={}, twin f={} g={}, frontiers {}/{}",
            self.expansions,
            node.priority(),
            node.moves,
            twin_node.priority(),
            twin_node.moves,
            self.original.heap.len(),
            self.twin.heap.len()
        );

        self.original.expand(current);
        self.twin.expand(current_twin);
        Ok(SearchStatus::Running)
    }

    /// Steps until a terminal state and returns the result.
    pub fn run(&mut self) -> Result<Solution> {
        loop {
            self.step()?;
            if let Some(solution) = self.solution() {
                return Ok(solution);
            }
        }
    }

    /// The result of a finished search, or `None` while still running.
    pub fn solution(&self) -> Option<Solution> {
        let stats = self.stats();
        match self.status {
            SearchStatus::Running => None,
            SearchStatus::SolvedOriginal => {
                let goal = self.goal?;
                let boards = self.original.path_to(goal);
                Some(Solution {
                    solvable: true,
                    min_moves: self.original.node(goal).moves as i32,
                    boards,
                    stats,
                })
            }
            SearchStatus::SolvedTwin => Some(Solution {
                solvable: false,
                min_moves: -1,
                boards: Vec::new(),
                stats,
            }),
        }
    }
}

/// Solves `initial` with the default configuration (Manhattan, no budget).
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::solver::solve;
///
/// let unsolvable = Board::new(vec![2, 1, 3, 0]).unwrap();
/// let solution = solve(&unsolvable).unwrap();
/// assert!(!solution.solvable);
/// assert_eq!(solution.min_moves, -1);
/// assert!(solution.boards.is_empty());
/// ```
pub fn solve(initial: &Board) -> Result<Solution> {
    solve_with_config(initial, &SolverConfig::default())
}

/// Solves `initial` with an explicit configuration.
pub fn solve_with_config(initial: &Board, config: &SolverConfig) -> Result<Solution> {
    Solver::new(initial, *config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::is_solvable_by_parity;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, VecDeque};

    fn board(tiles: &[u32]) -> Board {
        Board::new(tiles.to_vec()).unwrap()
    }

    /// Breadth-first distances from the goal, up to `max_depth` slides.
    fn distances_from_goal(dimension: usize, max_depth: usize) -> HashMap<Board, usize> {
        let goal = Board::goal(dimension).unwrap();
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();
        distances.insert(goal.clone(), 0);
        queue.push_back(goal);
        while let Some(current) = queue.pop_front() {
            let d = distances[&current];
            if d == max_depth {
                continue;
            }
            for next in current.neighbours() {
                if !distances.contains_key(&next) {
                    distances.insert(next.clone(), d + 1);
                    queue.push_back(next);
                }
            }
        }
        distances
    }

    fn assert_valid_path(start: &Board, solution: &Solution) {
        assert!(solution.solvable);
        assert_eq!(solution.boards.len() as i32, solution.min_moves + 1);
        assert_eq!(solution.boards.first(), Some(start));
        assert!(solution.boards.last().map_or(false, Board::is_goal));
        for pair in solution.boards.windows(2) {
            assert!(
                pair[0].direction_to(&pair[1]).is_some(),
                "not a single slide:\n{}\n->\n{}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(solution.directions().len(), solution.boards.len() - 1);
    }

    #[test]
    fn test_goal_board_needs_no_moves() {
        for dimension in 2..=4 {
            let goal = Board::goal(dimension).unwrap();
            let solution = solve(&goal).unwrap();
            assert!(solution.solvable);
            assert_eq!(solution.min_moves, 0);
            assert_eq!(solution.moves(), Some(0));
            assert_eq!(solution.boards, vec![goal]);
            assert_eq!(solution.stats.expansions, 1);
        }
    }

    #[test]
    fn test_fifteen_puzzle_with_rotated_bottom_row() {
        let start = board(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 11, 12, 13, 14, 15, 10]);
        let solution = solve(&start).unwrap();
        assert_eq!(solution.min_moves, 11);
        assert_valid_path(&start, &solution);
    }

    #[test]
    fn test_single_adjacent_swap_is_unsolvable() {
        let start = board(&[2, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0]);
        let solution = solve(&start).unwrap();
        assert!(!solution.solvable);
        assert_eq!(solution.min_moves, -1);
        assert_eq!(solution.moves(), None);
        assert!(solution.boards.is_empty());
        assert!(solution.directions().is_empty());
    }

    #[test]
    fn test_eight_puzzle_known_distances() {
        let cases: [(&[u32], i32); 4] = [
            (&[1, 2, 3, 4, 5, 6, 7, 0, 8], 1),
            (&[0, 1, 3, 4, 2, 5, 7, 8, 6], 4),
            (&[8, 1, 3, 4, 0, 2, 7, 6, 5], 14),
            (&[1, 2, 3, 4, 5, 6, 0, 7, 8], 2),
        ];
        for (tiles, expected) in cases {
            let start = board(tiles);
            let solution = solve(&start).unwrap();
            assert_eq!(solution.min_moves, expected, "board:\n{}", start);
            assert_valid_path(&start, &solution);
        }
    }

    #[test]
    fn test_every_two_by_two_board_against_bfs() {
        let distances = distances_from_goal(2, usize::MAX);
        assert_eq!(distances.len(), 12);

        let mut solvable = 0;
        let mut boards = 0;
        for code in 0..256u32 {
            let tiles: Vec<u32> = (0..4).map(|i| (code >> (2 * i)) & 3).collect();
            let Ok(start) = Board::new(tiles) else {
                continue;
            };
            boards += 1;
            let solution = solve(&start).unwrap();
            match distances.get(&start) {
                Some(&distance) => {
                    solvable += 1;
                    assert_eq!(solution.min_moves, distance as i32);
                    assert!(start.manhattan() as usize <= distance);
                    assert_valid_path(&start, &solution);
                }
                None => assert!(!solution.solvable, "board:\n{}", start),
            }
        }
        assert_eq!(boards, 24);
        assert_eq!(solvable, 12);
    }

    #[test]
    fn test_eight_puzzle_against_bounded_bfs() {
        let distances = distances_from_goal(3, 12);
        for (state, &distance) in &distances {
            assert!(state.manhattan() as usize <= distance);
            assert!(state.hamming() as usize <= distance);
        }

        let mut checked = 0;
        for (i, (state, &distance)) in distances.iter().enumerate() {
            if i % 7 != 0 {
                continue;
            }
            let solution = solve(state).unwrap();
            assert_eq!(solution.min_moves, distance as i32, "board:\n{}", state);
            checked += 1;
        }
        assert!(checked > 100);
    }

    #[test]
    fn test_board_and_twin_have_opposite_solvability() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for dimension in 2..=4 {
            for _ in 0..5 {
                let start = Board::scrambled(dimension, 16, &mut rng).unwrap();
                let direct = solve(&start).unwrap();
                let twin = solve(&start.twin()).unwrap();
                assert!(direct.solvable);
                assert!(!twin.solvable);
                assert_eq!(direct.solvable, is_solvable_by_parity(&start));
            }
        }
    }

    #[test]
    fn test_random_small_boards_match_parity() {
        let mut rng = SmallRng::seed_from_u64(8);
        for _ in 0..40 {
            let start = Board::random(2, &mut rng).unwrap();
            assert_eq!(solve(&start).unwrap().solvable, is_solvable_by_parity(&start));
        }
    }

    #[test]
    fn test_hamming_finds_same_length_as_manhattan() {
        let mut rng = SmallRng::seed_from_u64(31);
        let hamming = SolverConfig {
            heuristic: Heuristic::Hamming,
            ..SolverConfig::default()
        };
        for _ in 0..4 {
            let start = Board::scrambled(3, 12, &mut rng).unwrap();
            let by_manhattan = solve(&start).unwrap();
            let by_hamming = solve_with_config(&start, &hamming).unwrap();
            assert_eq!(by_manhattan.min_moves, by_hamming.min_moves);
            assert_valid_path(&start, &by_hamming);
        }
    }

    #[test]
    fn test_solution_is_deterministic() {
        let start = board(&[8, 1, 3, 4, 0, 2, 7, 6, 5]);
        let first = solve(&start).unwrap();
        let second = solve(&start).unwrap();
        assert_eq!(first.boards, second.boards);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_expansion_budget_aborts() {
        let start = board(&[8, 1, 3, 4, 0, 2, 7, 6, 5]);
        let config = SolverConfig {
            max_expansions: Some(3),
            ..SolverConfig::default()
        };
        assert_eq!(
            solve_with_config(&start, &config).unwrap_err(),
            SolverError::Aborted { expansions: 3 }
        );

        let generous = SolverConfig {
            max_expansions: Some(1_000_000),
            ..SolverConfig::default()
        };
        assert_eq!(solve_with_config(&start, &generous).unwrap().min_moves, 14);
    }

    #[test]
    fn test_step_transitions() {
        let start = board(&[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let mut solver = Solver::new(&start, SolverConfig::default());
        assert_eq!(solver.status(), SearchStatus::Running);
        assert!(solver.solution().is_none());
        assert_eq!(solver.stats().generated, 2);

        assert_eq!(solver.step().unwrap(), SearchStatus::Running);
        assert_eq!(solver.step().unwrap(), SearchStatus::Running);
        assert_eq!(solver.step().unwrap(), SearchStatus::SolvedOriginal);
        assert_eq!(solver.step().unwrap(), SearchStatus::SolvedOriginal);
        assert_eq!(solver.stats().expansions, 3);

        let solution = solver.solution().unwrap();
        assert_eq!(solution.min_moves, 2);
        assert_eq!(
            solution.directions(),
            vec![Direction::Right, Direction::Right]
        );
    }

    #[test]
    fn test_twin_side_terminates_unsolvable_search() {
        // The twin is one slide away from the goal.
        let start = board(&[2, 1, 3, 4, 5, 6, 7, 0, 8]);
        let mut solver = Solver::new(&start, SolverConfig::default());
        assert!(!solver.run().unwrap().solvable);
        assert_eq!(solver.status(), SearchStatus::SolvedTwin);
        assert_eq!(solver.stats().expansions, 2);
    }

    #[test]
    fn test_predecessor_is_never_pushed_again() {
        let start = board(&[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let mut frontier = SearchFrontier::new(Frontier::Original, start.clone(), Heuristic::Manhattan);
        let root = frontier.pop(0).unwrap();
        frontier.expand(root);
        assert_eq!(frontier.heap.len(), 4);

        let child = frontier.pop(1).unwrap();
        let child_neighbours = frontier.node(child).board.neighbours().len();
        frontier.expand(child);
        assert_eq!(frontier.heap.len(), 3 + child_neighbours - 1);
        assert_eq!(frontier.path_to(child).first(), Some(&start));
    }

    #[test]
    fn test_empty_frontier_reports_exhaustion() {
        let mut frontier = SearchFrontier::new(Frontier::Twin, Board::goal(2).unwrap(), Heuristic::Manhattan);
        frontier.pop(0).unwrap();
        assert_eq!(
            frontier.pop(1),
            Err(SolverError::SearchExhausted {
                frontier: Frontier::Twin,
                expansions: 1
            })
        );
    }

    #[test]
    fn test_node_order_breaks_ties_by_heuristic_then_insertion() {
        let goal = Board::goal(2).unwrap();
        let node = |moves, heuristic, seq| SearchNode {
            board: goal.clone(),
            prev: None,
            moves,
            heuristic,
            seq,
        };
        assert!(node(1, 1, 5) < node(0, 3, 0));
        assert!(node(2, 1, 9) < node(1, 2, 0));
        assert!(node(1, 1, 0) < node(1, 1, 1));
    }
}
