//! Board model for the N×N sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Direction`: the four ways the blank can slide.
//! - `Board`: an immutable board configuration with its heuristics, successor
//!   generation and the `twin` used to probe solvability.
//! - `Game`: an interactive session on top of `Board` with move counting and undo.
use crate::error::{Result, SolverError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Smallest supported board dimension.
pub const MIN_DIMENSION: usize = 2;
/// Largest supported board dimension.
pub const MAX_DIMENSION: usize = 128;

/// A single slide, named after the direction the blank moves in.
///
/// `Up` swaps the blank with the tile directly above it, which is the same as
/// sliding that tile down into the empty slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in the order `Board::neighbours` generates them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The slide that undoes this one.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Single-letter form used when printing move sequences.
    ///
    /// # Examples
    ///
    /// ```
    /// use npuzzle_solver::engine::Direction;
    /// assert_eq!(Direction::Up.to_char(), 'U');
    /// assert_eq!(Direction::Right.to_char(), 'R');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    /// Parses the single-letter form, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// One configuration of an N×N sliding puzzle.
///
/// Tiles are stored in row-major order; `0` is the blank and `1..N²` are the
/// numbered tiles. The goal places `1..N²` in order with the blank last.
/// A `Board` never changes after construction: `slide`, `neighbours` and
/// `twin` all return new values.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// let board = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// assert_eq!(board.dimension(), 3);
/// assert_eq!(board.hamming(), 1);
/// assert_eq!(board.manhattan(), 1);
/// assert!(!board.is_goal());
/// assert_eq!(board.neighbours().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: Vec<u32>,
    dimension: usize,
    blank: usize,
}

fn check_dimension(dimension: usize) -> Result<()> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
        Ok(())
    } else {
        Err(SolverError::InvalidBoard(format!(
            "dimension {} is outside [{}, {}]",
            dimension, MIN_DIMENSION, MAX_DIMENSION
        )))
    }
}

impl Board {
    /// Creates a board from its tiles in row-major order.
    ///
    /// # Errors
    /// `SolverError::InvalidBoard` if the length is not the square of a
    /// dimension in `[MIN_DIMENSION, MAX_DIMENSION]`, or if the tiles are not
    /// a permutation of `0..len`.
    pub fn new(tiles: Vec<u32>) -> Result<Self> {
        let len = tiles.len();
        let dimension = (len as f64).sqrt().round() as usize;
        if dimension * dimension != len {
            return Err(SolverError::InvalidBoard(format!(
                "{} tiles do not form a square board",
                len
            )));
        }
        check_dimension(dimension)?;

        let mut seen = vec![false; len];
        for &tile in &tiles {
            let value = tile as usize;
            if value >= len {
                return Err(SolverError::InvalidBoard(format!(
                    "tile {} is out of range for a {}x{} board",
                    tile, dimension, dimension
                )));
            }
            if seen[value] {
                return Err(SolverError::InvalidBoard(format!(
                    "tile {} appears more than once",
                    tile
                )));
            }
            seen[value] = true;
        }

        let blank = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or_else(|| SolverError::InvalidBoard("board has no blank".to_string()))?;

        Ok(Board {
            tiles,
            dimension,
            blank,
        })
    }

    /// The solved board of the given dimension.
    pub fn goal(dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        let len = dimension * dimension;
        let mut tiles: Vec<u32> = (1..len as u32).collect();
        tiles.push(0);
        Ok(Board {
            tiles,
            dimension,
            blank: len - 1,
        })
    }

    /// A uniformly random permutation. Roughly half of these are unsolvable.
    pub fn random(dimension: usize, rng: &mut impl Rng) -> Result<Self> {
        check_dimension(dimension)?;
        let mut tiles: Vec<u32> = (0..(dimension * dimension) as u32).collect();
        tiles.shuffle(rng);
        Board::new(tiles)
    }

    /// A board reached by `steps` random slides from the goal, never
    /// immediately undoing the previous slide. Always solvable, in at most
    /// `steps` moves.
    pub fn scrambled(dimension: usize, steps: usize, rng: &mut impl Rng) -> Result<Self> {
        let mut board = Board::goal(dimension)?;
        let mut last: Option<Direction> = None;
        for _ in 0..steps {
            let options: Vec<Direction> = Direction::ALL
                .iter()
                .copied()
                .filter(|&d| Some(d.opposite()) != last && board.can_slide(d))
                .collect();
            let Some(&direction) = options.choose(rng) else {
                break;
            };
            if let Some(next) = board.slide(direction) {
                board = next;
                last = Some(direction);
            }
        }
        Ok(board)
    }

    /// Board dimension N.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Tiles in row-major order.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `dimension()`.
    pub fn tile(&self, r: usize, c: usize) -> u32 {
        assert!(r < self.dimension && c < self.dimension, "({}, {}) is off the board", r, c);
        self.tiles[r * self.dimension + c]
    }

    /// (row, column) of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.dimension, self.blank % self.dimension)
    }

    /// Number of numbered tiles out of place. The blank is not counted.
    pub fn hamming(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, &t)| t != 0 && t as usize != i + 1)
            .count() as u32
    }

    /// Sum over numbered tiles of the row plus column distance to the tile's
    /// goal position. The blank is not counted.
    pub fn manhattan(&self) -> u32 {
        let n = self.dimension;
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0)
            .map(|(i, &t)| {
                let goal = t as usize - 1;
                ((i / n).abs_diff(goal / n) + (i % n).abs_diff(goal % n)) as u32
            })
            .sum()
    }

    pub fn is_goal(&self) -> bool {
        self.hamming() == 0
    }

    fn slide_target(&self, direction: Direction) -> Option<usize> {
        let n = self.dimension;
        let (row, col) = self.blank_position();
        match direction {
            Direction::Up if row > 0 => Some(self.blank - n),
            Direction::Down if row + 1 < n => Some(self.blank + n),
            Direction::Left if col > 0 => Some(self.blank - 1),
            Direction::Right if col + 1 < n => Some(self.blank + 1),
            _ => None,
        }
    }

    /// Whether the blank can move in `direction` without leaving the grid.
    pub fn can_slide(&self, direction: Direction) -> bool {
        self.slide_target(direction).is_some()
    }

    /// The board after moving the blank one step, or `None` at the edge.
    pub fn slide(&self, direction: Direction) -> Option<Board> {
        let target = self.slide_target(direction)?;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Board {
            tiles,
            dimension: self.dimension,
            blank: target,
        })
    }

    /// All boards one slide away, in `Direction::ALL` order with unavailable
    /// directions skipped.
    pub fn neighbours(&self) -> Vec<Board> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.slide(d))
            .collect()
    }

    /// The slide that turns `self` into `other`, if they are one move apart.
    pub fn direction_to(&self, other: &Board) -> Option<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .find(|&d| self.slide(d).as_ref() == Some(other))
    }

    /// This board with the first two numbered tiles (row-major) exchanged.
    ///
    /// A board and its twin always fall in opposite solvability classes.
    /// The blank does not move, so the same two positions are picked again
    /// on the twin and `b.twin().twin() == b`.
    pub fn twin(&self) -> Board {
        let mut numbered = self
            .tiles
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0)
            .map(|(i, _)| i);
        let mut tiles = self.tiles.clone();
        if let (Some(first), Some(second)) = (numbered.next(), numbered.next()) {
            tiles.swap(first, second);
        }
        Board {
            tiles,
            dimension: self.dimension,
            blank: self.blank,
        }
    }
}

impl fmt::Display for Board {
    /// Writes the dimension on the first line, then one row per line with
    /// tiles right-aligned and separated by a space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        write!(f, "{}", self.dimension)?;
        for row in self.tiles.chunks(self.dimension) {
            writeln!(f)?;
            let cells: Vec<String> = row.iter().map(|t| format!("{:>width$}", t)).collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// An interactive puzzle session: the current board, the number of slides
/// made and a history for undo.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::{Board, Direction, Game};
/// let board = Board::new(vec![1, 2, 0, 3]).unwrap();
/// let mut game = Game::new_with_board(board);
/// assert!(game.process_move(Direction::Right));
/// assert!(game.is_solved());
/// assert_eq!(game.moves(), 1);
/// assert!(game.undo_last_move());
/// assert_eq!(game.moves(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    moves: u32,
    history: Vec<Board>,
}

impl Game {
    pub fn new_with_board(initial_board: Board) -> Self {
        Game {
            board: initial_board.clone(),
            moves: 0,
            history: vec![initial_board],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of slides made so far, not counting undone ones.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_goal()
    }

    /// Slides the blank in `direction`.
    ///
    /// Returns `false` and leaves the game untouched if the blank is already
    /// at that edge.
    pub fn process_move(&mut self, direction: Direction) -> bool {
        match self.board.slide(direction) {
            Some(next) => {
                self.board = next;
                self.moves += 1;
                self.history.push(self.board.clone());
                true
            }
            None => false,
        }
    }

    /// Reverts the last slide. Returns `false` when already at the initial board.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        match self.history.last() {
            Some(previous) => {
                self.board = previous.clone();
                self.moves -= 1;
                true
            }
            None => false,
        }
    }
}
