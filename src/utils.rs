use crate::engine::Board;
use crate::error::{Result, SolverError};

/// Installs the `env_logger` backend for the binaries.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when `verbose`
/// is set and `warn` when it is not.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Parses an array of row strings into a `Board`.
///
/// Each string holds one row of whitespace-separated tile numbers, starting
/// from the top row. `0` is the blank. The number of rows gives the board
/// dimension, and every row must contain exactly that many tiles.
///
/// # Returns
/// * `Ok(Board)` if the rows form a valid board.
/// * `Err(SolverError::InvalidBoard)` if:
///     - a token is not a non-negative integer;
///     - a row's length differs from the number of rows;
///     - the tiles are not a permutation of `0..N²`, or N is out of range.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 2 3", "4 5 6", "7 0 8"]).unwrap();
/// assert_eq!(board.dimension(), 3);
/// assert_eq!(board.tile(2, 1), 0);
///
/// assert!(board_from_str_array(&["1 2 3", "4 x 6", "7 0 8"]).is_err());
/// assert!(board_from_str_array(&["1 2", "3 0 4"]).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board> {
    let dimension = rows.len();
    let mut tiles = Vec::with_capacity(dimension * dimension);

    for (r, row) in rows.iter().enumerate() {
        let mut count = 0;
        for token in row.split_whitespace() {
            let tile = token.parse::<u32>().map_err(|_| {
                SolverError::InvalidBoard(format!(
                    "unrecognized tile '{}' in row {}",
                    token, r
                ))
            })?;
            tiles.push(tile);
            count += 1;
        }
        if count != dimension {
            return Err(SolverError::InvalidBoard(format!(
                "row {} has {} tiles (expected {})",
                r, count, dimension
            )));
        }
    }

    Board::new(tiles)
}

/// Parses the text format written by `Board`'s `Display` impl: the dimension
/// on the first line followed by that many rows.
///
/// Blank lines and lines starting with `#` are ignored, so board files can
/// carry comments.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::utils::board_from_str;
///
/// let board = board_from_str("# easy one\n2\n1 2\n3 0\n").unwrap();
/// assert!(board.is_goal());
/// assert_eq!(board_from_str(&board.to_string()).unwrap(), board);
/// ```
pub fn board_from_str(s: &str) -> Result<Board> {
    let mut lines = s
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let header = lines
        .next()
        .ok_or_else(|| SolverError::InvalidBoard("input is empty".to_string()))?;
    let dimension = header.parse::<usize>().map_err(|_| {
        SolverError::InvalidBoard(format!("expected board dimension, found '{}'", header))
    })?;

    let rows: Vec<&str> = lines.collect();
    if rows.len() != dimension {
        return Err(SolverError::InvalidBoard(format!(
            "expected {} rows, found {}",
            dimension,
            rows.len()
        )));
    }

    board_from_str_array(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MAX_DIMENSION;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&[
            " 1  2  3  4",
            " 5  6  7  8",
            " 9  0 11 12",
            "13 14 15 10",
        ])
        .unwrap();
        assert_eq!(board.dimension(), 4);
        assert_eq!(board.tile(0, 0), 1);
        assert_eq!(board.tile(2, 1), 0);
        assert_eq!(board.tile(3, 3), 10);
    }

    #[test]
    fn test_board_from_str_array_invalid_token() {
        let result = board_from_str_array(&["1 2", "3 -1"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unrecognized tile '-1'"));
    }

    #[test]
    fn test_board_from_str_array_ragged_rows() {
        let result = board_from_str_array(&["1 2 3", "4 5", "6 7 0 8"]);
        assert!(result.unwrap_err().to_string().contains("row 1 has 2 tiles"));
    }

    #[test]
    fn test_board_from_str_array_not_a_permutation() {
        let result = board_from_str_array(&["1 1", "2 0"]);
        assert!(matches!(result, Err(SolverError::InvalidBoard(_))));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let rows: [&str; 0] = [];
        assert!(board_from_str_array(&rows).is_err());
    }

    #[test]
    fn test_board_from_str_header_mismatch() {
        let result = board_from_str("3\n1 2\n3 0\n");
        assert!(result.unwrap_err().to_string().contains("expected 3 rows, found 2"));
        let result = board_from_str("two\n1 2\n3 0\n");
        assert!(result.unwrap_err().to_string().contains("expected board dimension"));
        assert!(board_from_str("\n# nothing here\n").is_err());
    }

    #[test]
    fn test_board_from_str_rejects_oversized_dimension() {
        let header = format!("{}\n", MAX_DIMENSION + 1);
        assert!(board_from_str(&header).is_err());
    }

    #[test]
    fn test_display_output_parses_back() {
        let mut rng = SmallRng::seed_from_u64(1);
        for dimension in 2..=6 {
            let board = Board::random(dimension, &mut rng).unwrap();
            assert_eq!(board_from_str(&board.to_string()).unwrap(), board);
        }
    }
}
