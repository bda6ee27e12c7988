//! Text form of a board: one string per row, top row first, `.` for empty,
//! `X` for the player and `O` for the AI.

use super::board::Board;
use super::types::{Cell, Side, COLUMNS, ROWS};
use crate::error::{EngineError, Result};
use crate::logic::has_four_in_a_row;

/// Builds a board from rows written top row first, as it looks on screen.
///
/// ```text
/// "......."
/// "......."
/// "......."
/// "......."
/// "...O..."
/// "XXX.O.."
/// ```
pub fn setup_from_strings<S: AsRef<str>>(rows: &[S]) -> Result<Board> {
    if rows.len() != ROWS {
        return Err(EngineError::InvalidBoard(format!(
            "expected {} rows, got {}",
            ROWS,
            rows.len()
        )));
    }

    let mut cells = [[Cell::Empty; COLUMNS]; ROWS];
    for (i, line) in rows.iter().enumerate() {
        let line = line.as_ref();
        let row = ROWS - 1 - i;
        let chars: Vec<char> = line.chars().collect();
        if chars.len() != COLUMNS {
            return Err(EngineError::InvalidBoard(format!(
                "row {} has {} cells, expected {}: '{}'",
                row,
                chars.len(),
                COLUMNS,
                line
            )));
        }
        for (col, c) in chars.into_iter().enumerate() {
            cells[row][col] = Cell::from_char(c).ok_or_else(|| {
                EngineError::InvalidBoard(format!("unknown cell '{}' in row '{}'", c, line))
            })?;
        }
    }

    // 浮いている駒がないか
    for col in 0..COLUMNS {
        for row in 1..ROWS {
            if !cells[row][col].is_empty() && cells[row - 1][col].is_empty() {
                return Err(EngineError::InvalidBoard(format!(
                    "floating piece at row {}, column {}",
                    row, col
                )));
            }
        }
    }

    let board = Board::from_cells(cells);
    if has_four_in_a_row(&board, Side::Player) && has_four_in_a_row(&board, Side::Ai) {
        return Err(EngineError::InvalidBoard(
            "both sides have four in a row".to_string(),
        ));
    }
    Ok(board)
}

/// Inverse of [`setup_from_strings`].
pub fn board_to_strings(board: &Board) -> Vec<String> {
    board
        .cells()
        .iter()
        .rev()
        .map(|row| row.iter().map(|cell| cell.to_char()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_read_top_first() {
        let board = setup_from_strings(&[
            ".......", ".......", ".......", ".......", "O......", "X.....X",
        ])
        .unwrap();
        assert_eq!(board.get(0, 0), Cell::Player);
        assert_eq!(board.get(1, 0), Cell::Ai);
        assert_eq!(board.get(0, 6), Cell::Player);
        assert_eq!(board.piece_count(), 3);
        assert_eq!(board_to_strings(&board)[5], "X.....X");
    }

    #[test]
    fn floating_pieces_are_rejected() {
        let err = setup_from_strings(&[
            ".......", ".......", ".......", ".......", "...O...", ".......",
        ])
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidBoard(_)));
    }

    #[test]
    fn malformed_rows_are_rejected() {
        assert!(setup_from_strings(&["......."]).is_err());
        assert!(setup_from_strings(&[
            ".......", ".......", ".......", ".......", ".......", "......",
        ])
        .is_err());
        assert!(setup_from_strings(&[
            ".......", ".......", ".......", ".......", ".......", "...Z...",
        ])
        .is_err());
    }

    #[test]
    fn double_winner_is_rejected() {
        let err = setup_from_strings(&[
            ".......", ".......", ".......", ".......", "OOOO...", "XXXX...",
        ])
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidBoard(_)));
    }
}
