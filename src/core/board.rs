use super::types::{Cell, Position, Side, COLUMNS, ROWS};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// 盤面
///
/// Fixed 6x7 grid stored bottom row first. The board is `Copy`: search
/// branches copy it on the stack instead of sharing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "crate::core::serialization")]
    cells: [[Cell; COLUMNS]; ROWS],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLUMNS]; ROWS],
        }
    }

    pub(crate) fn from_cells(cells: [[Cell; COLUMNS]; ROWS]) -> Self {
        Board { cells }
    }

    /// Row-major view of the grid, row 0 first. This is the projection the
    /// renderer consumes.
    pub fn cells(&self) -> &[[Cell; COLUMNS]; ROWS] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn at(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// A column is open while its top cell is empty.
    pub fn is_valid_column(&self, col: usize) -> bool {
        col < COLUMNS && self.cells[ROWS - 1][col].is_empty()
    }

    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLUMNS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][col].is_empty())
    }

    /// Places a piece without validation; `row` must be the next open row of `col`.
    pub fn drop_piece(&mut self, row: usize, col: usize, side: Side) {
        debug_assert_eq!(self.next_open_row(col), Some(row));
        self.cells[row][col] = side.piece();
    }

    /// Open columns in ascending order. Empty when the board is full.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLUMNS).filter(|&col| self.is_valid_column(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells[ROWS - 1].iter().all(|cell| !cell.is_empty())
    }

    /// Copy of this board with `side` dropped into `col`. Hot-path helper for
    /// search: the caller must only pass open columns.
    pub fn with_move(&self, col: usize, side: Side) -> Board {
        let mut next = *self;
        if let Some(row) = next.next_open_row(col) {
            next.drop_piece(row, col, side);
        }
        next
    }

    /// Validated drop used by the game loop. Returns the row the piece landed in.
    pub fn play(&mut self, col: usize, side: Side) -> Result<usize> {
        if !self.is_valid_column(col) {
            return Err(EngineError::InvalidColumn { column: col });
        }
        let row = self
            .next_open_row(col)
            .ok_or(EngineError::InvalidColumn { column: col })?;
        self.drop_piece(row, col, side);
        Ok(row)
    }

    pub fn count(&self, side: Side) -> usize {
        let piece = side.piece();
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == piece)
            .count()
    }

    pub fn piece_count(&self) -> usize {
        self.count(Side::Player) + self.count(Side::Ai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_every_column_open() {
        let board = Board::new();
        assert_eq!(board.legal_columns(), (0..COLUMNS).collect::<Vec<_>>());
        assert_eq!(board.piece_count(), 0);
        assert!(!board.is_full());
    }

    #[test]
    fn pieces_stack_from_the_bottom() {
        let mut board = Board::new();
        assert_eq!(board.next_open_row(3), Some(0));
        board.drop_piece(0, 3, Side::Player);
        assert_eq!(board.next_open_row(3), Some(1));
        assert_eq!(board.play(3, Side::Ai), Ok(1));
        assert_eq!(board.get(0, 3), Cell::Player);
        assert_eq!(board.get(1, 3), Cell::Ai);
        assert_eq!(board.next_open_row(3), Some(2));
    }

    #[test]
    fn full_column_is_rejected() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let side = if i % 2 == 0 { Side::Player } else { Side::Ai };
            board.play(0, side).unwrap();
        }
        assert!(!board.is_valid_column(0));
        assert_eq!(board.next_open_row(0), None);
        assert_eq!(
            board.play(0, Side::Ai),
            Err(EngineError::InvalidColumn { column: 0 })
        );
        assert_eq!(board.legal_columns(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn out_of_range_column_is_not_valid() {
        let mut board = Board::new();
        assert!(!board.is_valid_column(COLUMNS));
        assert_eq!(board.next_open_row(COLUMNS), None);
        assert!(board.play(COLUMNS, Side::Player).is_err());
    }

    #[test]
    fn with_move_leaves_the_board_untouched() {
        let board = Board::new();
        let next = board.with_move(2, Side::Ai);
        assert_eq!(board, Board::new());
        assert_eq!(next.get(0, 2), Cell::Ai);
        assert_eq!(next.piece_count(), 1);
    }
}
