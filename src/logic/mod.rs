//! Game rules: window enumeration, four-in-a-row detection and terminal
//! classification.

use crate::core::{Board, Cell, GameResult, Position, Side, COLUMNS, ROWS, WINDOW_LENGTH};
use once_cell::sync::Lazy;

/// Coordinates of one run of four cells.
pub type Window = [Position; WINDOW_LENGTH];

/// Every horizontal, vertical and diagonal window of the board, in that order.
pub static WINDOWS: Lazy<Vec<Window>> = Lazy::new(build_windows);

fn build_windows() -> Vec<Window> {
    let mut windows = Vec::new();
    let run = |row: usize, col: usize, dr: isize, dc: isize| -> Window {
        let mut w = [Position::default(); WINDOW_LENGTH];
        for (i, pos) in w.iter_mut().enumerate() {
            let r = row as isize + dr * i as isize;
            let c = col as isize + dc * i as isize;
            *pos = Position::new(r as usize, c as usize);
        }
        w
    };

    // 横
    for row in 0..ROWS {
        for col in 0..=COLUMNS - WINDOW_LENGTH {
            windows.push(run(row, col, 0, 1));
        }
    }
    // 縦
    for col in 0..COLUMNS {
        for row in 0..=ROWS - WINDOW_LENGTH {
            windows.push(run(row, col, 1, 0));
        }
    }
    // 右上がり
    for row in 0..=ROWS - WINDOW_LENGTH {
        for col in 0..=COLUMNS - WINDOW_LENGTH {
            windows.push(run(row, col, 1, 1));
        }
    }
    // 右下がり
    for row in WINDOW_LENGTH - 1..ROWS {
        for col in 0..=COLUMNS - WINDOW_LENGTH {
            windows.push(run(row, col, -1, 1));
        }
    }

    windows
}

/// Cell values of a window on the given board.
pub fn window_cells(board: &Board, window: &Window) -> [Cell; WINDOW_LENGTH] {
    let mut cells = [Cell::Empty; WINDOW_LENGTH];
    for (cell, &pos) in cells.iter_mut().zip(window.iter()) {
        *cell = board.at(pos);
    }
    cells
}

/// True iff some window is entirely filled with `side`'s pieces.
pub fn has_four_in_a_row(board: &Board, side: Side) -> bool {
    let piece = side.piece();
    WINDOWS
        .iter()
        .any(|window| window.iter().all(|&pos| board.at(pos) == piece))
}

/// Terminal classification. The player is checked before the AI.
pub fn classify(board: &Board) -> GameResult {
    let player_won = has_four_in_a_row(board, Side::Player);
    let ai_won = has_four_in_a_row(board, Side::Ai);
    // a single drop can never complete lines for both sides
    debug_assert!(!(player_won && ai_won), "both sides have four in a row");

    if player_won {
        GameResult::PlayerWins
    } else if ai_won {
        GameResult::AiWins
    } else if board.is_full() {
        GameResult::Draw
    } else {
        GameResult::NotTerminal
    }
}

/// Lowest column that wins immediately for `side`, if any.
pub fn winning_column(board: &Board, side: Side) -> Option<usize> {
    board
        .legal_columns()
        .into_iter()
        .find(|&col| has_four_in_a_row(&board.with_move(col, side), side))
}

/// Classification right after `mover` dropped a piece into a board that was
/// not terminal before. Only the mover can have completed a line.
pub(crate) fn classify_after_move(board: &Board, mover: Side) -> GameResult {
    if has_four_in_a_row(board, mover) {
        GameResult::won_by(mover)
    } else if board.is_full() {
        GameResult::Draw
    } else {
        GameResult::NotTerminal
    }
}
