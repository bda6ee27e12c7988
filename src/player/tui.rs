use crate::core::{Board, Side, COLUMNS};
use crate::display::{render_board, DisplayState};
use crate::player::{Choice, PlayerController};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Human seat: the column is picked on the keyboard.
pub struct TuiController {
    side: Side,
    name: String,
}

impl TuiController {
    pub fn new(side: Side, name: &str) -> Self {
        Self {
            side,
            name: name.to_string(),
        }
    }
}

/// Column for a digit key `'1'..='7'`.
fn column_for_key(c: char) -> Option<usize> {
    let digit = c.to_digit(10)? as usize;
    (1..=COLUMNS).contains(&digit).then(|| digit - 1)
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }

    fn choose_move(&self, board: &Board, legal_columns: &[usize], view: &DisplayState) -> Option<Choice> {
        let mut state = DisplayState {
            cursor: view.cursor,
            show_cursor: true,
            status_msg: Some(format!("{}'s turn ({})", self.name, self.side)),
            info_msg: view.info_msg.clone(),
            last_move: view.last_move,
            scores: view.scores,
        };

        // 初期カーソルは中央、埋まっていれば最初の空き列
        if !legal_columns.contains(&state.cursor) {
            state.cursor = *legal_columns.first()?;
        }

        loop {
            if render_board(board, &state).is_err() {
                return None;
            }
            print!("[Left/Right]: Move | [Enter]: Drop | [1-7]: Drop in column | [q]: Resign\r\n");

            match event::poll(Duration::from_millis(100)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(_) => return None,
            }
            let code = match event::read() {
                Ok(Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                })) => code,
                Ok(_) => continue,
                Err(_) => return None,
            };

            let target = match code {
                KeyCode::Char('q') => return None,
                KeyCode::Left => {
                    if state.cursor > 0 {
                        state.cursor -= 1;
                    }
                    None
                }
                KeyCode::Right => {
                    if state.cursor < COLUMNS - 1 {
                        state.cursor += 1;
                    }
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => Some(state.cursor),
                KeyCode::Char(c) => column_for_key(c),
                _ => None,
            };

            if let Some(column) = target {
                if legal_columns.contains(&column) {
                    return Some(Choice::column(column));
                }
                state.cursor = column;
                state.status_msg = Some(format!("Column {} is full, pick another", column + 1));
            }
        }
    }
}
