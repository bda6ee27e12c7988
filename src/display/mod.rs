use crate::core::{Board, Position, Side, COLUMNS, ROWS};
use crate::game::Scoreboard;
use crate::player::ai::{Decision, Strategy};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{stdout, Write};

pub struct DisplayState {
    /// Column under the selection cursor.
    pub cursor: usize,
    pub show_cursor: bool,
    pub status_msg: Option<String>,
    pub info_msg: Option<String>,
    pub last_move: Option<Position>,
    pub scores: Option<Scoreboard>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: COLUMNS / 2,
            show_cursor: false,
            status_msg: None,
            info_msg: None,
            last_move: None,
            scores: None,
        }
    }
}

/// One-line summary of an engine decision for the info line.
pub fn describe_decision(decision: &Decision) -> String {
    let column = decision.column + 1;
    match decision.strategy {
        Strategy::Minimax => format!(
            "Minimax played column {} (value {}, {} positions)",
            column, decision.score, decision.work
        ),
        Strategy::Mcts => format!(
            "MCTS played column {} (confidence {:.3}, {} iterations)",
            column, decision.score, decision.work
        ),
        Strategy::Greedy => format!(
            "Greedy played column {} (evaluation {})",
            column, decision.score
        ),
    }
}

pub fn render_board(board: &Board, state: &DisplayState) -> std::io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    print!("=== Connect Four ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    // 列番号
    print!("  ");
    for col in 0..COLUMNS {
        print!("  {} ", col + 1);
    }
    print!("\r\n");

    // カーソル行
    print!("  ");
    for col in 0..COLUMNS {
        if state.show_cursor && state.cursor == col {
            print!("  {} ", "v".yellow().bold());
        } else {
            print!("    ");
        }
    }
    print!("\r\n");

    let landing = if state.show_cursor {
        board
            .next_open_row(state.cursor)
            .map(|row| Position::new(row, state.cursor))
    } else {
        None
    };

    print!(" +{}+\r\n", "----".repeat(COLUMNS));
    for row in (0..ROWS).rev() {
        print!(" |");
        for col in 0..COLUMNS {
            let pos = Position::new(row, col);
            let cell = board.at(pos);
            let is_last_move = state.last_move == Some(pos);
            let is_landing = landing == Some(pos);

            let (prefix, suffix) = if is_landing {
                ("(", ")")
            } else if is_last_move {
                ("{", "}")
            } else {
                (" ", " ")
            };
            let cell_text = format!(" {}{}{}", prefix, cell.to_char(), suffix);

            if is_landing {
                print!("{}", cell_text.green());
            } else if is_last_move {
                print!("{}", cell_text.red().bold());
            } else {
                match cell.owner() {
                    Some(Side::Player) => print!("{}", cell_text.cyan()),
                    Some(Side::Ai) => print!("{}", cell_text.magenta()),
                    None => print!("{}", cell_text.dark_grey()),
                }
            }
        }
        print!("|\r\n");
    }
    print!(" +{}+\r\n", "----".repeat(COLUMNS));
    print!("\r\n");

    if let Some(scores) = &state.scores {
        print!(
            "{}   {}\r\n",
            format!("Player (X): {:.3}", scores.player).cyan(),
            format!("AI (O): {:.3}", scores.ai).magenta()
        );
    }
    if let Some(info) = &state.info_msg {
        print!("{}\r\n", info);
    }

    out.flush()
}
