use super::Scoreboard;
use crate::core::{Board, GameResult, Side};
use crate::error::{EngineError, Result};
use crate::logic::classify;
use crate::player::ai::Strategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub side: Side,
    pub column: usize,
    pub row: usize,
    /// Points credited to the mover, win bonus excluded.
    pub gained: f64,
    /// Strategy that chose the column; `None` for human moves.
    pub strategy: Option<Strategy>,
}

/// A finished game as saved to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player: String,
    pub ai: String,
    pub first: Side,
    pub moves: Vec<MoveRecord>,
    pub result: GameResult,
    pub resigned: Option<Side>,
    pub final_board: Board,
    pub scores: Scoreboard,
    pub played_at: String,
}

impl GameRecord {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Board after every move, checking that sides alternate from `first`,
    /// that no move follows a finished game, that each piece lands on the
    /// recorded row, and that the last board matches `final_board` and the
    /// stored `result`.
    pub fn replay(&self) -> Result<Vec<Board>> {
        let mut boards = Vec::with_capacity(self.moves.len());
        let mut board = Board::new();
        let mut side = self.first;

        for (ply, mv) in self.moves.iter().enumerate() {
            let before = classify(&board);
            if before.is_terminal() {
                return Err(EngineError::InvalidBoard(format!(
                    "move {} was played after the game ended ({:?})",
                    ply + 1,
                    before
                )));
            }
            if mv.side != side {
                return Err(EngineError::InvalidBoard(format!(
                    "move {} was played by {} out of turn",
                    ply + 1,
                    mv.side
                )));
            }
            let row = board.play(mv.column, side)?;
            if row != mv.row {
                return Err(EngineError::InvalidBoard(format!(
                    "move {} landed on row {} but the record says {}",
                    ply + 1,
                    row,
                    mv.row
                )));
            }
            boards.push(board);
            side = side.opponent();
        }

        if board != self.final_board {
            return Err(EngineError::InvalidBoard(
                "moves do not reproduce the final board".to_string(),
            ));
        }

        let on_board = classify(&board);
        let expected = match self.resigned {
            Some(_) if on_board.is_terminal() => {
                return Err(EngineError::InvalidBoard(format!(
                    "resignation recorded on a finished board ({:?})",
                    on_board
                )));
            }
            Some(side) => GameResult::won_by(side.opponent()),
            None => on_board,
        };
        if expected != self.result {
            return Err(EngineError::InvalidBoard(format!(
                "recorded result {:?} but the moves give {:?}",
                self.result, expected
            )));
        }
        Ok(boards)
    }
}
