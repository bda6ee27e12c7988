pub mod record;

pub use record::{GameRecord, MoveRecord};

use crate::core::{Board, GameResult, Position, Side};
use crate::display::{describe_decision, render_board, DisplayState};
use crate::error::{EngineError, Result};
use crate::logic::classify;
use crate::player::ai::{score_position, Decision};
use crate::player::PlayerController;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Bonus credited to the side that completes four in a row.
pub const WIN_BONUS: f64 = 1000.0;

/// Running score per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player: f64,
    pub ai: f64,
}

impl Scoreboard {
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    pub fn add(&mut self, side: Side, amount: f64) {
        match side {
            Side::Player => self.player += amount,
            Side::Ai => self.ai += amount,
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Finished(GameResult),
    Resigned(Side),
}

pub struct Game {
    pub board: Board,
    pub current: Side,
    pub first: Side,
    pub history: Vec<MoveRecord>,
    pub scores: Scoreboard,
    pub resigned: Option<Side>,
    pub last_decision: Option<Decision>,
}

impl Game {
    pub fn new(first: Side) -> Self {
        Game {
            board: Board::new(),
            current: first,
            first,
            history: Vec::new(),
            scores: Scoreboard::default(),
            resigned: None,
            last_decision: None,
        }
    }

    /// Win, draw or resignation; `NotTerminal` while the game runs.
    pub fn result(&self) -> GameResult {
        match self.resigned {
            Some(side) => GameResult::won_by(side.opponent()),
            None => classify(&self.board),
        }
    }

    pub fn is_over(&self) -> bool {
        self.result().is_terminal()
    }

    pub fn last_move(&self) -> Option<Position> {
        self.history
            .last()
            .map(|mv| Position::new(mv.row, mv.column))
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            last_move: self.last_move(),
            scores: Some(self.scores),
            info_msg: self.last_decision.as_ref().map(describe_decision),
            ..DisplayState::default()
        }
    }

    fn controller_for<'a>(
        &self,
        player: &'a dyn PlayerController,
        ai: &'a dyn PlayerController,
    ) -> &'a dyn PlayerController {
        match self.current {
            Side::Player => player,
            Side::Ai => ai,
        }
    }

    /// Drops the side to move's piece in `column` and updates the scoreboard:
    /// an engine move scores its decision value, any other move scores the
    /// static evaluation of the new board. A win adds [`WIN_BONUS`].
    pub fn apply(&mut self, column: usize, decision: Option<&Decision>) -> Result<StepOutcome> {
        let result = self.result();
        if result.is_terminal() {
            return Err(EngineError::NoLegalMoves { result });
        }

        let side = self.current;
        let row = self.board.play(column, side)?;
        let gained = match decision {
            Some(d) => round3(d.score),
            None => score_position(&self.board, side) as f64,
        };
        self.scores.add(side, gained);
        self.history.push(MoveRecord {
            side,
            column,
            row,
            gained,
            strategy: decision.map(|d| d.strategy),
        });
        self.last_decision = decision.cloned();

        let result = classify(&self.board);
        if let Some(winner) = result.winner() {
            self.scores.add(winner, WIN_BONUS);
        }
        debug!(side = %side, column, row, gained, result = ?result, "move applied");

        if result.is_terminal() {
            Ok(StepOutcome::Finished(result))
        } else {
            self.current = side.opponent();
            Ok(StepOutcome::Continue)
        }
    }

    /// Asks the side to move for a column and applies it. A controller that
    /// returns nothing resigns; a column outside the legal set is rejected and
    /// leaves the game untouched.
    pub fn step(&mut self, player: &dyn PlayerController, ai: &dyn PlayerController) -> Result<StepOutcome> {
        let result = self.result();
        if result.is_terminal() {
            return Err(EngineError::NoLegalMoves { result });
        }

        let controller = self.controller_for(player, ai);
        let legal_columns = self.board.legal_columns();
        match controller.choose_move(&self.board, &legal_columns, &self.display_state()) {
            Some(choice) => {
                if !legal_columns.contains(&choice.column) {
                    return Err(EngineError::InvalidColumn {
                        column: choice.column,
                    });
                }
                self.apply(choice.column, choice.decision.as_ref())
            }
            None => {
                debug!(side = %self.current, name = controller.name(), "resigned");
                self.resigned = Some(self.current);
                Ok(StepOutcome::Resigned(self.current))
            }
        }
    }

    /// Plays to the end without any terminal output.
    pub fn run(&mut self, player: &dyn PlayerController, ai: &dyn PlayerController) -> Result<StepOutcome> {
        loop {
            match self.step(player, ai)? {
                StepOutcome::Continue => {}
                outcome => return Ok(outcome),
            }
        }
    }

    /// Interactive game on the terminal. Expects raw mode to be enabled.
    pub fn play(
        &mut self,
        player: &dyn PlayerController,
        ai: &dyn PlayerController,
    ) -> anyhow::Result<StepOutcome> {
        loop {
            let controller = self.controller_for(player, ai);

            if !controller.is_human() {
                let mut state = self.display_state();
                state.status_msg = Some(format!(
                    "{} ({}) is thinking...",
                    controller.name(),
                    self.current
                ));
                render_board(&self.board, &state)?;

                // 思考前に中断判定 (待たずに溜まった入力だけ見る)
                if contains_quit(&drain_events()?) {
                    self.resigned = Some(self.current.opponent());
                    let outcome = StepOutcome::Resigned(self.current.opponent());
                    self.show_final(player, ai, outcome)?;
                    return Ok(outcome);
                }
            }

            match self.step(player, ai)? {
                StepOutcome::Continue => {}
                outcome => {
                    self.show_final(player, ai, outcome)?;
                    return Ok(outcome);
                }
            }
        }
    }

    fn show_final(
        &self,
        player: &dyn PlayerController,
        ai: &dyn PlayerController,
        outcome: StepOutcome,
    ) -> anyhow::Result<()> {
        let name_of = |side: Side| match side {
            Side::Player => player.name(),
            Side::Ai => ai.name(),
        };
        let mut state = self.display_state();
        state.status_msg = Some(match outcome {
            StepOutcome::Finished(GameResult::Draw) => "Board full. It's a draw!".to_string(),
            StepOutcome::Finished(result) => match result.winner() {
                Some(side) => format!("Four in a row! {} ({}) wins!", name_of(side), side),
                None => "Game over.".to_string(),
            },
            StepOutcome::Resigned(side) => format!(
                "{} resigned. {} ({}) wins!",
                name_of(side),
                name_of(side.opponent()),
                side.opponent()
            ),
            StepOutcome::Continue => String::new(),
        });
        render_board(&self.board, &state)?;
        print!("Press any key to return.\r\n");

        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }

    /// Snapshot of the finished (or running) game.
    pub fn to_record(&self, player_name: &str, ai_name: &str) -> GameRecord {
        GameRecord {
            player: player_name.to_string(),
            ai: ai_name.to_string(),
            first: self.first,
            moves: self.history.clone(),
            result: self.result(),
            resigned: self.resigned,
            final_board: self.board,
            scores: self.scores,
            played_at: chrono::Local::now().to_rfc3339(),
        }
    }
}

/// Events already queued, without blocking. Keys typed while the engine
/// was thinking are dropped here.
fn drain_events() -> std::io::Result<Vec<Event>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO)? {
        events.push(event::read()?);
    }
    Ok(events)
}

fn contains_quit(events: &[Event]) -> bool {
    events.iter().any(|ev| {
        matches!(ev, Event::Key(key) if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q'))
    })
}
