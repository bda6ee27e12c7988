use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;
pub const WINDOW_LENGTH: usize = 4;

/// Side of the game. `Player` is the human seat, `Ai` the engine seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

impl Default for Side {
    fn default() -> Self {
        Side::Player
    }
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// The cell value this side's pieces occupy.
    pub fn piece(self) -> Cell {
        match self {
            Side::Player => Cell::Player,
            Side::Ai => Cell::Ai,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Ai,
}

impl Cell {
    pub fn owner(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Player => Some(Side::Player),
            Cell::Ai => Some(Side::Ai),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'X',
            Cell::Ai => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Player),
            'O' | 'o' => Some(Cell::Ai),
            _ => None,
        }
    }
}

/// Terminal classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    PlayerWins,
    AiWins,
    Draw,
    NotTerminal,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        self != GameResult::NotTerminal
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::PlayerWins => Some(Side::Player),
            GameResult::AiWins => Some(Side::Ai),
            GameResult::Draw | GameResult::NotTerminal => None,
        }
    }

    pub fn won_by(side: Side) -> GameResult {
        match side {
            Side::Player => GameResult::PlayerWins,
            Side::Ai => GameResult::AiWins,
        }
    }
}

/// Board coordinate (0-indexed, row 0 at the bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
