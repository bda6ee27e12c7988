//! Error types for the decision engine.

use crate::core::GameResult;
use thiserror::Error;

/// Errors surfaced by the board model and the decision interface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("column {column} is out of range or already full")]
    InvalidColumn { column: usize },

    #[error("no legal moves available (position is {result:?})")]
    NoLegalMoves { result: GameResult },

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
