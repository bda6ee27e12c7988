pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;

#[cfg(test)]
mod logic_tests;

pub use error::{EngineError, Result};
pub use player::ai::{choose_move, Decision, DecisionEngine, EngineConfig, Strategy};
