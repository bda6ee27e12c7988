pub mod ai;
pub mod controller;
pub mod tui;

pub use controller::{AiController, Choice, PlayerController};
pub use tui::TuiController;
