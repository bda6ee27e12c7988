pub mod board;
pub mod serialization;
pub mod setup;
pub mod types;

pub use board::Board;
pub use setup::{board_to_strings, setup_from_strings};
pub use types::{Cell, GameResult, Position, Side, COLUMNS, ROWS, WINDOW_LENGTH};
