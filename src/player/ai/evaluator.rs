//! Evaluator trait for board evaluation
//!
//! Defines a common interface for static evaluation strategies so the
//! searches can be written once.

use crate::core::{Board, Side};

/// Trait for evaluating board positions
pub trait Evaluator: Send + Sync {
    /// Evaluate the board from `side`'s perspective
    ///
    /// Returns:
    ///   - Positive score: `side` advantage
    ///   - Negative score: opponent advantage
    fn evaluate(&self, board: &Board, side: Side) -> i32;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}
