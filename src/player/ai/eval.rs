//! # Evaluation Module
//!
//! Static evaluation of a Connect Four position for one side.
//!
//! ## Scoring Strategy
//! Every window of four cells is scored independently and the results are
//! summed:
//! 1. **Completed line**: four own pieces.
//! 2. **Open three / open two**: own pieces with the rest of the window empty.
//! 3. **Opponent open three**: penalised, so blocking threats pays off.
//!
//! The score is not zero-sum: the same window can count for both sides.

use super::config::EvaluationConfig;
use super::evaluator::Evaluator;
use crate::core::{Board, Cell, Side, WINDOW_LENGTH};
use crate::logic::{window_cells, WINDOWS};

/// Scores one window for `side` with the given weights.
pub fn evaluate_window_with(
    window: &[Cell; WINDOW_LENGTH],
    side: Side,
    weights: &EvaluationConfig,
) -> i32 {
    let own = side.piece();
    let opp = side.opponent().piece();

    let own_count = window.iter().filter(|&&c| c == own).count();
    let opp_count = window.iter().filter(|&&c| c == opp).count();
    let empty_count = window.iter().filter(|c| c.is_empty()).count();

    let mut score = 0;
    if own_count == 4 {
        score += weights.four;
    } else if own_count == 3 && empty_count == 1 {
        score += weights.three_open;
    } else if own_count == 2 && empty_count == 2 {
        score += weights.two_open;
    }

    if opp_count == 3 && empty_count == 1 {
        score += weights.opponent_three_open;
    }

    score
}

/// Scores one window for `side` with the default weights (100/5/2/-4).
pub fn evaluate_window(window: &[Cell; WINDOW_LENGTH], side: Side) -> i32 {
    evaluate_window_with(window, side, &EvaluationConfig::default())
}

/// Sum of window scores over the whole board. Recomputed from scratch.
pub fn score_position_with(board: &Board, side: Side, weights: &EvaluationConfig) -> i32 {
    WINDOWS
        .iter()
        .map(|window| evaluate_window_with(&window_cells(board, window), side, weights))
        .sum()
}

pub fn score_position(board: &Board, side: Side) -> i32 {
    score_position_with(board, side, &EvaluationConfig::default())
}

/// The window heuristic behind the [`Evaluator`] trait.
#[derive(Debug, Clone, Default)]
pub struct WindowEvaluator {
    weights: EvaluationConfig,
}

impl WindowEvaluator {
    pub fn new(weights: EvaluationConfig) -> Self {
        Self { weights }
    }
}

impl Evaluator for WindowEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        score_position_with(board, side, &self.weights)
    }

    fn name(&self) -> &str {
        "window"
    }
}
