use super::evaluator::Evaluator;
use crate::core::{Board, Side};

/// One-ply lookahead: drop `side`'s piece in every open column and keep the
/// column whose resulting board evaluates highest. The lowest open column is
/// the default, and only a strictly better score replaces it.
pub fn pick_best_move<E: Evaluator>(evaluator: &E, board: &Board, side: Side) -> Option<(usize, i32)> {
    let mut best: Option<(usize, i32)> = None;
    for col in board.legal_columns() {
        let score = evaluator.evaluate(&board.with_move(col, side), side);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((col, score)),
        }
    }
    best
}
