use super::evaluator::Evaluator;
use crate::core::{Board, GameResult, Side};
use crate::logic::classify;

/// Result of a minimax search from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxOutcome {
    /// `None` only when the root itself is terminal or the depth is zero.
    pub column: Option<usize>,
    pub score: i32,
    /// Number of positions visited, root included.
    pub nodes: u64,
}

/// Depth-limited minimax with alpha-beta pruning, scored from `side`'s
/// perspective. Ties keep the first (lowest) column examined.
pub struct MinimaxSearch<'a, E: Evaluator> {
    evaluator: &'a E,
    side: Side,
    terminal_bonus: i32,
    nodes: u64,
}

impl<'a, E: Evaluator> MinimaxSearch<'a, E> {
    pub fn new(evaluator: &'a E, side: Side, terminal_bonus: i32) -> Self {
        Self {
            evaluator,
            side,
            terminal_bonus,
            nodes: 0,
        }
    }

    pub fn run(&mut self, board: &Board, depth: u32) -> MinimaxOutcome {
        self.nodes = 0;
        let (column, score) = self.minimax(board, depth, i32::MIN, i32::MAX, true);
        MinimaxOutcome {
            column,
            score,
            nodes: self.nodes,
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        alpha: i32,
        beta: i32,
        is_maximizing: bool,
    ) -> (Option<usize>, i32) {
        self.nodes += 1;

        // terminal detection comes before the heuristic so a finished line is
        // never scored as a window
        match classify(board) {
            GameResult::NotTerminal => {}
            GameResult::Draw => return (None, 0),
            result => {
                let score = if result.winner() == Some(self.side) {
                    self.terminal_bonus
                } else {
                    -self.terminal_bonus
                };
                return (None, score);
            }
        }
        if depth == 0 {
            return (None, self.evaluator.evaluate(board, self.side));
        }

        let moves = board.legal_columns();
        let mut best_col = moves.first().copied();

        if is_maximizing {
            let mut value = i32::MIN;
            let mut alpha = alpha;
            for col in moves {
                let next_board = board.with_move(col, self.side);
                let (_, score) = self.minimax(&next_board, depth - 1, alpha, beta, false);
                if score > value {
                    value = score;
                    best_col = Some(col);
                }
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            (best_col, value)
        } else {
            let mut value = i32::MAX;
            let mut beta = beta;
            let opponent = self.side.opponent();
            for col in moves {
                let next_board = board.with_move(col, opponent);
                let (_, score) = self.minimax(&next_board, depth - 1, alpha, beta, true);
                if score < value {
                    value = score;
                    best_col = Some(col);
                }
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            (best_col, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{board_to_strings, setup_from_strings, COLUMNS};
    use crate::player::ai::eval::WindowEvaluator;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn search(board: &Board, side: Side, depth: u32) -> MinimaxOutcome {
        let evaluator = WindowEvaluator::default();
        MinimaxSearch::new(&evaluator, side, 50).run(board, depth)
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = setup_from_strings(&[
            ".......", ".......", ".......", "....X..", "....O..", "XX.OOOX",
        ])
        .unwrap();
        // column 2 completes O O O O on the bottom row
        for depth in 1..=4 {
            let outcome = search(&board, Side::Ai, depth);
            assert_eq!(outcome.column, Some(2), "depth {}", depth);
            assert_eq!(outcome.score, 50);
        }
    }

    #[test]
    fn test_blocks_opponent_win() {
        let board = setup_from_strings(&[
            ".......", ".......", ".......", ".......", "O......", "XXX.O..",
        ])
        .unwrap();
        let outcome = search(&board, Side::Ai, 2);
        assert_eq!(outcome.column, Some(3));
    }

    #[test]
    fn test_plays_for_the_player_side() {
        let board = setup_from_strings(&[
            ".......", ".......", ".......", ".......", ".......", "XXX....",
        ])
        .unwrap();
        let outcome = search(&board, Side::Player, 3);
        assert_eq!(outcome.column, Some(3));
        assert_eq!(outcome.score, 50);
    }

    #[test]
    fn test_deterministic_for_fixed_board_and_depth() {
        let board = setup_from_strings(&[
            ".......", ".......", ".......", "...X...", "..OO...", "..XXO..",
        ])
        .unwrap();
        let first = search(&board, Side::Ai, 4);
        for _ in 0..3 {
            assert_eq!(search(&board, Side::Ai, 4), first);
        }
    }

    #[test]
    fn test_depth_zero_terminal_scores_bonus_not_window() {
        let won = setup_from_strings(&[
            ".......", ".......", ".......", ".......", "XXX....", "OOOO...",
        ])
        .unwrap();
        let outcome = search(&won, Side::Ai, 0);
        assert_eq!(outcome.column, None);
        assert_eq!(outcome.score, 50);
        assert_eq!(outcome.nodes, 1);

        let lost = setup_from_strings(&[
            ".......", ".......", ".......", ".......", "OOO....", "XXXX...",
        ])
        .unwrap();
        assert_eq!(search(&lost, Side::Ai, 3).score, -50);
    }

    #[test]
    fn test_depth_zero_non_terminal_uses_heuristic() {
        let board = setup_from_strings(&[
            ".......", ".......", ".......", ".......", ".......", "OO.O...",
        ])
        .unwrap();
        let outcome = search(&board, Side::Ai, 0);
        assert_eq!(outcome.score, 7);
    }

    #[test]
    fn test_empty_board_node_count_is_bounded() {
        let outcome = search(&Board::new(), Side::Ai, 5);
        let col = outcome.column.unwrap();
        assert!(col < COLUMNS);
        // full width-7 tree of depth 5 without pruning
        let full_tree: u64 = (0..=5).map(|d| 7u64.pow(d)).sum();
        assert!(outcome.nodes > 1);
        assert!(outcome.nodes <= full_tree);
    }

    #[test]
    fn test_pruning_cuts_most_of_the_empty_board_tree() {
        let outcome = search(&Board::new(), Side::Ai, 5);
        let full_tree: u64 = (0..=5).map(|d| 7u64.pow(d)).sum();
        // 2209 of 19608 positions with the ascending column order
        assert!(
            outcome.nodes * 4 < full_tree,
            "visited {} of {}",
            outcome.nodes,
            full_tree
        );
    }

    /// Minimax over the whole tree, no bounds.
    fn full_minimax(board: &Board, depth: u32, maximizing: bool, side: Side, evaluator: &WindowEvaluator) -> i32 {
        match classify(board) {
            GameResult::NotTerminal => {}
            GameResult::Draw => return 0,
            result => return if result.winner() == Some(side) { 50 } else { -50 },
        }
        if depth == 0 {
            return evaluator.evaluate(board, side);
        }
        let mover = if maximizing { side } else { side.opponent() };
        let scores = board.legal_columns().into_iter().map(|col| {
            full_minimax(&board.with_move(col, mover), depth - 1, !maximizing, side, evaluator)
        });
        let best = if maximizing { scores.max() } else { scores.min() };
        best.unwrap()
    }

    #[test]
    fn test_pruning_keeps_the_unpruned_value() {
        let evaluator = WindowEvaluator::default();
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        for _ in 0..60 {
            let mut board = Board::new();
            let mut to_move = Side::Player;
            let plies = rng.gen_range(0..20);
            for _ in 0..plies {
                if classify(&board).is_terminal() {
                    break;
                }
                let col = *board.legal_columns().choose(&mut rng).unwrap();
                board = board.with_move(col, to_move);
                to_move = to_move.opponent();
            }

            for depth in 1..=4 {
                for side in [Side::Player, Side::Ai] {
                    let outcome = MinimaxSearch::new(&evaluator, side, 50).run(&board, depth);
                    assert_eq!(
                        outcome.score,
                        full_minimax(&board, depth, true, side, &evaluator),
                        "depth {} side {} board {:?}",
                        depth,
                        side,
                        board_to_strings(&board)
                    );
                }
            }
        }
    }

    #[test]
    fn test_full_board_is_a_draw_leaf() {
        let board = setup_from_strings(&[
            "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX",
        ])
        .unwrap();
        let outcome = search(&board, Side::Ai, 5);
        assert_eq!(outcome.column, None);
        assert_eq!(outcome.score, 0);
    }
}
