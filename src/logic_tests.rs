#[cfg(test)]
mod tests {
    use crate::core::{setup_from_strings, Board, Cell, GameResult, Side, COLUMNS, ROWS};
    use crate::logic::{classify, has_four_in_a_row, winning_column};
    use proptest::prelude::*;

    fn board(rows: [&str; 6]) -> Board {
        setup_from_strings(&rows).unwrap()
    }

    /// Direct scan over every start cell and direction, independent of the
    /// window table.
    fn brute_force_four(board: &Board, side: Side) -> bool {
        let piece = side.piece();
        let dirs: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];
        for row in 0..ROWS as isize {
            for col in 0..COLUMNS as isize {
                for (dr, dc) in dirs {
                    let all = (0..4).all(|i| {
                        let r = row + dr * i;
                        let c = col + dc * i;
                        r >= 0
                            && r < ROWS as isize
                            && c >= 0
                            && c < COLUMNS as isize
                            && board.get(r as usize, c as usize) == piece
                    });
                    if all {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Plays a column sequence, skipping full columns, stopping at the first
    /// terminal position.
    fn play_out(columns: &[usize]) -> Board {
        let mut b = Board::new();
        let mut side = Side::Player;
        for &col in columns {
            if classify(&b).is_terminal() {
                break;
            }
            if b.play(col % COLUMNS, side).is_ok() {
                side = side.opponent();
            }
        }
        b
    }

    #[test]
    fn test_horizontal_win() {
        let b = board([
            ".......", ".......", ".......", ".......", "OOO....", "XXXX...",
        ]);
        assert!(has_four_in_a_row(&b, Side::Player));
        assert!(!has_four_in_a_row(&b, Side::Ai));
        assert_eq!(classify(&b), GameResult::PlayerWins);
    }

    #[test]
    fn test_vertical_win() {
        let b = board([
            ".......", ".......", "......O", "......O", "X.....O", "XX....O",
        ]);
        assert!(has_four_in_a_row(&b, Side::Ai));
        assert_eq!(classify(&b), GameResult::AiWins);
    }

    #[test]
    fn test_positive_diagonal_win() {
        let b = board([
            ".......", ".......", "...X...", "..XO...", ".XOO...", "XOOX...",
        ]);
        assert!(has_four_in_a_row(&b, Side::Player));
        assert!(!has_four_in_a_row(&b, Side::Ai));
    }

    #[test]
    fn test_negative_diagonal_win() {
        let b = board([
            ".......", ".......", "...O...", "...XO..", "...XXO.", "...XXXO",
        ]);
        assert!(has_four_in_a_row(&b, Side::Ai));
        assert_eq!(classify(&b), GameResult::AiWins);
    }

    #[test]
    fn test_three_is_not_a_win() {
        let b = board([
            ".......", ".......", ".......", ".......", ".......", "XXX.OOO",
        ]);
        assert!(!has_four_in_a_row(&b, Side::Player));
        assert!(!has_four_in_a_row(&b, Side::Ai));
        assert_eq!(classify(&b), GameResult::NotTerminal);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let b = board([
            "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX",
        ]);
        assert!(b.legal_columns().is_empty());
        assert_eq!(classify(&b), GameResult::Draw);
    }

    #[test]
    fn test_winning_column_in_one() {
        let b = board([
            ".......", ".......", ".......", ".......", ".......", "XXX....",
        ]);
        assert_eq!(winning_column(&b, Side::Player), Some(3));
        assert_eq!(winning_column(&b, Side::Ai), None);
    }

    #[test]
    fn test_winning_column_prefers_lowest_index() {
        let b = board([
            ".......", ".......", ".......", "O......", "O......", "OXXX...",
        ]);
        // column 0 stacks a fourth O; column 4 completes XXXX for the player
        assert_eq!(winning_column(&b, Side::Ai), Some(0));
        assert_eq!(winning_column(&b, Side::Player), Some(4));
    }

    proptest! {
        #[test]
        fn prop_four_in_a_row_matches_brute_force(columns in prop::collection::vec(0usize..COLUMNS, 0..42)) {
            let b = play_out(&columns);
            prop_assert_eq!(has_four_in_a_row(&b, Side::Player), brute_force_four(&b, Side::Player));
            prop_assert_eq!(has_four_in_a_row(&b, Side::Ai), brute_force_four(&b, Side::Ai));
        }

        #[test]
        fn prop_legal_columns_have_open_tops(columns in prop::collection::vec(0usize..COLUMNS, 0..60)) {
            let b = play_out(&columns);
            for col in b.legal_columns() {
                prop_assert_eq!(b.get(ROWS - 1, col), Cell::Empty);
            }
            for col in 0..COLUMNS {
                if !b.legal_columns().contains(&col) {
                    prop_assert!(!b.get(ROWS - 1, col).is_empty());
                }
            }
        }

        #[test]
        fn prop_next_open_row_is_never_occupied(columns in prop::collection::vec(0usize..COLUMNS, 0..60), col in 0usize..COLUMNS) {
            let mut b = play_out(&columns);
            if let Some(row) = b.next_open_row(col) {
                b.drop_piece(row, col, Side::Ai);
                if let Some(next) = b.next_open_row(col) {
                    prop_assert!(next > row);
                    prop_assert_eq!(b.get(next, col), Cell::Empty);
                }
            }
        }

        #[test]
        fn prop_pieces_never_float(columns in prop::collection::vec(0usize..COLUMNS, 0..60)) {
            let b = play_out(&columns);
            for col in 0..COLUMNS {
                for row in 1..ROWS {
                    if !b.get(row, col).is_empty() {
                        prop_assert!(!b.get(row - 1, col).is_empty());
                    }
                }
            }
        }
    }
}
