//! Serde helpers that store the grid as readable row strings (top row first)
//! instead of a nested array of enum tags.

use super::setup::{board_to_strings, setup_from_strings};
use super::types::{Cell, COLUMNS, ROWS};
use crate::core::Board;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S>(cells: &[[Cell; COLUMNS]; ROWS], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    board_to_strings(&Board::from_cells(*cells)).serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<[[Cell; COLUMNS]; ROWS], D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<String> = Vec::deserialize(deserializer)?;
    let board = setup_from_strings(rows.as_slice()).map_err(D::Error::custom)?;
    Ok(*board.cells())
}

#[cfg(test)]
mod tests {
    use crate::core::{setup_from_strings, Board};

    #[test]
    fn board_serializes_as_rows() {
        let board = setup_from_strings(&[
            ".......", ".......", ".......", ".......", ".......", "..XO...",
        ])
        .unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("\"..XO...\""));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn invalid_rows_fail_to_deserialize() {
        let json = r#"{"cells":[".......",".......",".......",".......","...X...","......."]}"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }
}
