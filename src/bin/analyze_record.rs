//! CLI tool that replays a saved game record and prints one JSON line per move
//! with both sides' static evaluation and their immediate winning columns.

use connect_four_ai::core::{GameResult, Side};
use connect_four_ai::game::GameRecord;
use connect_four_ai::logic::{classify, winning_column};
use connect_four_ai::player::ai::score_position;
use serde::Serialize;
use std::env;

#[derive(Serialize)]
struct MoveAnalysis {
    ply: usize,
    side: Side,
    column: usize,
    row: usize,
    player_score: i32,
    ai_score: i32,
    player_wins_at: Option<usize>,
    ai_wins_at: Option<usize>,
    result: GameResult,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: analyze_record <record.json>");
        std::process::exit(1);
    }

    let record = GameRecord::load(&args[1])?;
    let boards = record.replay()?;

    for (ply, (mv, board)) in record.moves.iter().zip(&boards).enumerate() {
        let analysis = MoveAnalysis {
            ply: ply + 1,
            side: mv.side,
            column: mv.column,
            row: mv.row,
            player_score: score_position(board, Side::Player),
            ai_score: score_position(board, Side::Ai),
            player_wins_at: winning_column(board, Side::Player),
            ai_wins_at: winning_column(board, Side::Ai),
            result: classify(board),
        };
        println!("{}", serde_json::to_string(&analysis)?);
    }

    eprintln!(
        "{} vs {}: {:?} after {} moves (scores {:.3} / {:.3})",
        record.player,
        record.ai,
        record.result,
        record.moves.len(),
        record.scores.player,
        record.scores.ai
    );
    Ok(())
}
